//! MCP over standard input/output.
//!
//! One JSON-RPC message per line in each direction, for exactly one peer.
//! Every message is handled in its own task, so a slow tool call never holds
//! up later messages. Responses funnel through a single writer and may come
//! out in a different order than the requests went in. The loop ends when the
//! input stream closes and every in-flight message has been answered.
//! Nothing but protocol messages may be written to stdout, logging goes to
//! stderr.

use std::sync::Arc;

use anyhow::{Context, Result};
use futures::StreamExt;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};
use tracing::{debug, info, warn};

use super::handler::{handle_message, McpState};
use super::protocol::{McpError, McpResponse};

/// Longest accepted line on the input stream.
pub const MAX_MESSAGE_BYTES: usize = 4 * 1024 * 1024;

const RESPONSE_CHANNEL_CAPACITY: usize = 64;

/// Serve MCP on the process's stdin/stdout until stdin closes.
pub async fn run_stdio(state: Arc<McpState>) -> Result<()> {
    info!("Serving MCP on stdio");
    serve(tokio::io::stdin(), tokio::io::stdout(), state).await
}

/// Serve MCP over an arbitrary line-oriented stream pair.
pub async fn serve<R, W>(reader: R, writer: W, state: Arc<McpState>) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (tx, rx) = mpsc::channel(RESPONSE_CHANNEL_CAPACITY);
    tokio::try_join!(read_messages(reader, tx, state), write_responses(writer, rx))?;
    debug!("Input stream closed");
    Ok(())
}

/// Reads lines until EOF, spawning a handler per message. Returns once every
/// handler has finished, which drops the last sender and lets the writer end.
async fn read_messages<R>(
    reader: R,
    tx: mpsc::Sender<McpResponse>,
    state: Arc<McpState>,
) -> Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut lines = FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_MESSAGE_BYTES));
    let mut in_flight = JoinSet::new();

    // FramedRead yields a single None right after a decode error
    let mut resuming = false;

    loop {
        let Some(line) = lines.next().await else {
            if std::mem::take(&mut resuming) {
                continue;
            }
            break;
        };

        match line {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let state = state.clone();
                let tx = tx.clone();
                in_flight.spawn(async move {
                    if let Some(response) = handle_message(line.trim(), &state).await {
                        if tx.send(response).await.is_err() {
                            debug!("Output closed, dropping response");
                        }
                    }
                });
            }
            Err(LinesCodecError::MaxLineLengthExceeded) => {
                warn!("Dropping message longer than {} bytes", MAX_MESSAGE_BYTES);
                resuming = true;
                let response =
                    McpResponse::error(None, McpError::ParseError("Message too long".to_string()));
                if tx.send(response).await.is_err() {
                    debug!("Output closed, dropping response");
                }
            }
            Err(LinesCodecError::Io(e)) => {
                return Err(e).context("Failed to read from input stream");
            }
        }

        // reap finished handlers so the set does not grow with the session
        while in_flight.try_join_next().is_some() {}
    }

    if !in_flight.is_empty() {
        debug!("Waiting for {} in-flight messages", in_flight.len());
    }
    while let Some(joined) = in_flight.join_next().await {
        if let Err(e) = joined {
            warn!("Message handler failed: {}", e);
        }
    }
    Ok(())
}

async fn write_responses<W>(mut writer: W, mut rx: mpsc::Receiver<McpResponse>) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        write_response(&mut writer, &response).await?;
    }
    Ok(())
}

async fn write_response<W: AsyncWrite + Unpin>(writer: &mut W, response: &McpResponse) -> Result<()> {
    let mut json = serde_json::to_string(response).context("Failed to serialize MCP response")?;
    json.push('\n');
    writer
        .write_all(json.as_bytes())
        .await
        .context("Failed to write to output stream")?;
    writer
        .flush()
        .await
        .context("Failed to flush output stream")
}
