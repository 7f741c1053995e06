//! Outbound side of the duplex channel.
//!
//! The session only ever needs "send this text" and "close". Writes are
//! queued synchronously and drained by a writer task that owns the socket
//! sink, so event handlers never await.

use std::fmt::Display;

use futures_util::{Sink, SinkExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("channel is closed")]
    Closed,
}

pub trait Channel {
    fn send(&mut self, text: String) -> Result<(), ChannelError>;
    fn close(&mut self) -> Result<(), ChannelError>;
}

/// Item handed from the session to the writer task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Text(String),
    Close,
}

/// [`Channel`] backed by an unbounded queue.
#[derive(Debug, Clone)]
pub struct OutboundQueue {
    tx: mpsc::UnboundedSender<Outbound>,
}

pub fn outbound_queue() -> (OutboundQueue, mpsc::UnboundedReceiver<Outbound>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (OutboundQueue { tx }, rx)
}

impl Channel for OutboundQueue {
    fn send(&mut self, text: String) -> Result<(), ChannelError> {
        self.tx
            .send(Outbound::Text(text))
            .map_err(|_| ChannelError::Closed)
    }

    fn close(&mut self) -> Result<(), ChannelError> {
        self.tx.send(Outbound::Close).map_err(|_| ChannelError::Closed)
    }
}

/// Drain queued items into a WebSocket sink until close or failure.
///
/// A `Close` item sends a close frame and ends the task; so does the queue
/// being dropped.
pub async fn write_outbound<S>(mut sink: S, mut rx: mpsc::UnboundedReceiver<Outbound>)
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    while let Some(item) = rx.recv().await {
        match item {
            Outbound::Text(text) => {
                if let Err(e) = sink.send(Message::Text(text)).await {
                    warn!(error = %e, "failed to send frame; writer exiting");
                    return;
                }
            }
            Outbound::Close => {
                if let Err(e) = sink.send(Message::Close(None)).await {
                    debug!(error = %e, "close frame not delivered");
                }
                break;
            }
        }
    }
    let _ = sink.close().await;
}

/// In-memory channel that records everything sent through it.
#[derive(Debug, Default, Clone)]
pub struct MemoryChannel {
    pub sent: Vec<String>,
    pub closed: bool,
}

impl Channel for MemoryChannel {
    fn send(&mut self, text: String) -> Result<(), ChannelError> {
        if self.closed {
            return Err(ChannelError::Closed);
        }
        self.sent.push(text);
        Ok(())
    }

    fn close(&mut self) -> Result<(), ChannelError> {
        self.closed = true;
        Ok(())
    }
}
