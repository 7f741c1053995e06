//! Connection runtime.
//!
//! Opens the WebSocket, takes over the terminal and runs the single event
//! loop: inbound frames and terminal events are handled one at a time, in
//! arrival order, on the calling task.

use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream};
use futures_util::{Stream, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, Message};
use tracing::{debug, info, warn};

use crate::channel::{outbound_queue, write_outbound, Channel};
use crate::config::ClientConfig;
use crate::input::{pointer_event, KeyMap};
use crate::session::Session;
use crate::term::{FrameBuffer, Surface, TerminalRenderer};

/// How long to wait for the close frame to be flushed on exit.
const WRITER_DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Why the event loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The user closed the session.
    Closed,
    /// The server sent a close frame.
    ServerClosed,
    /// The socket failed or the stream ended.
    Disconnected,
    /// The terminal event stream ended.
    InputEnded,
}

pub async fn run(config: ClientConfig) -> Result<Exit> {
    let (ws, _) = connect_async(config.server_url.as_str())
        .await
        .with_context(|| format!("failed to connect to {}", config.server_url))?;
    info!(url = %config.server_url, "connected");

    let (sink, mut stream) = ws.split();
    let (queue, out_rx) = outbound_queue();
    let writer = tokio::spawn(write_outbound(sink, out_rx));

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = event_loop(&config, &mut term, &mut stream, queue).await;
    // Always try to restore terminal state.
    let _ = term.exit();

    if tokio::time::timeout(WRITER_DRAIN_TIMEOUT, writer).await.is_err() {
        debug!("writer did not finish in time");
    }

    let exit = result?;
    info!(?exit, "session ended");
    Ok(exit)
}

async fn event_loop<S, C>(
    config: &ClientConfig,
    term: &mut TerminalRenderer,
    inbound: &mut S,
    channel: C,
) -> Result<Exit>
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
    C: Channel,
{
    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(cols, rows);
    let mut session = Session::new(channel, config.scene_view(), KeyMap::default(), fb.size());
    let mut events = EventStream::new();

    loop {
        tokio::select! {
            frame = inbound.next() => match frame {
                Some(Ok(Message::Text(text))) => match session.on_message(&text, &mut fb) {
                    Ok(Some(_)) => term.present(&fb)?,
                    Ok(None) => {}
                    Err(e) => warn!(error = %e, "dropping snapshot frame"),
                },
                Some(Ok(Message::Close(frame))) => {
                    info!(?frame, "server closed the connection");
                    return Ok(Exit::ServerClosed);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(error = %e, "connection lost");
                    return Ok(Exit::Disconnected);
                }
                None => {
                    info!("connection stream ended");
                    return Ok(Exit::Disconnected);
                }
            },
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => {
                    if let Err(e) = session.on_key(key) {
                        warn!(error = %e, "failed to send key action");
                    }
                }
                Some(Ok(Event::Mouse(mouse))) => {
                    if let Some(pointer) = pointer_event(&mouse) {
                        if let Err(e) = session.on_pointer(pointer) {
                            warn!(error = %e, "failed to send pointer action");
                        }
                    }
                }
                Some(Ok(Event::Resize(w, h))) => {
                    fb.resize(w, h);
                    session.resize(fb.size());
                    term.invalidate();
                    if session.redraw(&mut fb).is_some() {
                        term.present(&fb)?;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("terminal event stream failed"),
                None => return Ok(Exit::InputEnded),
            },
        }

        if session.is_closed() {
            return Ok(Exit::Closed);
        }
    }
}
