//! Session: dispatches channel frames and input events into the client state.
//!
//! One method per event source. Each call runs to completion before the next
//! event is looked at, which is what keeps single-writer access to
//! [`ClientState`] without locks.

use crossterm::event::KeyEvent;
use tracing::{debug, info};

use crate::channel::{Channel, ChannelError};
use crate::core::ClientState;
use crate::input::{pointer_action, KeyCommand, KeyMap, PointerEvent};
use crate::protocol::{decode_snapshot, encode_action, DecodeError};
use crate::term::{FrameSummary, SceneView, Surface};
use crate::types::Action;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to encode action: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Channel(#[from] ChannelError),
}

pub struct Session<C: Channel> {
    state: ClientState,
    view: SceneView,
    keys: KeyMap,
    channel: C,
    closed: bool,
}

impl<C: Channel> Session<C> {
    /// `surface_size` is the drawing surface size in pixels.
    pub fn new(channel: C, view: SceneView, keys: KeyMap, surface_size: (f64, f64)) -> Self {
        Self {
            state: ClientState::new(surface_size.0, surface_size.1),
            view,
            keys,
            channel,
            closed: false,
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn resize(&mut self, surface_size: (f64, f64)) {
        self.state.resize(surface_size.0, surface_size.1);
    }

    /// Decode one inbound frame, replace the scene and redraw.
    ///
    /// A frame that fails to decode leaves the scene and the surface as
    /// they were. Returns `Ok(None)` once the session is closed.
    pub fn on_message<S: Surface + ?Sized>(
        &mut self,
        text: &str,
        surface: &mut S,
    ) -> Result<Option<FrameSummary>, DecodeError> {
        if self.closed {
            return Ok(None);
        }
        let snapshot = decode_snapshot(text)?;
        self.state.scene.replace(snapshot);
        let summary = self.view.render_state(&mut self.state, surface);
        debug!(
            ships = summary.ships,
            bullets = summary.bullets,
            local = summary.overlay_lines > 0,
            "rendered snapshot"
        );
        Ok(Some(summary))
    }

    /// Redraw the current scene (after a resize).
    pub fn redraw<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Option<FrameSummary> {
        if self.closed || self.state.scene.is_empty() {
            return None;
        }
        Some(self.view.render_state(&mut self.state, surface))
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Result<Option<KeyCommand>, SessionError> {
        if self.closed {
            return Ok(None);
        }
        let Some(command) = self.keys.lookup(key) else {
            return Ok(None);
        };
        match command {
            KeyCommand::Send(action) => self.send_action(action)?,
            KeyCommand::Close => self.close()?,
        }
        Ok(Some(command))
    }

    pub fn on_pointer(&mut self, event: PointerEvent) -> Result<Option<Action>, SessionError> {
        if self.closed {
            return Ok(None);
        }
        let Some(action) = pointer_action(event, &mut self.state) else {
            return Ok(None);
        };
        debug!(
            button = ?event.button,
            from_ship = self.state.ship_anchor.is_rendered(),
            "pointer aimed"
        );
        self.send_action(action)?;
        Ok(Some(action))
    }

    pub fn send_action(&mut self, action: Action) -> Result<(), SessionError> {
        if self.closed {
            return Err(ChannelError::Closed.into());
        }
        let text = encode_action(&action)?;
        debug!(action = action.name(), angle = action.angle(), "sending action");
        self.channel.send(text)?;
        Ok(())
    }

    /// Close the channel. Later calls are no-ops.
    pub fn close(&mut self) -> Result<(), SessionError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        info!("closing connection");
        self.channel.close()?;
        Ok(())
    }
}
