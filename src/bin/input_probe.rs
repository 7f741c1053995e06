//! Offline input probe.
//!
//! Shows a single local ship in the middle of the grid and prints, on the
//! bottom row, the frame each key or click would send to the server.
//! No connection is made. Esc or Ctrl+C quits.

use anyhow::Result;
use crossterm::event::{self, Event};

use tui_skirmish::input::{pointer_event, KeyMap};
use tui_skirmish::net::{encode_snapshot, MemoryChannel, Session};
use tui_skirmish::term::{FrameBuffer, Rgb, SceneView, Surface, TerminalRenderer, TextAlign};
use tui_skirmish::types::{Identity, Ship, Snapshot, GRID_EXTENT};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn probe_snapshot() -> Snapshot {
    let me = Identity::from("probe");
    let center = GRID_EXTENT / 2.0;
    let mut snapshot = Snapshot {
        identity: me.clone(),
        ..Snapshot::default()
    };
    snapshot
        .ships
        .insert(me, Ship::at(center, center).with_attribute("mode", "probe"));
    snapshot
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(w, h);
    let mut session = Session::new(
        MemoryChannel::default(),
        SceneView::default(),
        KeyMap::default(),
        fb.size(),
    );

    // Feed the probe scene through the normal decode path.
    let frame = encode_snapshot(&probe_snapshot())?;
    session.on_message(&frame, &mut fb)?;
    let mut status = String::from("press a key or click (Esc quits)");

    loop {
        draw_status(&mut fb, &status);
        term.present(&fb)?;

        let before = session.channel().sent.len();
        match event::read()? {
            Event::Key(key) => {
                session.on_key(key)?;
            }
            Event::Mouse(mouse) => {
                if let Some(pointer) = pointer_event(&mouse) {
                    session.on_pointer(pointer)?;
                }
            }
            Event::Resize(w, h) => {
                fb.resize(w, h);
                session.resize(fb.size());
                term.invalidate();
            }
            _ => {}
        }

        if session.is_closed() {
            return Ok(());
        }
        if let Some(sent) = session.channel().sent.get(before..).and_then(|s| s.last()) {
            status = sent.clone();
        }
        session.redraw(&mut fb);
    }
}

fn draw_status(fb: &mut FrameBuffer, status: &str) {
    let (_, height) = fb.size();
    if height < 1.0 {
        return;
    }
    fb.fill_text(0.0, height - 1.0, status, TextAlign::Start, Rgb::WHITE);
}
