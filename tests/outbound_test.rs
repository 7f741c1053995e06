use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use tui_skirmish::input::KeyMap;
use tui_skirmish::net::channel::write_outbound;
use tui_skirmish::net::{outbound_queue, Channel, Message, Session};
use tui_skirmish::term::{DrawList, SceneView, Surface};

#[test]
fn session_actions_reach_the_socket_in_order() {
    let surface = DrawList::new(100.0, 100.0);
    let (queue, rx) = outbound_queue();
    let mut session = Session::new(queue, SceneView::default(), KeyMap::default(), surface.size());

    session
        .on_key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE))
        .unwrap();
    session
        .on_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE))
        .unwrap();
    session
        .on_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))
        .unwrap();

    let mut sink: Vec<Message> = Vec::new();
    tokio_test::block_on(write_outbound(&mut sink, rx));

    assert_eq!(
        sink,
        vec![
            Message::Text(r#"{"MoveShip":{"angle":0.1}}"#.to_string()),
            Message::Text(r#"{"AddBullet":{"angle":1.5707963267948966}}"#.to_string()),
            Message::Close(None),
        ]
    );
}

#[test]
fn queue_refuses_once_the_writer_is_gone() {
    let (mut queue, rx) = outbound_queue();
    drop(rx);
    assert!(queue.send("x".to_string()).is_err());
}
