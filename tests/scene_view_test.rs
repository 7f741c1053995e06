use tui_skirmish::core::ClientState;
use tui_skirmish::net::decode_snapshot;
use tui_skirmish::term::{DrawList, FrameBuffer, Palette, Rgb, SceneView, Surface};

fn render(view: &SceneView, frame: &str, fb: &mut FrameBuffer) -> ClientState {
    let (w, h) = fb.size();
    let mut state = ClientState::new(w, h);
    state.scene.replace(decode_snapshot(frame).unwrap());
    view.render_state(&mut state, fb);
    state
}

#[test]
fn local_ship_is_a_green_block_two_columns_wide() {
    // 40x20 terminal => 20x20 pixels => one pixel per grid cell.
    let mut fb = FrameBuffer::new(40, 20);
    render(
        &SceneView::default(),
        r#"["1",{"1":{"x":2,"y":3},"2":{"x":6,"y":3}},{},{},[]]"#,
        &mut fb,
    );

    for col in [4, 5] {
        let cell = fb.get(col, 3).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, Rgb::GREEN);
    }
    assert_eq!(fb.get(12, 3).unwrap().style.fg, Rgb::BLUE);
    assert_eq!(fb.get(6, 3).unwrap().ch, ' ');
}

#[test]
fn bullet_is_visible_even_when_smaller_than_a_cell() {
    let mut fb = FrameBuffer::new(40, 20);
    render(
        &SceneView::default(),
        r#"["1",{},{"b":{"x":5,"y":5,"angle":1.0}},{},[]]"#,
        &mut fb,
    );
    assert_eq!(fb.get(10, 5).unwrap().style.fg, Rgb::RED);
    assert_eq!(fb.get(11, 5).unwrap().style.fg, Rgb::RED);
}

#[test]
fn overlay_is_right_aligned_one_row_per_attribute() {
    let mut fb = FrameBuffer::new(40, 20);
    render(
        &SceneView::default(),
        r#"["1",{"1":{"x":2,"y":3,"hp":10,"name":"ace"}},{},{},[]]"#,
        &mut fb,
    );
    assert!(fb.row_text(0).ends_with("x,2"));
    assert!(fb.row_text(1).ends_with("y,3"));
    assert!(fb.row_text(2).ends_with("hp,10"));
    assert!(fb.row_text(3).ends_with("name,ace"));
    assert_eq!(fb.row_text(4).trim(), "");
}

#[test]
fn line_height_spreads_overlay_rows() {
    let mut fb = FrameBuffer::new(40, 20);
    render(
        &SceneView::default().with_line_height(2.0),
        r#"["1",{"1":{"x":2,"y":3,"hp":10}},{},{},[]]"#,
        &mut fb,
    );
    assert!(fb.row_text(0).ends_with("x,2"));
    assert!(fb.row_text(2).ends_with("y,3"));
    assert!(fb.row_text(4).ends_with("hp,10"));
}

#[test]
fn damage_feed_panel_shows_latest_events_at_the_bottom() {
    let mut fb = FrameBuffer::new(40, 20);
    let frame = r#"["1",{},{},{},[["1","2",7],["2","1",3],"noise",["3","1",0]]]"#;

    render(&SceneView::default(), frame, &mut fb);
    assert_eq!(fb.row_text(19).trim(), "");

    render(&SceneView::default().with_damage_feed(true), frame, &mut fb);
    assert!(fb.row_text(17).starts_with("1 > 2 7"));
    assert!(fb.row_text(18).starts_with("2 > 1 3"));
    assert!(fb.row_text(19).starts_with("3 > 1 0"));
}

#[test]
fn each_frame_replaces_the_previous_one() {
    let mut fb = FrameBuffer::new(40, 20);
    let view = SceneView::default();
    render(&view, r#"["1",{"1":{"x":2,"y":3}},{},{},[]]"#, &mut fb);
    render(&view, r#"["1",{"1":{"x":9,"y":9}},{},{},[]]"#, &mut fb);

    assert_eq!(fb.get(4, 3).unwrap().ch, ' ');
    assert_eq!(fb.get(18, 9).unwrap().ch, '█');
}

#[test]
fn recorded_frame_replays_to_the_same_pixels() {
    let frame = r#"["1",{"1":{"x":2,"y":3,"hp":4},"2":{"x":8,"y":1}},{"b":{"x":5,"y":5,"angle":0.3}},{},[]]"#;

    let mut direct = FrameBuffer::new(40, 20);
    let state = render(&SceneView::default(), frame, &mut direct);

    let mut list = DrawList::new(20.0, 20.0);
    let mut replay_state = ClientState::new(20.0, 20.0);
    replay_state.scene = state.scene.clone();
    SceneView::default().render_state(&mut replay_state, &mut list);

    let mut replayed = FrameBuffer::new(40, 20);
    list.replay(&mut replayed);
    assert_eq!(replayed, direct);
}

#[test]
fn custom_palette_colors_the_local_ship() {
    let palette = Palette {
        local_ship: Rgb::new(255, 200, 0),
        ..Palette::default()
    };
    let view = SceneView::new(palette);
    assert_eq!(view.palette().local_ship, Rgb::new(255, 200, 0));

    let mut fb = FrameBuffer::new(40, 20);
    let state = render(&view, r#"["1",{"1":{"x":2,"y":3}},{},[[0,0],[1,1]],[]]"#, &mut fb);
    assert_eq!(fb.get(4, 3).unwrap().style.fg, Rgb::new(255, 200, 0));

    // The map payload is carried through untouched.
    let map = state.scene.map().unwrap();
    assert_eq!(map.0[1][0], 1);
    assert_eq!(state.scene.ship_map().map(|m| m.len()), Some(1));
}
