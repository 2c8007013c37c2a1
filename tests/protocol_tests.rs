use battleship_server::{
    level_from, ClientMessage, Coord, Inbound, Layout, Orientation, ProtocolError, ServerMessage,
    Ship, ShipView, Shot, SunkShip,
};
use log::LevelFilter;

#[test]
fn test_server_messages_use_wire_names() {
    let turn = ServerMessage::Turn { your_turn: true }.encode().unwrap();
    assert_eq!(turn, r#"{"type":"turn","yourTurn":true}"#);

    let result = ServerMessage::ShotResult { row: 2, col: 5, hit: false }
        .encode()
        .unwrap();
    assert_eq!(result, r#"{"type":"result","row":2,"col":5,"hit":false}"#);

    let start = ServerMessage::Start { turn: false }.encode().unwrap();
    assert_eq!(start, r#"{"type":"start","turn":false}"#);

    let error = ServerMessage::error("gone").encode().unwrap();
    assert_eq!(error, r#"{"type":"error","message":"gone"}"#);
}

#[test]
fn test_sunk_dead_zone_only_for_shooter() {
    let ship = SunkShip {
        cells: vec![Coord::new(0, 0)],
        dead_zone: vec![Coord::new(0, 1), Coord::new(1, 0), Coord::new(1, 1)],
    };
    let shooter = ServerMessage::sunk(&ship, true).encode().unwrap();
    assert_eq!(
        shooter,
        r#"{"type":"sunk","cells":[0],"deadZone":[{"row":0,"col":1},{"row":1,"col":0},{"row":1,"col":1}]}"#
    );
    let owner = ServerMessage::sunk(&ship, false).encode().unwrap();
    assert_eq!(owner, r#"{"type":"sunk","cells":[0]}"#);
    assert_eq!(
        ServerMessage::decode(&owner).unwrap(),
        ServerMessage::Sunk { cells: vec![0], dead_zone: None }
    );
}

#[test]
fn test_player_message_lists_flat_cells() {
    let layout = Layout::from_ships([
        Ship::new(3, Orientation::Vertical, Coord::new(2, 4)).unwrap(),
    ])
    .unwrap();
    let ships: Vec<ShipView> = layout.fleet().ships().iter().map(ShipView::from).collect();
    let json = ServerMessage::Player { id: 1, ships }.encode().unwrap();
    assert_eq!(
        json,
        r#"{"type":"player","id":1,"ships":[{"size":3,"cells":[24,34,44],"sunk":false}]}"#
    );
}

#[test]
fn test_decode_shot() {
    let msg = ClientMessage::decode(r#"{"type":"shot","player":1,"row":3,"col":9}"#).unwrap();
    assert_eq!(msg, ClientMessage::Shot(Shot { player: 1, row: 3, col: 9 }));

    let padded = ClientMessage::decode("  {\"col\":0,\"row\":0,\"type\":\"shot\",\"player\":0}\r\n");
    assert!(padded.is_ok());
}

#[test]
fn test_malformed_frames() {
    for frame in [
        "",
        "not json",
        r#"{"type":"launch","player":0}"#,
        r#"{"type":"shot","player":0,"row":-1,"col":2}"#,
        r#"{"type":"shot","player":0,"row":1}"#,
        r#"{"player":0,"row":1,"col":1}"#,
    ] {
        match Inbound::from_frame(frame) {
            Inbound::Malformed(ProtocolError::Malformed(_)) => {}
            other => panic!("{:?} decoded as {:?}", frame, other),
        }
    }
}

#[test]
fn test_log_level_parsing() {
    assert_eq!(level_from(Some("debug")), LevelFilter::Debug);
    assert_eq!(level_from(Some("WARN")), LevelFilter::Warn);
    assert_eq!(level_from(Some("loud")), LevelFilter::Info);
    assert_eq!(level_from(None), LevelFilter::Info);
}
