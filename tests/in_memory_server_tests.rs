use std::time::Duration;

use battleship_server::{
    spawn_coordinator, ClientMessage, CoordinatorHandle, InMemoryClient, InMemoryTransport,
    ServerMessage, Session, ShipView, Shot,
};
use rand::{rngs::SmallRng, SeedableRng};
use tokio::time::timeout;

async fn next(client: &mut InMemoryClient) -> Option<ServerMessage> {
    timeout(Duration::from_secs(5), client.recv())
        .await
        .expect("timed out waiting for server")
        .expect("undecodable server message")
}

async fn connect(handle: &CoordinatorHandle) -> InMemoryClient {
    let (transport, client) = InMemoryTransport::pair();
    let handle = handle.clone();
    tokio::spawn(async move {
        let _ = handle.attach(transport).await;
    });
    client
}

/// Connect a client and wait for its identity so seats are assigned in order.
async fn join(handle: &CoordinatorHandle) -> (InMemoryClient, u8, Vec<ShipView>) {
    let mut client = connect(handle).await;
    match next(&mut client).await {
        Some(ServerMessage::Player { id, ships }) => (client, id, ships),
        other => panic!("expected player message, got {:?}", other),
    }
}

fn fire(client: &InMemoryClient, player: u8, index: u8) {
    client
        .send(&ClientMessage::Shot(Shot {
            player,
            row: index / 10,
            col: index % 10,
        }))
        .unwrap();
}

fn free_cell(ships: &[ShipView]) -> u8 {
    (0..100)
        .find(|i| ships.iter().all(|s| !s.cells.contains(i)))
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_full_exchange() -> anyhow::Result<()> {
    let (handle, _task) = spawn_coordinator(Session::new(), SmallRng::seed_from_u64(21));

    let (mut c0, id0, _ships0) = join(&handle).await;
    let (mut c1, id1, ships1) = join(&handle).await;
    assert_eq!((id0, id1), (0, 1));
    assert_eq!(next(&mut c0).await, Some(ServerMessage::Start { turn: true }));
    assert_eq!(next(&mut c1).await, Some(ServerMessage::Start { turn: false }));

    // Hit the first cell of the four-cell ship: shooter keeps the turn.
    let long = ships1.iter().find(|s| s.size == 4).unwrap();
    let idx = long.cells[0];
    let (row, col) = (idx / 10, idx % 10);
    fire(&c0, 0, idx);
    assert_eq!(next(&mut c1).await, Some(ServerMessage::Hit { row, col }));
    assert_eq!(
        next(&mut c0).await,
        Some(ServerMessage::ShotResult { row, col, hit: true })
    );
    assert_eq!(next(&mut c0).await, Some(ServerMessage::Turn { your_turn: true }));
    assert_eq!(next(&mut c1).await, Some(ServerMessage::Turn { your_turn: false }));

    // Sink a single-cell ship.
    let small = ships1.iter().find(|s| s.size == 1).unwrap();
    let idx = small.cells[0];
    fire(&c0, 0, idx);
    assert!(matches!(next(&mut c0).await, Some(ServerMessage::ShotResult { hit: true, .. })));
    match next(&mut c0).await {
        Some(ServerMessage::Sunk { cells, dead_zone: Some(zone) }) => {
            assert_eq!(cells, vec![idx]);
            assert!(!zone.is_empty() && zone.len() <= 8);
        }
        other => panic!("expected sunk with dead zone, got {:?}", other),
    }
    assert_eq!(next(&mut c0).await, Some(ServerMessage::Turn { your_turn: true }));
    assert!(matches!(next(&mut c1).await, Some(ServerMessage::Hit { .. })));
    assert_eq!(
        next(&mut c1).await,
        Some(ServerMessage::Sunk { cells: vec![idx], dead_zone: None })
    );
    assert_eq!(next(&mut c1).await, Some(ServerMessage::Turn { your_turn: false }));

    // Miss: the turn moves to player 1.
    let water = free_cell(&ships1);
    fire(&c0, 0, water);
    assert!(matches!(next(&mut c1).await, Some(ServerMessage::Miss { .. })));
    assert!(matches!(next(&mut c0).await, Some(ServerMessage::ShotResult { hit: false, .. })));
    assert_eq!(next(&mut c0).await, Some(ServerMessage::Turn { your_turn: false }));
    assert_eq!(next(&mut c1).await, Some(ServerMessage::Turn { your_turn: true }));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ignored_input_produces_no_messages() -> anyhow::Result<()> {
    let (handle, _task) = spawn_coordinator(Session::new(), SmallRng::seed_from_u64(22));
    let (mut c0, _, ships0) = join(&handle).await;
    let (mut c1, _, ships1) = join(&handle).await;
    next(&mut c0).await;
    next(&mut c1).await;

    // Garbage, an out-of-turn shot and an impersonation attempt.
    c1.send_raw("hello there")?;
    c1.send_raw(r#"{"type":"shot","player":1,"row":-4,"col":0}"#)?;
    fire(&c1, 1, free_cell(&ships0));
    fire(&c1, 0, free_cell(&ships1));

    // The next thing either side hears is the outcome of player 0's shot.
    // A hit keeps the turn with player 0 however the frames interleave.
    let target = ships1.iter().find(|s| s.size == 3).unwrap().cells[1];
    fire(&c0, 0, target);
    assert!(matches!(next(&mut c1).await, Some(ServerMessage::Hit { .. })));
    assert!(matches!(next(&mut c0).await, Some(ServerMessage::ShotResult { hit: true, .. })));
    assert_eq!(next(&mut c0).await, Some(ServerMessage::Turn { your_turn: true }));
    assert_eq!(next(&mut c1).await, Some(ServerMessage::Turn { your_turn: false }));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_third_connection_refused_and_closed() -> anyhow::Result<()> {
    let (handle, _task) = spawn_coordinator(Session::new(), SmallRng::seed_from_u64(23));
    let (_c0, _, _) = join(&handle).await;
    let (_c1, _, _) = join(&handle).await;

    let mut c2 = connect(&handle).await;
    assert!(matches!(next(&mut c2).await, Some(ServerMessage::Error { .. })));
    assert_eq!(next(&mut c2).await, None);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_disconnect_resets_session() -> anyhow::Result<()> {
    let (handle, _task) = spawn_coordinator(Session::new(), SmallRng::seed_from_u64(24));
    let (mut c0, _, _) = join(&handle).await;
    let (mut c1, _, _) = join(&handle).await;
    next(&mut c0).await;
    next(&mut c1).await;

    c1.close();
    assert!(matches!(next(&mut c0).await, Some(ServerMessage::Error { .. })));
    // The orphaned player is released.
    assert_eq!(next(&mut c0).await, None);

    let (mut c2, id, ships) = join(&handle).await;
    assert_eq!(id, 0);
    assert_eq!(ships.len(), 10);
    let (mut c3, id, _) = join(&handle).await;
    assert_eq!(id, 1);
    assert_eq!(next(&mut c2).await, Some(ServerMessage::Start { turn: true }));
    assert_eq!(next(&mut c3).await, Some(ServerMessage::Start { turn: false }));
    Ok(())
}
