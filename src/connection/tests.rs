use super::session::{Connection, ConnectionState};
use tokio::sync::mpsc;

#[test]
fn test_connection_new() {
    let (tx, _rx) = mpsc::unbounded_channel::<String>();
    let connection = Connection::new(tx);
    assert!(!connection.id.is_empty());
    assert!(connection.topic.is_none());
    assert_eq!(connection.state(), ConnectionState::Connected);
}

#[test]
fn test_connection_ids_are_unique() {
    let (tx, _rx) = mpsc::unbounded_channel::<String>();
    let a = Connection::new(tx.clone());
    let b = Connection::new(tx);
    assert_ne!(a.id, b.id);
}

#[test]
fn test_connection_state_follows_topic_and_channel() {
    let (tx, rx) = mpsc::unbounded_channel::<String>();
    let mut connection = Connection::new(tx);

    connection.topic = Some("FAC1".to_string());
    assert_eq!(connection.state(), ConnectionState::Subscribed);
    assert!(connection.is_subscribed_to("FAC1"));
    assert!(!connection.is_subscribed_to("FAC2"));

    drop(rx);
    assert!(!connection.is_open());
    assert_eq!(connection.state(), ConnectionState::Closed);
}

#[test]
fn test_send_to_closed_connection_fails() {
    let (tx, rx) = mpsc::unbounded_channel::<String>();
    let connection = Connection::new(tx);
    drop(rx);

    let err = connection.send("hello").unwrap_err();
    assert!(err.to_string().contains(&connection.id));
}

#[test]
fn test_send_delivers_text() {
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let connection = Connection::new(tx);

    connection.send("hello").unwrap();
    assert_eq!(rx.try_recv().unwrap(), "hello");
}
