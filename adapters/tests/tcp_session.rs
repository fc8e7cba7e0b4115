use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

use adapters::{CoordinatorHandle, bind, router, serve, spawn_coordinator};
use domain::SessionConfig;

const WAIT: Duration = Duration::from_secs(5);

async fn start_server() -> (SocketAddr, CoordinatorHandle) {
    let (events, _task) = spawn_coordinator(SessionConfig::default());
    let listener = bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve(listener, events.clone(), 1024));
    (addr, events)
}

struct Client {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl Client {
    async fn connect(
        addr: SocketAddr,
        name: &str,
    ) -> Self {
        let stream = timeout(WAIT, TcpStream::connect(addr)).await.unwrap().unwrap();
        let (read_half, writer) = stream.into_split();
        let mut client = Self {
            reader: BufReader::new(read_half),
            writer,
        };
        client.send(name).await;
        client.expect("Commands:").await;
        client
    }

    async fn send(
        &mut self,
        line: &str,
    ) {
        self.writer.write_all(format!("{line}\n").as_bytes()).await.unwrap();
    }

    /// Reads lines until one contains `needle`, returning that line.
    async fn expect(
        &mut self,
        needle: &str,
    ) -> String {
        let read = async {
            loop {
                let mut line = String::new();
                let n = self.reader.read_line(&mut line).await.unwrap();
                assert!(n > 0, "connection closed while waiting for {needle:?}");
                if line.contains(needle) {
                    return line;
                }
            }
        };
        timeout(WAIT, read)
            .await
            .unwrap_or_else(|_| panic!("timed out waiting for {needle:?}"))
    }

    async fn expect_closed(&mut self) {
        let mut rest = String::new();
        timeout(WAIT, self.reader.read_to_string(&mut rest))
            .await
            .expect("connection was not closed")
            .unwrap();
    }
}

async fn matched_pair(addr: SocketAddr) -> (Client, Client) {
    let mut alice = Client::connect(addr, "alice").await;
    let mut bob = Client::connect(addr, "bob").await;

    alice.send("join").await;
    alice.expect("Joined matchmaking queue").await;
    bob.send("join").await;

    assert!(alice.expect("Playing against:").await.contains("bob"));
    assert!(bob.expect("Playing against:").await.contains("alice"));
    (alice, bob)
}

#[tokio::test]
async fn test_best_of_three_over_tcp() {
    let (addr, _events) = start_server().await;
    let (mut alice, mut bob) = matched_pair(addr).await;

    alice.send("rock").await;
    alice.expect("Choice locked in!").await;
    bob.send("SCISSORS").await;
    for client in [&mut alice, &mut bob] {
        client.expect("alice WINS this round!").await;
        client.expect("Score: alice 1 - 0 bob").await;
        client.expect("Type 'ready' for next round!").await;
    }

    alice.send("ready").await;
    alice.expect("Ready! Waiting for opponent...").await;
    bob.send("ready").await;
    for client in [&mut alice, &mut bob] {
        client.expect("--- NEW ROUND ---").await;
    }

    alice.send("paper").await;
    bob.send("rock").await;
    for client in [&mut alice, &mut bob] {
        client.expect("Score: alice 2 - 0 bob").await;
        client.expect("alice WINS THE MATCH!").await;
    }

    // back in the lobby, so `ready` is refused
    bob.send("ready").await;
    bob.expect("You're not in a game!").await;
}

#[tokio::test]
async fn test_dropped_connection_forfeits() {
    let (addr, _events) = start_server().await;
    let (mut alice, bob) = matched_pair(addr).await;

    drop(bob);

    alice.expect("--- OPPONENT DISCONNECTED ---").await;
    assert!(alice.expect("Your opponent, bob,").await.contains("win by forfeit"));

    alice.send("join").await;
    alice.expect("Joined matchmaking queue").await;
}

#[tokio::test]
async fn test_quit_closes_connection() {
    let (addr, _events) = start_server().await;
    let mut alice = Client::connect(addr, "alice").await;

    alice.send("quit").await;

    alice.expect("Goodbye!").await;
    alice.expect_closed().await;
}

#[tokio::test]
async fn test_unknown_command_keeps_connection_open() {
    let (addr, _events) = start_server().await;
    let mut alice = Client::connect(addr, "alice").await;

    alice.send("dance").await;
    alice.expect("Unknown command.").await;
    alice.send("join").await;
    alice.expect("Joined matchmaking queue").await;
}

#[tokio::test]
async fn test_status_endpoint_reports_counts() {
    let (addr, events) = start_server().await;
    let status_listener = bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let status_addr = status_listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(status_listener, router(events)).await });

    let mut alice = Client::connect(addr, "alice").await;
    let _bob = Client::connect(addr, "bob").await;
    alice.send("join").await;
    alice.expect("Joined matchmaking queue").await;

    let mut stream = TcpStream::connect(status_addr).await.unwrap();
    stream
        .write_all(b"GET /status HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut response = String::new();
    timeout(WAIT, stream.read_to_string(&mut response)).await.unwrap().unwrap();

    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    let (_, body) = response.split_once("\r\n\r\n").unwrap();
    let status: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(
        status,
        serde_json::json!({
            "players": 2,
            "named_players": 2,
            "queued": 1,
            "active_sessions": 0,
        })
    );
}
