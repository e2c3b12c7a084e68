//! Integration tests for the WebSocket push endpoint over a real listener.

mod helpers;

use std::net::SocketAddr;
use std::time::Duration;

use futures::StreamExt;
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use skillswap_core::types::UserId;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Serve the test app on an ephemeral port.
async fn serve(app: &helpers::TestApp) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let router = app.router.clone();
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    addr
}

async fn open(addr: SocketAddr, token: &str) -> Result<Socket, WsError> {
    connect_async(format!("ws://{addr}/ws?token={token}"))
        .await
        .map(|(socket, _)| socket)
}

/// Status code of a refused upgrade.
async fn refused_status(addr: SocketAddr, query: &str) -> u16 {
    match connect_async(format!("ws://{addr}/ws{query}")).await {
        Err(WsError::Http(response)) => response.status().as_u16(),
        Err(other) => panic!("unexpected handshake error: {other}"),
        Ok(_) => panic!("upgrade unexpectedly accepted"),
    }
}

async fn wait_until(mut check: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while !check() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

/// Next text frame parsed as JSON.
async fn next_json(socket: &mut Socket) -> Value {
    let message = tokio::time::timeout(Duration::from_secs(2), socket.next())
        .await
        .expect("frame in time")
        .expect("socket open")
        .expect("valid frame");
    match message {
        Message::Text(text) => serde_json::from_str(text.as_str()).expect("json frame"),
        other => panic!("expected text frame, got {other:?}"),
    }
}

/// Whether the server closes `socket` within the timeout.
async fn closed_by_server(socket: &mut Socket) -> bool {
    let next = tokio::time::timeout(Duration::from_secs(2), socket.next()).await;
    matches!(next, Ok(None) | Ok(Some(Ok(Message::Close(_)))) | Ok(Some(Err(_))))
}

#[tokio::test]
async fn test_upgrade_requires_valid_token() {
    let app = helpers::TestApp::new();
    let addr = serve(&app).await;

    assert_eq!(refused_status(addr, "").await, 401);
    assert_eq!(refused_status(addr, "?token=not.a.jwt").await, 401);
}

#[tokio::test]
async fn test_banned_account_cannot_connect_and_is_dropped() {
    let app = helpers::TestApp::new();
    let addr = serve(&app).await;
    let root = app.admin("Root").await;
    let bob = app.member("Bob").await;

    let mut socket = open(addr, &bob.token).await.expect("bob connects");
    wait_until(|| app.state.realtime.registry.is_online(UserId(bob.id))).await;

    app.request(
        "PUT",
        &format!("/api/v1/admin/users/{}/status", bob.id),
        Some(json!({ "is_active": false })),
        Some(&root.token),
    )
    .await;

    assert!(closed_by_server(&mut socket).await);
    assert_eq!(refused_status(addr, &format!("?token={}", bob.token)).await, 403);
}

#[tokio::test]
async fn test_swap_request_frame_reaches_socket() {
    let app = helpers::TestApp::new();
    let addr = serve(&app).await;
    let alice = app.member("Alice").await;
    let bob = app.member("Bob").await;

    let mut socket = open(addr, &bob.token).await.expect("bob connects");
    wait_until(|| app.state.realtime.registry.is_online(UserId(bob.id))).await;

    app.send_swap(&alice, &bob).await;

    let frame = next_json(&mut socket).await;
    assert_eq!(frame["type"], "notification");
    assert_eq!(frame["data"]["type"], "swap-request");
    assert_eq!(frame["data"]["message"], format!("new request from {}", alice.id));
    assert!(frame["data"]["timestamp"].is_string());
}

#[tokio::test]
async fn test_new_socket_supersedes_old_one() {
    let app = helpers::TestApp::new();
    let addr = serve(&app).await;
    let alice = app.member("Alice").await;
    let bob = app.member("Bob").await;

    let mut first = open(addr, &bob.token).await.expect("first socket");
    wait_until(|| app.state.realtime.registry.is_online(UserId(bob.id))).await;

    let mut second = open(addr, &bob.token).await.expect("second socket");
    assert!(closed_by_server(&mut first).await);

    // The old socket's cleanup must leave the new registration in place.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(app.state.realtime.registry.is_online(UserId(bob.id)));
    assert_eq!(app.state.realtime.registry.connection_count(), 1);

    app.send_swap(&alice, &bob).await;
    let frame = next_json(&mut second).await;
    assert_eq!(frame["data"]["type"], "swap-request");
}

#[tokio::test]
async fn test_client_close_unregisters_connection() {
    let app = helpers::TestApp::new();
    let addr = serve(&app).await;
    let bob = app.member("Bob").await;

    let mut socket = open(addr, &bob.token).await.expect("bob connects");
    wait_until(|| app.state.realtime.registry.is_online(UserId(bob.id))).await;

    socket.close(None).await.expect("close handshake");

    wait_until(|| !app.state.realtime.registry.is_online(UserId(bob.id))).await;
    assert_eq!(app.state.realtime.registry.connection_count(), 0);
}
