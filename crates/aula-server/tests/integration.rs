//! End-to-end tests against a real listener on an ephemeral port.

use std::net::SocketAddr;
use std::sync::Arc;

use aula_auth::{Claims, TokenVerifier};
use aula_core::UserRole;
use aula_registry::{ConnectionRegistry, SystemClock};
use aula_server::{PresenceServer, ServerConfig};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};

const SECRET: &str = "integration-secret";

async fn boot_server() -> (
    SocketAddr,
    Arc<ConnectionRegistry>,
    PresenceServer,
    tokio::task::JoinHandle<()>,
) {
    let registry = Arc::new(ConnectionRegistry::new(Arc::new(SystemClock)));
    let verifier = Arc::new(TokenVerifier::new(SECRET));
    let server = PresenceServer::new(ServerConfig::default(), registry.clone(), verifier);
    let (addr, handle) = server.listen().await.expect("bind ephemeral port");
    (addr, registry, server, handle)
}

fn mint(sub: i64, role: UserRole) -> String {
    let claims = Claims {
        sub,
        name: format!("User {sub}"),
        email: format!("user{sub}@example.edu"),
        role,
        exp: chrono::Utc::now().timestamp() + 3600,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .expect("encode token")
}

#[tokio::test]
async fn full_presence_lifecycle() {
    let (addr, registry, server, handle) = boot_server().await;
    let client = reqwest::Client::new();
    let base = format!("http://{addr}");

    // Health before any traffic.
    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["connections"], 0);

    // Anonymous registration.
    let resp = client
        .post(format!("{base}/api/network/register"))
        .header("x-forwarded-for", "198.51.100.7")
        .json(&json!({"sessionId": "sess-anon", "networkInfo": {"downlink": 10}}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);

    let record = registry.get("sess-anon").expect("record present");
    assert_eq!(record.ip, "198.51.100.7");
    assert!(record.identity.is_none());

    // Identified registration over the same session replaces the snapshot.
    let token = mint(42, UserRole::Student);
    let resp = client
        .post(format!("{base}/api/network/register"))
        .bearer_auth(&token)
        .json(&json!({"sessionId": "sess-anon"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let record = registry.get("sess-anon").expect("record present");
    assert_eq!(record.identity.as_ref().map(|i| i.user_id), Some(42));
    // Full replace: the old networkInfo is gone.
    assert!(record.network_info.is_none());
    assert!(record.connected_at <= record.last_activity);

    // Missing sessionId is rejected with the exact message.
    let resp = client
        .post(format!("{base}/api/network/register"))
        .json(&json!({"networkInfo": {}}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "sessionId es requerido");

    // Admin listing.
    let admin = mint(1, UserRole::Admin);
    let resp = client
        .get(format!("{base}/api/admin/connections"))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["count"], 1);
    assert_eq!(body["connections"][0]["sessionId"], "sess-anon");

    // Clear requires admin.
    let student = mint(42, UserRole::Student);
    let resp = client
        .post(format!("{base}/api/admin/connections/clear"))
        .bearer_auth(&student)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
    assert_eq!(registry.count(), 1);

    let resp = client
        .post(format!("{base}/api/admin/connections/clear"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let resp = client
        .post(format!("{base}/api/admin/connections/clear"))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["deletedCount"], 1);
    assert_eq!(registry.count(), 0);

    assert!(server.shutdown().drain(handle, None).await);
}

#[tokio::test]
async fn drain_stops_serving() {
    let (addr, _registry, server, handle) = boot_server().await;
    let client = reqwest::Client::new();
    let base = format!("http://{addr}");

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    // Drain returns only once the serve task has exited, so the next
    // request must fail to connect.
    assert!(server.shutdown().drain(handle, None).await);

    let result = client.get(format!("{base}/health")).send().await;
    assert!(result.is_err());
}

#[tokio::test]
async fn register_survives_concurrent_clients() {
    let (addr, registry, server, handle) = boot_server().await;
    let base = format!("http://{addr}");

    let mut handles = Vec::new();
    for i in 0..16 {
        let base = base.clone();
        handles.push(tokio::spawn(async move {
            let client = reqwest::Client::new();
            let resp = client
                .post(format!("{base}/api/network/register"))
                .json(&json!({"sessionId": format!("sess-{i}")}))
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), 200);
        }));
    }
    for client_task in handles {
        client_task.await.unwrap();
    }

    assert_eq!(registry.count(), 16);
    assert!(server.shutdown().drain(handle, None).await);
}
