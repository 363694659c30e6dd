//! Integration tests for the session lifecycle.
//!
//! Uses wiremock for the auth endpoints and tempfile-backed storage to check
//! that the persisted identity survives a restart and that logout really
//! destroys it.

use std::path::PathBuf;

use secrecy::SecretString;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use marketplace_client::{ClientConfig, ClientError, Storefront};
use marketplace_core::Email;

fn config(server: &MockServer, session_file: PathBuf) -> ClientConfig {
    ClientConfig::new(&server.uri())
        .expect("valid mock url")
        .with_session_file(session_file)
}

fn credentials() -> (Email, SecretString) {
    (
        Email::parse("mike@example.com").expect("valid email"),
        SecretString::from("hunter2"),
    )
}

async fn mount_login_success(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 5, "username": "mike", "email": "mike@example.com"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_persists_session_across_restart() {
    let server = MockServer::start().await;
    mount_login_success(&server).await;

    let dir = tempfile::tempdir().expect("tempdir");
    let session_file = dir.path().join("session.json");

    let (email, password) = credentials();
    let mut storefront =
        Storefront::new(config(&server, session_file.clone())).expect("storefront");
    let session = storefront.login(&email, &password).await.expect("login");
    assert_eq!(session.username, "mike");
    assert!(storefront.session().is_authenticated());

    // A fresh process hydrates the same identity from storage
    let restarted = Storefront::new(config(&server, session_file)).expect("storefront");
    assert_eq!(
        restarted.session().current().map(|s| s.user_id),
        Some(session.user_id)
    );
}

#[tokio::test]
async fn rejected_login_surfaces_message_and_stays_anonymous() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid email or password"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let (email, password) = credentials();
    let mut storefront =
        Storefront::new(config(&server, dir.path().join("session.json"))).expect("storefront");

    let err = storefront.login(&email, &password).await.unwrap_err();
    assert!(matches!(&err, ClientError::Auth(m) if m == "Invalid email or password"));
    assert!(!storefront.session().is_authenticated());
}

#[tokio::test]
async fn register_signs_in_and_persists() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 6, "username": "newbie", "email": "new@example.com"
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let email = Email::parse("new@example.com").expect("valid email");
    let password = SecretString::from("hunter2");
    let mut storefront =
        Storefront::new(config(&server, dir.path().join("session.json"))).expect("storefront");

    let session = storefront
        .register("newbie", &email, &password)
        .await
        .expect("register");
    assert_eq!(session.username, "newbie");
    assert!(storefront.session().is_authenticated());
}

#[tokio::test]
async fn register_rejection_for_taken_email() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Email already exists!"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let (email, password) = credentials();
    let mut storefront =
        Storefront::new(config(&server, dir.path().join("session.json"))).expect("storefront");

    let err = storefront
        .register("mike", &email, &password)
        .await
        .unwrap_err();
    assert!(matches!(&err, ClientError::Auth(m) if m == "Email already exists!"));
}

#[tokio::test]
async fn logout_destroys_persisted_identity() {
    let server = MockServer::start().await;
    mount_login_success(&server).await;

    let dir = tempfile::tempdir().expect("tempdir");
    let session_file = dir.path().join("session.json");

    let (email, password) = credentials();
    let mut storefront =
        Storefront::new(config(&server, session_file.clone())).expect("storefront");
    storefront.login(&email, &password).await.expect("login");

    storefront.logout();
    assert!(!storefront.session().is_authenticated());

    // Reload must not yield the prior identity
    let restarted = Storefront::new(config(&server, session_file)).expect("storefront");
    assert!(!restarted.session().is_authenticated());
}

#[tokio::test]
async fn malformed_stored_session_hydrates_anonymous() {
    let server = MockServer::start().await;

    let dir = tempfile::tempdir().expect("tempdir");
    let session_file = dir.path().join("session.json");
    std::fs::write(&session_file, "{ definitely not a session").expect("write");

    let storefront = Storefront::new(config(&server, session_file)).expect("storefront");
    assert!(!storefront.session().is_authenticated());
}
