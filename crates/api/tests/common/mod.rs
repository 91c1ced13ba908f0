//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixtures for running
//! integration tests against a real PostgreSQL database. Tests are skipped
//! (exit early) when `TEST_DATABASE_URL` is not set.

// Allow dead code in this module - these are helper utilities that may not
// be used by every integration test file.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use eventgate_api::app::create_app;
use eventgate_api::config::{
    Config, DatabaseConfig, LimitsConfig, LoggingConfig, SecurityConfig, ServerConfig,
};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use uuid::Uuid;

/// Create a test database pool, or `None` when `TEST_DATABASE_URL` is not
/// set (the caller should skip the test).
pub async fn try_create_test_pool() -> Option<PgPool> {
    let database_url = std::env::var("TEST_DATABASE_URL").ok()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    Some(pool)
}

/// Run migrations on the test database.
pub async fn run_migrations(pool: &PgPool) {
    sqlx::migrate!("../persistence/src/migrations")
        .run(pool)
        .await
        .expect("Failed to run migrations");
}

/// Test configuration; the database URL is unused because the pool is
/// created separately.
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 30,
            public_url: "https://gate.example.com".to_string(),
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 10,
            idle_timeout_secs: 600,
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            format: "json".to_string(),
        },
        security: SecurityConfig {
            cors_origins: vec![],
        },
        limits: LimitsConfig {
            max_payload_bytes: 4096,
            feed_capacity: 16,
        },
    }
}

/// Build the application router under test.
pub fn create_test_app(config: Config, pool: PgPool) -> Router {
    create_app(config, pool)
}

/// Insert an event row the way the (external) organizer subsystem would.
pub async fn seed_event(pool: &PgPool, name: &str) -> Uuid {
    let row: (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO events (organizer_id, name, venue, starts_at)
        VALUES ($1, $2, $3, NOW() + INTERVAL '1 day')
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind("Main Hall")
    .fetch_one(pool)
    .await
    .expect("Failed to seed event");

    row.0
}

/// A registration row seeded for a test.
pub struct SeededRegistration {
    pub id: Uuid,
    pub participant_id: Uuid,
    pub participant_name: String,
    pub participant_email: String,
    pub ticket_code: String,
}

/// Insert a registration row the way the (external) registration subsystem
/// would.
pub async fn seed_registration(pool: &PgPool, event_id: Uuid, status: &str) -> SeededRegistration {
    let participant_id = Uuid::new_v4();
    let participant_name: String = Name().fake();
    let participant_email: String = SafeEmail().fake();
    let ticket_code = domain::models::generate_ticket_code();

    let row: (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO registrations
            (event_id, participant_id, participant_name, participant_email,
             ticket_code, status, payment_status)
        VALUES ($1, $2, $3, $4, $5, $6, 'paid')
        RETURNING id
        "#,
    )
    .bind(event_id)
    .bind(participant_id)
    .bind(&participant_name)
    .bind(&participant_email)
    .bind(&ticket_code)
    .bind(status)
    .fetch_one(pool)
    .await
    .expect("Failed to seed registration");

    SeededRegistration {
        id: row.0,
        participant_id,
        participant_name,
        participant_email,
        ticket_code,
    }
}

/// Delete a seeded event; registrations and check-ins cascade.
pub async fn cleanup_event(pool: &PgPool, event_id: Uuid) {
    sqlx::query("DELETE FROM events WHERE id = $1")
        .bind(event_id)
        .execute(pool)
        .await
        .expect("Failed to clean up event");
}

/// Build a JSON request carrying the staff identity header.
pub fn json_request(
    method: Method,
    uri: &str,
    staff_id: Uuid,
    body: serde_json::Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("X-Staff-Id", staff_id.to_string())
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a bodyless request carrying the staff identity header.
pub fn request_with_staff(method: Method, uri: &str, staff_id: Uuid) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("X-Staff-Id", staff_id.to_string())
        .body(Body::empty())
        .unwrap()
}

/// Parse a response body as JSON.
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body is not valid JSON")
}
