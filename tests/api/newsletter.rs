use std::sync::Arc;

use reqwest::StatusCode;

use serde_json::json;

use sqlx::PgPool;

use photobooth::settings::AllowedOrigins;
use photobooth::store::{Collection, PgStore};

use crate::helpers::{failed_fields, json_body, TestApp};

#[tokio::test]
async fn subscribe_returns_stored_subscription() {
    let (app, store) = TestApp::spawn().await;

    let res = app
        .newsletter_subscribe("a@b.com")
        .await
        .expect("Failed to execute request");
    let body = json_body(res, StatusCode::OK).await;

    assert_eq!(json!("a@b.com"), body["email"]);
    assert!(body["id"].is_string());
    assert!(body["timestamp"].is_string());
    assert_eq!(1, store.count(Collection::Newsletter).await);
}

#[tokio::test]
async fn subscribing_twice_is_a_conflict() {
    let (app, store) = TestApp::spawn().await;

    let res = app.newsletter_subscribe("a@b.com").await.unwrap();
    assert_eq!(StatusCode::OK, res.status());

    let res = app.newsletter_subscribe("a@b.com").await.unwrap();
    let body = json_body(res, StatusCode::BAD_REQUEST).await;

    assert_eq!(json!({ "detail": "Email already subscribed" }), body);
    assert_eq!(1, store.count(Collection::Newsletter).await);
}

#[tokio::test]
async fn different_emails_can_subscribe() {
    let (app, store) = TestApp::spawn().await;

    for email in ["a@b.com", "c@d.com"] {
        let res = app.newsletter_subscribe(email).await.unwrap();
        assert_eq!(StatusCode::OK, res.status());
    }

    assert_eq!(2, store.count(Collection::Newsletter).await);
}

#[tokio::test]
async fn subscribe_rejects_malformed_email() {
    let (app, store) = TestApp::spawn().await;

    let res = app.newsletter_subscribe("not-an-email").await.unwrap();
    let body = json_body(res, StatusCode::UNPROCESSABLE_ENTITY).await;

    assert_eq!(vec!["email"], failed_fields(&body));
    assert_eq!(0, store.count(Collection::Newsletter).await);
}

#[tokio::test]
async fn subscribe_rejects_missing_email() {
    let (app, _) = TestApp::spawn().await;

    let res = app
        .request(reqwest::Method::POST, "newsletter")
        .json(&json!({ "name": "no email" }))
        .send()
        .await
        .unwrap();
    let body = json_body(res, StatusCode::UNPROCESSABLE_ENTITY).await;

    assert_eq!(vec!["email"], failed_fields(&body));
}

#[tokio::test]
async fn subscribe_rejects_non_object_bodies() {
    let (app, store) = TestApp::spawn().await;

    for body in [json!(["a@b.com"]), json!("a@b.com"), json!(null)] {
        let res = app
            .request(reqwest::Method::POST, "newsletter")
            .json(&body)
            .send()
            .await
            .unwrap();

        assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, res.status(), "{}", body);
    }

    assert_eq!(0, store.count(Collection::Newsletter).await);
}

#[sqlx::test]
async fn subscribing_twice_is_a_conflict_on_postgres(pool: PgPool) -> sqlx::Result<()> {
    let store = Arc::new(PgStore::new(pool.clone()));
    let app = TestApp::spawn_with(store, AllowedOrigins::Any).await;

    let res = app.newsletter_subscribe("a@b.com").await.unwrap();
    assert_eq!(StatusCode::OK, res.status());

    let res = app.newsletter_subscribe("a@b.com").await.unwrap();
    assert_eq!(StatusCode::BAD_REQUEST, res.status());

    let (count,): (i64,) =
        sqlx::query_as("select count(*) from documents where collection='newsletter'")
            .fetch_one(&pool)
            .await?;
    assert_eq!(1, count);

    Ok(())
}
