use std::sync::Arc;

use chrono::{Duration, Utc};

use reqwest::StatusCode;

use serde_json::{json, Value};

use photobooth::domain::timestamp;
use photobooth::settings::AllowedOrigins;
use photobooth::store::Collection;

use crate::helpers::{failed_fields, json_body, NewBooking, TestApp, UnavailableStore};

#[tokio::test]
async fn create_returns_stored_booking_for_valid_request() {
    let (app, store) = TestApp::spawn().await;

    let new_booking = NewBooking {
        package_type: Some("Gold".into()),
        location: Some("Besant Nagar".into()),
        ..NewBooking::valid()
    };

    let before = Utc::now();
    let res = app
        .booking_create(&new_booking)
        .await
        .expect("Failed to execute request");
    let body = json_body(res, StatusCode::OK).await;

    assert_eq!(json!("Asha Raman"), body["name"]);
    assert_eq!(json!("asha@test.com"), body["email"]);
    assert_eq!(json!("+91 98400 12345"), body["phone"]);
    assert_eq!(json!("Wedding"), body["event_type"]);
    assert_eq!(json!("2026-12-12"), body["event_date"]);
    assert_eq!(json!("360 Video Booth"), body["booth_type"]);
    assert_eq!(json!("Gold"), body["package_type"]);
    assert_eq!(json!("Besant Nagar"), body["location"]);
    assert_eq!(Value::Null, body["message"]);

    assert!(!body["id"].as_str().unwrap().is_empty());
    let created = timestamp::parse(body["timestamp"].as_str().unwrap()).unwrap();
    assert!(created >= before - Duration::seconds(1));
    assert!(created <= Utc::now() + Duration::seconds(1));

    assert_eq!(1, store.count(Collection::Bookings).await);
}

#[tokio::test]
async fn list_returns_every_created_booking() {
    let (app, _) = TestApp::spawn().await;

    let mut created = Vec::new();
    for name in ["Asha", "Bala", "Chitra"] {
        let new_booking = NewBooking {
            name: Some(name.into()),
            ..NewBooking::valid()
        };
        let res = app.booking_create(&new_booking).await.unwrap();
        created.push(json_body(res, StatusCode::OK).await);
    }

    let res = app.booking_list().await.expect("Failed to execute request");
    let listed = json_body(res, StatusCode::OK).await;

    assert_eq!(Value::Array(created), listed);
}

#[tokio::test]
async fn list_is_empty_without_bookings() {
    let (app, _) = TestApp::spawn().await;

    let res = app.booking_list().await.expect("Failed to execute request");
    assert_eq!(json!([]), json_body(res, StatusCode::OK).await);
}

#[tokio::test]
async fn create_rejects_missing_or_malformed_fields() {
    let (app, store) = TestApp::spawn().await;

    let test_cases = vec![
        (
            "missing name",
            NewBooking {
                name: None,
                ..NewBooking::valid()
            },
            vec!["name"],
        ),
        (
            "missing booth type",
            NewBooking {
                booth_type: None,
                ..NewBooking::valid()
            },
            vec!["booth_type"],
        ),
        (
            "malformed email",
            NewBooking {
                email: Some("not-an-email".into()),
                ..NewBooking::valid()
            },
            vec!["email"],
        ),
        (
            "empty body",
            NewBooking::default(),
            vec!["name", "email", "phone", "event_type", "event_date", "booth_type"],
        ),
    ];

    for (desc, new_booking, fields) in test_cases {
        let res = app
            .booking_create(&new_booking)
            .await
            .expect("Failed to execute request");

        assert_eq!(
            StatusCode::UNPROCESSABLE_ENTITY,
            res.status(),
            "API did not fail when payload was {}",
            desc
        );
        let body: Value = res.json().await.unwrap();
        assert_eq!(fields, failed_fields(&body), "{}", desc);
    }

    assert_eq!(0, store.count(Collection::Bookings).await);
}

#[tokio::test]
async fn create_rejects_wrong_field_types() {
    let (app, store) = TestApp::spawn().await;

    let mut body = serde_json::to_value(NewBooking::valid()).unwrap();
    body["phone"] = json!(9840012345u64);

    let res = app.booking_create(&body).await.unwrap();
    let body = json_body(res, StatusCode::UNPROCESSABLE_ENTITY).await;

    assert_eq!(vec!["phone"], failed_fields(&body));
    assert_eq!(0, store.count(Collection::Bookings).await);
}

#[tokio::test]
async fn create_discards_unknown_fields() {
    let (app, _) = TestApp::spawn().await;

    let mut body = serde_json::to_value(NewBooking::valid()).unwrap();
    body["coupon"] = json!("FREEBOOTH");

    let res = app.booking_create(&body).await.unwrap();
    let created = json_body(res, StatusCode::OK).await;
    assert!(created.get("coupon").is_none());

    let res = app.booking_list().await.unwrap();
    let listed = json_body(res, StatusCode::OK).await;
    assert!(listed[0].get("coupon").is_none());
}

#[tokio::test]
async fn create_rejects_malformed_json() {
    let (app, store) = TestApp::spawn().await;

    let res = app
        .request(reqwest::Method::POST, "bookings")
        .header("Content-Type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, res.status());
    assert_eq!(0, store.count(Collection::Bookings).await);
}

#[tokio::test]
async fn validation_errors_report_location_and_message() {
    let (app, _) = TestApp::spawn().await;

    let mut body = serde_json::to_value(NewBooking {
        name: None,
        ..NewBooking::valid()
    })
    .unwrap();
    body["phone"] = json!(9840012345u64);

    let res = app.booking_create(&body).await.unwrap();
    let body = json_body(res, StatusCode::UNPROCESSABLE_ENTITY).await;

    assert_eq!(
        json!({
            "detail": [
                { "loc": ["body", "name"], "msg": "Field required" },
                { "loc": ["body", "phone"], "msg": "Input should be a valid string" }
            ]
        }),
        body
    );
}

#[tokio::test]
async fn list_fails_with_server_error_when_store_is_unavailable() {
    let app = TestApp::spawn_with(Arc::new(UnavailableStore), AllowedOrigins::Any).await;

    let res = app.booking_list().await.expect("Failed to execute request");
    let body = json_body(res, StatusCode::INTERNAL_SERVER_ERROR).await;

    assert_eq!(json!({ "detail": "Internal Server Error" }), body);
}

#[tokio::test]
async fn create_fails_with_server_error_when_store_is_unavailable() {
    let app = TestApp::spawn_with(Arc::new(UnavailableStore), AllowedOrigins::Any).await;

    let res = app.booking_create(&NewBooking::valid()).await.unwrap();
    let body = json_body(res, StatusCode::INTERNAL_SERVER_ERROR).await;

    assert_eq!(json!({ "detail": "Internal Server Error" }), body);
}
