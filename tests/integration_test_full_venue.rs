mod common;

use axum::http::StatusCode;
use chrono::Weekday;
use common::{fmt_date, next_weekday, parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn full_venue_books_every_court_with_cross_links() {
    let app = TestApp::new().await;
    let mut court_ids = Vec::new();
    for n in 1..=3 {
        court_ids.push(app.create_banded_court(n).await);
    }
    let date = fmt_date(next_weekday(Weekday::Tue));

    let res = app
        .request(
            "POST",
            "/api/v1/venue/book",
            Some(json!({
                "date": date,
                "start_time": "10:00",
                "end_time": "12:00",
                "notes": "club tournament"
            })),
        )
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    let bookings = body["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 3);
    // Three courts at $100/h for two hours.
    assert_eq!(body["total_price"], json!(600.0));

    let ids: Vec<&str> = bookings.iter().map(|b| b["id"].as_str().unwrap()).collect();
    for booking in bookings {
        assert_eq!(booking["is_full_venue"], json!(true));
        assert_eq!(booking["status"], json!("pending"));
        let siblings: Vec<String> =
            serde_json::from_str(booking["siblings_json"].as_str().unwrap()).unwrap();
        assert_eq!(siblings.len(), 2);
        assert!(!siblings.contains(&booking["id"].as_str().unwrap().to_string()));
        for sibling in &siblings {
            assert!(ids.contains(&sibling.as_str()));
        }
    }
}

#[tokio::test]
async fn full_venue_is_all_or_nothing() {
    let app = TestApp::new().await;
    let court_a = app.create_banded_court(1).await;
    let _court_b = app.create_banded_court(2).await;
    let date = fmt_date(next_weekday(Weekday::Tue));

    // Court 1 is taken for part of the window.
    let blocker = app
        .request(
            "POST",
            "/api/v1/bookings",
            Some(json!({
                "court_id": court_a,
                "date": date,
                "start_time": "11:00",
                "end_time": "12:00"
            })),
        )
        .await;
    assert_eq!(blocker.status(), StatusCode::OK);

    let res = app
        .request(
            "POST",
            "/api/v1/venue/book",
            Some(json!({
                "date": date,
                "start_time": "10:00",
                "end_time": "12:00"
            })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = parse_body(res).await;
    assert!(
        body["error"].as_str().unwrap().contains("Court 1"),
        "conflicting court should be named: {body}"
    );

    // No partial bookings were written.
    let listed = app
        .request("GET", &format!("/api/v1/bookings?date={date}"), None)
        .await;
    let bookings = parse_body(listed).await;
    assert_eq!(bookings.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn full_venue_skips_placeholder_and_inactive_courts() {
    let app = TestApp::new().await;
    let active = app.create_banded_court(1).await;
    let inactive = app.create_banded_court(2).await;
    let date = fmt_date(next_weekday(Weekday::Tue));

    let deactivated = app
        .request(
            "PUT",
            &format!("/api/v1/courts/{inactive}"),
            Some(json!({ "is_active": false })),
        )
        .await;
    assert_eq!(deactivated.status(), StatusCode::OK);

    // An umbrella placeholder court must never be booked individually.
    let placeholder = app
        .request(
            "POST",
            "/api/v1/courts",
            Some(json!({
                "name": "Whole venue",
                "number": 99,
                "court_type": "full_venue",
                "capacity": 40
            })),
        )
        .await;
    assert_eq!(placeholder.status(), StatusCode::OK);

    let res = app
        .request(
            "POST",
            "/api/v1/venue/book",
            Some(json!({
                "date": date,
                "start_time": "10:00",
                "end_time": "11:00"
            })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    let bookings = body["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["court_id"], json!(active));
}

#[tokio::test]
async fn points_deduction_overrides_the_venue_total() {
    let app = TestApp::new().await;
    app.create_banded_court(1).await;
    app.create_banded_court(2).await;
    let date = fmt_date(next_weekday(Weekday::Tue));

    let res = app
        .request(
            "POST",
            "/api/v1/venue/book",
            Some(json!({
                "date": date,
                "start_time": "10:00",
                "end_time": "11:00",
                "points_deduction": 120.0
            })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["total_price"], json!(120.0));
    for booking in body["bookings"].as_array().unwrap() {
        assert_eq!(booking["is_custom_points"], json!(true));
    }

    let negative = app
        .request(
            "POST",
            "/api/v1/venue/book",
            Some(json!({
                "date": date,
                "start_time": "14:00",
                "end_time": "15:00",
                "points_deduction": -1.0
            })),
        )
        .await;
    assert_eq!(negative.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bypass_restrictions_confirms_and_ignores_hours() {
    let app = TestApp::new().await;
    let court_id = app.create_banded_court(1).await;
    let date = fmt_date(next_weekday(Weekday::Tue));

    // Close the court entirely; bypass should book it anyway.
    let closed = json!({ "open": false, "start": "00:00", "end": "24:00" });
    let updated = app
        .request(
            "PUT",
            &format!("/api/v1/courts/{court_id}"),
            Some(json!({
                "operating_hours": {
                    "monday": closed, "tuesday": closed, "wednesday": closed,
                    "thursday": closed, "friday": closed, "saturday": closed, "sunday": closed
                }
            })),
        )
        .await;
    assert_eq!(updated.status(), StatusCode::OK);

    let refused = app
        .request(
            "POST",
            "/api/v1/venue/book",
            Some(json!({
                "date": date,
                "start_time": "10:00",
                "end_time": "11:00"
            })),
        )
        .await;
    assert_eq!(refused.status(), StatusCode::CONFLICT);

    let bypassed = app
        .request(
            "POST",
            "/api/v1/venue/book",
            Some(json!({
                "date": date,
                "start_time": "10:00",
                "end_time": "11:00",
                "bypass_restrictions": true
            })),
        )
        .await;
    assert_eq!(bypassed.status(), StatusCode::OK);
    let body = parse_body(bypassed).await;
    assert_eq!(body["bookings"][0]["status"], json!("confirmed"));
}

#[tokio::test]
async fn cancelling_one_venue_booking_cascades_to_siblings() {
    let app = TestApp::new().await;
    app.create_banded_court(1).await;
    app.create_banded_court(2).await;
    app.create_banded_court(3).await;
    let date = fmt_date(next_weekday(Weekday::Tue));

    let res = app
        .request(
            "POST",
            "/api/v1/venue/book",
            Some(json!({
                "date": date,
                "start_time": "10:00",
                "end_time": "11:00"
            })),
        )
        .await;
    let body = parse_body(res).await;
    let first_id = body["bookings"][0]["id"].as_str().unwrap().to_string();

    let cancelled = app
        .request(
            "POST",
            &format!("/api/v1/bookings/{first_id}/cancel"),
            Some(json!({ "force": true })),
        )
        .await;
    assert_eq!(cancelled.status(), StatusCode::OK);

    let listed = app
        .request("GET", &format!("/api/v1/bookings?date={date}"), None)
        .await;
    for booking in parse_body(listed).await.as_array().unwrap() {
        assert_eq!(booking["status"], json!("cancelled"), "sibling not cascaded");
    }
}

#[tokio::test]
async fn full_venue_rejects_windows_a_court_cannot_price() {
    let app = TestApp::new().await;
    app.create_banded_court(1).await;

    // This court's bands stop at 18:00, so an evening window has no rate.
    let created = app
        .request(
            "POST",
            "/api/v1/courts",
            Some(json!({
                "name": "Daytime only",
                "number": 2,
                "court_type": "training",
                "capacity": 4,
                "time_slots": [
                    { "start": "06:00", "end": "18:00", "price": 100.0, "label": "day" }
                ]
            })),
        )
        .await;
    assert_eq!(created.status(), StatusCode::OK);
    let date = fmt_date(next_weekday(Weekday::Tue));

    let res = app
        .request(
            "POST",
            "/api/v1/venue/book",
            Some(json!({
                "date": date,
                "start_time": "20:00",
                "end_time": "21:00"
            })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = parse_body(res).await;
    assert!(
        body["error"].as_str().unwrap().contains("Daytime only"),
        "unpriceable court should be named: {body}"
    );

    let listed = app
        .request("GET", &format!("/api/v1/bookings?date={date}"), None)
        .await;
    assert_eq!(parse_body(listed).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn venue_booking_in_the_past_is_rejected() {
    let app = TestApp::new().await;
    app.create_banded_court(1).await;
    let yesterday = fmt_date(chrono::Utc::now().date_naive() - chrono::Duration::days(1));

    let res = app
        .request(
            "POST",
            "/api/v1/venue/book",
            Some(json!({
                "date": yesterday,
                "start_time": "10:00",
                "end_time": "11:00"
            })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cascade_cancel_leaves_terminal_siblings_alone() {
    let app = TestApp::new().await;
    app.create_banded_court(1).await;
    app.create_banded_court(2).await;
    let date = fmt_date(next_weekday(Weekday::Tue));

    let res = app
        .request(
            "POST",
            "/api/v1/venue/book",
            Some(json!({
                "date": date,
                "start_time": "10:00",
                "end_time": "11:00"
            })),
        )
        .await;
    let body = parse_body(res).await;
    let first_id = body["bookings"][0]["id"].as_str().unwrap().to_string();
    let second_id = body["bookings"][1]["id"].as_str().unwrap().to_string();

    for (id, status) in [(&second_id, "confirmed"), (&second_id, "completed")] {
        let updated = app
            .request(
                "POST",
                &format!("/api/v1/bookings/{id}/status"),
                Some(json!({ "status": status })),
            )
            .await;
        assert_eq!(updated.status(), StatusCode::OK);
    }

    let cancelled = app
        .request(
            "POST",
            &format!("/api/v1/bookings/{first_id}/cancel"),
            Some(json!({ "force": true })),
        )
        .await;
    assert_eq!(cancelled.status(), StatusCode::OK);

    let first = app.request("GET", &format!("/api/v1/bookings/{first_id}"), None).await;
    assert_eq!(parse_body(first).await["status"], json!("cancelled"));

    let second = app.request("GET", &format!("/api/v1/bookings/{second_id}"), None).await;
    assert_eq!(parse_body(second).await["status"], json!("completed"));
}

#[tokio::test]
async fn batch_insert_conflict_names_the_court() {
    use court_booking_backend::domain::models::booking::{status, Booking, NewBookingParams};
    use court_booking_backend::domain::ports::BookingRepository as _;
    use court_booking_backend::error::AppError;

    let app = TestApp::new().await;
    let court_id = app.create_banded_court(1).await;
    let day = next_weekday(Weekday::Tue);

    let blocker = app
        .request(
            "POST",
            "/api/v1/bookings",
            Some(json!({
                "court_id": court_id,
                "date": fmt_date(day),
                "start_time": "10:00",
                "end_time": "11:00"
            })),
        )
        .await;
    assert_eq!(blocker.status(), StatusCode::OK);

    // Drive the repository directly: the in-transaction re-check is the last
    // line of defence when the coordinator pre-check has been raced.
    let overlapping = Booking::new(NewBookingParams {
        court_id: court_id.clone(),
        date: day,
        start_min: 600,
        end_min: 660,
        status: status::PENDING.to_string(),
        base_price: 100.0,
        member_discount_pct: 0.0,
        total_price: 100.0,
        players: vec![],
        total_players: 0,
        notes: None,
    });

    let err = app
        .state
        .booking_repo
        .create_venue_batch(&[overlapping])
        .await
        .unwrap_err();
    match err {
        AppError::Conflict(msg) => {
            assert!(msg.contains("Court 1"), "conflict should name the court: {msg}")
        }
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn full_venue_with_no_bookable_courts_is_rejected() {
    let app = TestApp::new().await;
    let date = fmt_date(next_weekday(Weekday::Tue));

    let res = app
        .request(
            "POST",
            "/api/v1/venue/book",
            Some(json!({
                "date": date,
                "start_time": "10:00",
                "end_time": "11:00"
            })),
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
