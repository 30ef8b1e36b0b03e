//! Role gates, ownership enforcement, and cascade-delete behavior.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use liftlog::api::AppState;
use liftlog::config::Config;
use std::sync::Arc;
use tower::ServiceExt;

const ADMIN_LOGIN: (&str, &str) = ("admin", "admin123");
const COACH_LOGIN: (&str, &str) = ("coach", "coach123");

/// Returns the router plus the state handle, so tests can inspect the store
/// directly where no route exposes the rows (orphaned comments).
async fn spawn_app() -> (Router, Arc<AppState>) {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;

    let state = liftlog::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    (liftlog::api::router(state.clone()), state)
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value, Option<String>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(ToString::to_string);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json, set_cookie)
}

async fn register_and_login(app: &Router, username: &str, password: &str) -> String {
    let (status, _, _) = send_json(
        app,
        "POST",
        "/register",
        None,
        Some(serde_json::json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    login(app, username, password).await
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, _, cookie) = send_json(
        app,
        "POST",
        "/login",
        None,
        Some(serde_json::json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    cookie.expect("Login did not set a session cookie")
}

/// Adds a workout and returns its id.
async fn add_workout(app: &Router, cookie: &str, date: &str, exercise: &str) -> i32 {
    let (status, body, _) = send_json(
        app,
        "POST",
        "/add",
        Some(cookie),
        Some(serde_json::json!({
            "date": date,
            "exercise": exercise,
            "sets": 3,
            "reps": 10,
            "weight": 50.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    i32::try_from(body["data"]["id"].as_i64().unwrap()).unwrap()
}

#[tokio::test]
async fn test_role_gates_are_exact_match() {
    let (app, _) = spawn_app().await;

    let user = register_and_login(&app, "alice", "pw").await;
    let coach = login(&app, COACH_LOGIN.0, COACH_LOGIN.1).await;
    let admin = login(&app, ADMIN_LOGIN.0, ADMIN_LOGIN.1).await;

    // user cannot reach coach or admin pages
    for uri in ["/coach", "/admin"] {
        let (status, _, _) = send_json(&app, "GET", uri, Some(&user), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "user on {uri}");
    }

    // coach cannot reach user or admin pages
    for uri in ["/dashboard", "/progress", "/statistics", "/admin"] {
        let (status, _, _) = send_json(&app, "GET", uri, Some(&coach), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "coach on {uri}");
    }

    // admin passes no user- or coach-only gate: roles are not hierarchical
    for uri in ["/dashboard", "/progress", "/statistics", "/coach"] {
        let (status, _, _) = send_json(&app, "GET", uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "admin on {uri}");
    }
}

#[tokio::test]
async fn test_ownership_enforced_on_edit_and_delete() {
    let (app, _) = spawn_app().await;

    let alice = register_and_login(&app, "alice", "pw").await;
    let bob = register_and_login(&app, "bob", "pw").await;

    let workout_id = add_workout(&app, &alice, "2025-01-10", "Squat").await;

    // bob cannot edit alice's workout
    let (status, _, _) = send_json(
        &app,
        "POST",
        &format!("/edit/{workout_id}"),
        Some(&bob),
        Some(serde_json::json!({
            "date": "2025-01-11",
            "exercise": "Hijacked",
            "sets": 1,
            "reps": 1,
            "weight": 1.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // bob cannot delete it either
    let (status, _, _) = send_json(
        &app,
        "GET",
        &format!("/delete/{workout_id}"),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // the workout is untouched
    let (status, body, _) = send_json(&app, "GET", "/dashboard", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_workouts"], 1);
    assert_eq!(body["data"]["workouts"][0]["exercise"], "Squat");

    // the owner can
    let (status, _, _) = send_json(
        &app,
        "GET",
        &format!("/delete/{workout_id}"),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_missing_workout_is_not_found() {
    let (app, _) = spawn_app().await;
    let alice = register_and_login(&app, "alice", "pw").await;

    let (status, _, _) = send_json(
        &app,
        "POST",
        "/edit/9999",
        Some(&alice),
        Some(serde_json::json!({
            "date": "2025-01-10",
            "exercise": "Squat",
            "sets": 3,
            "reps": 10,
            "weight": 50.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send_json(&app, "GET", "/delete/9999", Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_coach_comment_flow() {
    let (app, _) = spawn_app().await;

    let alice = register_and_login(&app, "alice", "pw").await;
    let workout_id = add_workout(&app, &alice, "2025-01-10", "Squat").await;

    let coach = login(&app, COACH_LOGIN.0, COACH_LOGIN.1).await;

    let (status, _, _) = send_json(
        &app,
        "POST",
        &format!("/coach/comment/{workout_id}"),
        Some(&coach),
        Some(serde_json::json!({ "content": "Keep your back straight" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // over-length and empty comments are rejected
    let (status, _, _) = send_json(
        &app,
        "POST",
        &format!("/coach/comment/{workout_id}"),
        Some(&coach),
        Some(serde_json::json!({ "content": "x".repeat(501) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send_json(
        &app,
        "POST",
        &format!("/coach/comment/{workout_id}"),
        Some(&coach),
        Some(serde_json::json!({ "content": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // commenting on a missing workout is 404
    let (status, _, _) = send_json(
        &app,
        "POST",
        "/coach/comment/9999",
        Some(&coach),
        Some(serde_json::json!({ "content": "ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // the roster shows alice's workout with the comment
    let (status, body, _) = send_json(&app, "GET", "/coach", Some(&coach), None).await;
    assert_eq!(status, StatusCode::OK);
    let roster = body["data"].as_array().unwrap();
    let alice_entry = roster.iter().find(|e| e["username"] == "alice").unwrap();
    assert_eq!(
        alice_entry["workouts"][0]["comments"][0]["content"],
        "Keep your back straight"
    );

    // and alice sees it on her dashboard
    let (status, body, _) = send_json(&app, "GET", "/dashboard", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["workouts"][0]["comments"][0]["content"],
        "Keep your back straight"
    );
}

#[tokio::test]
async fn test_owner_can_delete_commented_workout() {
    let (app, state) = spawn_app().await;

    let alice = register_and_login(&app, "alice", "pw").await;
    let workout_id = add_workout(&app, &alice, "2025-01-10", "Squat").await;

    let coach = login(&app, COACH_LOGIN.0, COACH_LOGIN.1).await;
    let (status, _, _) = send_json(
        &app,
        "POST",
        &format!("/coach/comment/{workout_id}"),
        Some(&coach),
        Some(serde_json::json!({ "content": "More depth next time" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // a commented workout deletes cleanly; the comment is not a blocker
    let (status, body, _) = send_json(
        &app,
        "GET",
        &format!("/delete/{workout_id}"),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "owner delete failed: {body}");

    let (status, body, _) = send_json(&app, "GET", "/dashboard", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_workouts"], 0);

    // the comment is left behind, orphaned
    let comments = state.store().comments_for_workout(workout_id).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].content, "More depth next time");
}

#[tokio::test]
async fn test_admin_cascade_delete_leaves_comments_orphaned() {
    let (app, state) = spawn_app().await;

    let alice = register_and_login(&app, "alice", "pw").await;
    let workout_id = add_workout(&app, &alice, "2025-01-10", "Squat").await;

    let coach = login(&app, COACH_LOGIN.0, COACH_LOGIN.1).await;
    let (status, _, _) = send_json(
        &app,
        "POST",
        &format!("/coach/comment/{workout_id}"),
        Some(&coach),
        Some(serde_json::json!({ "content": "Nice depth" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let admin = login(&app, ADMIN_LOGIN.0, ADMIN_LOGIN.1).await;

    let (status, body, _) = send_json(&app, "GET", "/admin", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let alice_id = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["username"] == "alice")
        .unwrap()["id"]
        .as_i64()
        .unwrap();

    let (status, _, _) = send_json(
        &app,
        "GET",
        &format!("/admin/delete/{alice_id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // the account and its workouts are gone
    let (_, body, _) = send_json(&app, "GET", "/admin", Some(&admin), None).await;
    assert!(
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .all(|u| u["username"] != "alice")
    );

    let workouts = state
        .store()
        .workouts_for_owner(i32::try_from(alice_id).unwrap())
        .await
        .unwrap();
    assert!(workouts.is_empty());

    // the comment on the deleted workout is still there, orphaned
    let comments = state.store().comments_for_workout(workout_id).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].content, "Nice depth");

    // alice can no longer log in; the failure is the generic credential error
    let (status, _, _) = send_json(
        &app,
        "POST",
        "/login",
        None,
        Some(serde_json::json!({ "username": "alice", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // deleting an already-deleted account is 404
    let (status, _, _) = send_json(
        &app,
        "GET",
        &format!("/admin/delete/{alice_id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
