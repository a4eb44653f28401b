//! Sample API endpoints that generate instrumented traffic.
//!
//! These handlers mimic a small business API: variable processing time and
//! an occasional server error, so the request counter and duration
//! histogram have realistic data to show.

use std::time::Duration;

use axum::http::StatusCode;
use axum::{response::IntoResponse, routing::get, Json, Router};
use rand::Rng;
use serde::Serialize;
use tokio::time::sleep;

use crate::state::AppState;

/// Registers the sample API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/api/users", get(list_users))
        .route("/api/orders", get(list_orders))
}

#[derive(Serialize)]
struct IndexResponse {
    message: &'static str,
    endpoints: Vec<&'static str>,
}

#[derive(Serialize)]
struct UsersResponse {
    users: Vec<&'static str>,
}

#[derive(Serialize)]
struct OrdersResponse {
    orders: Vec<&'static str>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

/// Service banner listing the available endpoints.
async fn index() -> impl IntoResponse {
    Json(IndexResponse {
        message: "Custom Application Exporter",
        endpoints: vec!["/metrics", "/health", "/api/users", "/api/orders"],
    })
}

async fn list_users() -> impl IntoResponse {
    let delay = rand::thread_rng().gen_range(0..100);
    sleep(Duration::from_millis(delay)).await;

    Json(UsersResponse {
        users: vec!["user1", "user2", "user3"],
    })
}

/// Fails with a 500 roughly 10% of the time to produce an error rate.
async fn list_orders() -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let (delay, fail) = {
        let mut rng = rand::thread_rng();
        (rng.gen_range(0..200), rng.gen_bool(0.1))
    };
    sleep(Duration::from_millis(delay)).await;

    if fail {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Internal server error",
            }),
        ));
    }

    Ok(Json(OrdersResponse {
        orders: vec!["order1", "order2"],
    }))
}
