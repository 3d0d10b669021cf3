// Copyright (C) 2026  winnyboy5
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! Route handlers

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error};

use crate::state::AppState;

/// Message returned by `GET /`
pub const HELLO_MESSAGE: &str = "hello world!";

/// Message returned by `POST /`
pub const POST_MESSAGE: &str = "Send a post request 💣";

/// Body of the JSON routes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteResponse {
    /// Always true; these routes cannot fail
    pub success: bool,
    /// Fixed per route
    pub message: &'static str,
}

impl RouteResponse {
    fn ok(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

/// GET /
pub async fn hello() -> (StatusCode, Json<RouteResponse>) {
    (StatusCode::OK, Json(RouteResponse::ok(HELLO_MESSAGE)))
}

/// POST / - the request body is never read
pub async fn send_post() -> (StatusCode, Json<RouteResponse>) {
    (StatusCode::OK, Json(RouteResponse::ok(POST_MESSAGE)))
}

/// GET /metrics
///
/// Current snapshot in Prometheus text format. A failed scrape is answered
/// with 500 and a plain message, never with partial metrics.
pub async fn metrics(State(state): State<AppState>) -> Response {
    match state.metrics.scrape() {
        Ok(exposition) => {
            debug!(bytes = exposition.body().len(), "Serving metrics");
            let content_type = exposition.content_type();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, content_type)],
                exposition.into_body(),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to collect metrics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to collect metrics",
            )
                .into_response()
        }
    }
}
