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
//! Beacon server
//!
//! `GET /` and `POST /` answer with fixed JSON; `GET /metrics` serves the
//! process metrics registry in Prometheus text format. Everything else gets
//! axum's default 404 or 405.

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use cli::Cli;
pub use config::{ConfigSource, LogSettings, ServerConfig};
pub use error::{ConfigError, ConfigResult};
pub use handlers::{RouteResponse, HELLO_MESSAGE, POST_MESSAGE};
pub use server::{run, serve, shutdown_signal};
pub use state::AppState;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// Create the router with the fixed route table
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::hello).post(handlers::send_post))
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
