//! HTTP gateway for the shift-roster scheduling service.
//!
//! This crate provides the JSON API used by the roster web client. It handles:
//!
//! - Phone-number login and the user directory
//! - Reading and editing weekly schedules, including auto-assignment
//! - Availability submission and the manager's submission overview
//! - Request tracing, CORS, body limits and timeouts
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Clients (HTTP)                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    shift-roster-gateway                     │
//! │          Router + Handlers + Error mapping                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                      ┌──────────────┐
//!                      │ RosterService│
//!                      └──────────────┘
//!                              │
//!                              ▼
//!                      ┌──────────────┐
//!                      │  RocksStore  │
//!                      └──────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use shift_roster_control::RosterService;
//! use shift_roster_gateway::{create_router, GatewayConfig, GatewayState};
//! use shift_roster_store::RocksStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(RocksStore::open("/tmp/shift-roster")?);
//! let roster = Arc::new(RosterService::with_defaults(store));
//!
//! let state = GatewayState::new(roster, GatewayConfig::default());
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3001").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod startup;
pub mod state;

pub use config::GatewayConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::GatewayState;
