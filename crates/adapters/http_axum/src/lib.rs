//! # subtrack-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON REST API** for subscription records
//!   (`/api/subscriptions`, `/api/subscriptions/{id}`, `/api/subscriptions/cost`)
//! - Parse wire formats (`MM-YYYY` months, UUID strings) into domain types
//!   before they reach the application layer
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `subtrack-app` (for port traits and services) and `subtrack-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod extract;
pub mod router;
pub mod state;
