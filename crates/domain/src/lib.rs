//! # subtrack-domain
//!
//! Pure domain model for the subtrack subscription tracker.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, month values
//! - Define **Subscriptions** (a priced service owned by a user over a span of months)
//! - Define **Filters** (service-name and user narrowing handed to storage)
//! - Host the **cost engine**: overlap resolution and proration of monthly
//!   prices over a query window
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod month;

pub mod cost;
pub mod filter;
pub mod subscription;
