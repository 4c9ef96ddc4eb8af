//! Domain rules for the Tavola restaurant platform.
//!
//! This crate holds the pure, storage-free parts of the system: entity
//! validation, the reservation booking rules (slot capacity, status
//! transitions, temporal constraints), slug generation, and pagination
//! helpers. Everything here is synchronous and side-effect free so it can
//! be exercised by plain unit tests and reused by the API and repository
//! layers without pulling in sqlx or axum.

pub mod booking;
pub mod catalog;
pub mod contact;
pub mod error;
pub mod event;
pub mod review;
pub mod search;
pub mod types;
