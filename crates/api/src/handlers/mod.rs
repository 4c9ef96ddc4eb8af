//! HTTP handlers, grouped by resource.

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod events;
pub mod gallery;
pub mod menu;
pub mod messages;
pub mod reservations;
pub mod reviews;
pub mod stats;
