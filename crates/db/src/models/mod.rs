//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod category;
pub mod contact_message;
pub mod event;
pub mod gallery_image;
pub mod menu_item;
pub mod reservation;
pub mod review;
pub mod user;
