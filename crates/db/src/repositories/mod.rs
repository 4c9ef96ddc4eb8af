//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod contact_message_repo;
pub mod event_repo;
pub mod gallery_image_repo;
pub mod menu_item_repo;
pub mod reservation_repo;
pub mod review_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use contact_message_repo::ContactMessageRepo;
pub use event_repo::EventRepo;
pub use gallery_image_repo::GalleryImageRepo;
pub use menu_item_repo::MenuItemRepo;
pub use reservation_repo::ReservationRepo;
pub use review_repo::ReviewRepo;
pub use user_repo::UserRepo;
