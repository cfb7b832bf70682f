//! Lost and found items
//!
//! | Method | Path                  | Body                          |
//! |--------|-----------------------|-------------------------------|
//! | POST   | /api/submitFoundItem  | multipart, `itemImage` needed |
//! | POST   | /api/submitLostItem   | multipart, image optional     |
//! | POST   | /getAllItems          | none, returns found items     |
//! | POST   | /getLostItems         | none, returns lost items      |
//! | POST   | /claimItem/{id}       | optional JSON claim fields    |
//!
//! Uploaded images are served from `/foundItemImages` and `/lostItemImages`.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;

pub use repository::{ItemRepository, PgItemRepository};
pub use routes::{image_routes, routes};
pub use services::ItemService;
