//! Storage module for uploaded item images
//!
//! Writes images to category folders on local disk. The folders are served
//! back as static routes.

mod local_storage;

pub use local_storage::{ImageCategory, LocalImageStorage};
