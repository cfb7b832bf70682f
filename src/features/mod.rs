pub mod auth;
pub mod identity;
pub mod items;
pub mod pages;
