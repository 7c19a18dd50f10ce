// src/handlers.rs

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod inventory;
pub mod products;
pub mod suppliers;
