//! Rootwalk Infrastructure Layer
pub mod database;
pub mod dns;
