//! # SalonBook Core
//!
//! Domain types and pure logic shared by the storage and HTTP crates:
//!
//! - **Models**: salons, weekly business hours and reservations
//! - **Slots**: the available-slot calculator for a single salon day
//! - **Repository**: the async seams the HTTP layer reads and writes through
//! - **Clock**: injected "now" so slot computation stays deterministic

pub mod clock;
pub mod errors;
pub mod models;
pub mod repository;
pub mod slots;
