//! API Routes
//!
//! Route handlers organized by functionality.

pub mod health;
pub mod notifications;
pub mod pages;
pub mod records;
pub mod sync;
