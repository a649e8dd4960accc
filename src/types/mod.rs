//! Type definitions module.
//!
//! Contains shared types used across the application.

pub mod market;
pub mod order;

pub use market::*;
pub use order::*;
