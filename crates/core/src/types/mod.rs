//! Core types for Coastline.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod currency;
pub mod id;

pub use currency::Currency;
pub use id::*;
