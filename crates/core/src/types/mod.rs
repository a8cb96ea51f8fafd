//! Core types for Storedash.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod color;
pub mod id;
pub mod owner;
pub mod price;

pub use color::{HexColor, HexColorError};
pub use id::*;
pub use owner::{OwnerId, OwnerIdError};
pub use price::{Price, PriceError};
