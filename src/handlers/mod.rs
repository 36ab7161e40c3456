//! HTTP handlers for the four POST endpoints.

pub mod action;
pub mod listing;

pub use action::*;
pub use listing::*;
