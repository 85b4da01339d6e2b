//! Prelude module for the date_calculator crate.
//!
//! Re-exports the derive_more macros used by the date and result types.

#[allow(unused_imports)]
pub use derive_more::{Display, Into};
