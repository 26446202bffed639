//! Trait definitions for Travis operations.
//!
//! Each entity type implements the traits it supports, encapsulating
//! endpoint differences in the implementations.

mod activate;
mod get;
mod list;

pub use activate::Activate;
pub use get::Get;
pub use list::List;
