//! Shared primitives for the bioseq workspace.
//!
//! `bioseq-core` holds what every other bioseq crate builds on:
//!
//! - **Error types**: [`BioseqError`] and [`Result`] for structured error handling
//! - **Traits**: [`Sequence`], [`Annotated`], [`Scored`], [`Summarizable`]

pub mod error;
pub mod traits;

pub use error::{BioseqError, PartialRead, PartialWrite, Result};
pub use traits::*;
