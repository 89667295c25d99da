//! Wrappers of individual OCI entry points.
//!
//! Each function performs exactly one native call (a few fall back to a
//! second one) through [`ErrorContext`], so the entry point is resolved on
//! first use and failures come back as [`crate::Error`] values.
//!
//! # Safety
//!
//! All wrappers are `unsafe`: they forward raw handles, descriptors and
//! buffers to the client library as is. Callers must pass handles that are
//! alive and belong to the context's environment, and buffers that are valid
//! for the lengths given.

mod handle;
mod conn;
mod stmt;
mod lob;
mod object;
mod data;
mod soda;
mod misc;

pub use handle::*;
pub use conn::*;
pub use stmt::*;
pub use lob::*;
pub use object::*;
pub use data::*;
pub use soda::*;
pub use misc::*;
