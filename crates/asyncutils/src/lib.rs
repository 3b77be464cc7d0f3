//! Memoizing async cells.
//!
//! Both types wrap a producer (an async closure returning `Result<T, E>`) and
//! run it at most once, storing the value for every later caller:
//! - [`Cached`] is meant to be owned by a long-lived handle and shared by all
//!   of its callers (whole-collection loads).
//! - [`Deferred`] is meant to be owned by a single value, describing a
//!   relation that has not been loaded yet. It stays unresolved until awaited.
//!
//! A producer that fails, or a first computation whose future is dropped
//! before completing, leaves the cell empty: the next caller runs the
//! producer again instead of observing a half-populated value.

mod cached;
mod deferred;
mod memo;

pub use crate::cached::Cached;
pub use crate::deferred::Deferred;
