//! Protocol decoding modules.
//!
//! Each protocol follows a layered structure:
//! - `layout`: byte offsets and ranges (source of truth)
//! - `reader`: safe field access and protocol conventions
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! The line protocol adds a `decoder` that turns a byte stream into lines;
//! the frame protocol adds a `locator` that finds frame boundaries in a
//! buffer. Nothing here performs I/O.

pub(crate) mod common;
pub mod frame;
pub mod line;
