//! Shared helpers with no dependency on the rest of the crate.

pub mod date;
pub mod mime;
pub mod path;
