//! Domains module containing the capabilities the server exposes.
//!
//! - **tools**: named capabilities invoked through `tools/call`
//! - **resources**: read-only documents served through `resources/read`

pub mod resources;
pub mod tools;
