//! Domain logic for the report engine.
//!
//! Everything in this crate is pure: no database, no async, no I/O. The
//! `db` and `api` crates build on these types.

pub mod error;
pub mod migration;
pub mod naming;
pub mod prompt;
pub mod prompt_style;
pub mod scenario;
pub mod types;
