//! tvstreams - series catalog addon server
//!
//! This library crate exposes the server plumbing for integration testing.
//! The catalog engine itself lives in `tvstreams-catalog`.

pub mod config;
pub mod loader;
pub mod manifest;
pub mod server;
pub mod split;
