//! Usblock — USB device access lockdown library.
//!
//! This library exposes the core components of Usblock for integration
//! testing and programmatic use. The binary entrypoint is in `main.rs`.

// Many items are pub for use by integration tests, which are separate
// compilation units — suppress false dead_code warnings.
#![allow(dead_code)]

pub mod audit;
pub mod cli;
pub mod devices;
pub mod policy;
pub mod privilege;
pub mod scenario;
pub mod store;
