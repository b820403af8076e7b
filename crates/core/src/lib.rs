//! Sweet Shop Core - Shared types library.
//!
//! This crate provides the domain types shared by the Sweet Shop client
//! components:
//! - `client` - SDK for the Sweet Shop REST gateway
//! - `cli` - Command-line storefront driving the SDK
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no session
//! state. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and
//!   roles/statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
