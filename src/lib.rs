// SPDX-License-Identifier: MIT

//! A small rule-validation HTTP API.
//!
//! The `engine` module is the core: it resolves a field path against a JSON
//! document and evaluates a comparison condition against the resolved value.
//! The `server` module is the axum surface around it.

pub mod engine;
pub mod server;
