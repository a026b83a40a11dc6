// SPDX-License-Identifier: MIT

//! The rule-validation engine
//!
//! A rule names a field inside a JSON document and a condition to check its
//! value against:
//! - `path` resolves `a.b` / `a["b"]` field paths over JSON values,
//! - `validator` runs the ordered structural checks over a request payload,
//! - `condition` holds the closed set of comparison conditions,
//! - `verdict` is the immutable result handed back to the transport.
//!
//! The engine is stateless: every call operates only on its own payload.

pub mod condition;
pub mod path;
pub mod validator;
pub mod verdict;

pub use condition::{Condition, ConditionError};
pub use path::{resolve, split_segments, ExistencePolicy, Resolution};
pub use validator::{validate, Message, ValidationError};
pub use verdict::Verdict;
