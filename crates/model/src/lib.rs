//! A vendor-agnostic protocol for text generation services.
//!
//! The rest of the workspace talks to language models only through the
//! types in this crate, so the actual vendor can be swapped (or replaced
//! by a scripted fake in tests) without touching the lookup and chat
//! logic.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod provider;
mod request;
mod response;

pub use error::*;
pub use provider::*;
pub use request::*;
pub use response::*;
