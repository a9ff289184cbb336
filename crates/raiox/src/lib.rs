//! Terminal front-end for looking up broadband customers and chatting
//! about them with a language model.
//!
//! The binary wires these pieces to stdin and stdout; the library part
//! holds line input, input parsing and panel rendering so all of them can
//! be tested without a terminal.

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

pub mod command;
pub mod render;
#[cfg(feature = "cli")]
pub mod terminal;

/// Re-exports of [`raiox_core`] crate.
pub mod core {
    pub use raiox_core::*;
}
