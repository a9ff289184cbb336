//! Customer lookup, summary and chat logic.
//!
//! The dataset is loaded once and shared read-only; everything a single
//! user does (selection, summary, conversation) lives in a [`Session`].

#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

pub mod conversation;
mod dataset;
mod error;
mod loader;
mod model_client;
pub mod prompt;
pub mod schema;
mod session;
mod summary;

#[cfg(test)]
mod fixtures;

pub use dataset::{CustomerRecord, Dataset, FieldValue, RawTable};
pub use error::LoadError;
pub use loader::{
    DatasetLoader, TableSource, WORKBOOK_FILE_NAME, WorkbookSource,
};
pub use model_client::ModelClient;
pub use schema::Schema;
pub use session::{Lookup, Selection, Session};
pub use summary::summarize;
