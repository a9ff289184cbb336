//! Per-user interaction state.

use std::sync::Arc;

use crate::conversation::{AskOutcome, Transcript};
use crate::dataset::{CustomerRecord, Dataset};
use crate::model_client::ModelClient;
use crate::summary;

/// Result of [`Session::select`].
#[derive(Clone, Debug, PartialEq)]
pub enum Lookup {
    Found(CustomerRecord),
    NotFound,
    /// The identifier was empty; nothing is selected now.
    Cleared,
}

/// The selected customer and everything derived from it.
#[derive(Debug)]
pub struct Selection {
    identifier: String,
    record: Option<CustomerRecord>,
    summary: Option<String>,
    transcript: Option<Transcript>,
}

impl Selection {
    #[inline]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// `None` if the identifier matched no record.
    #[inline]
    pub fn record(&self) -> Option<&CustomerRecord> {
        self.record.as_ref()
    }

    #[inline]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    #[inline]
    pub fn transcript(&self) -> Option<&Transcript> {
        self.transcript.as_ref()
    }
}

/// State owned by one interactive user.
///
/// The summary and transcript always belong to the current selection.
/// Selecting a different identifier drops them before anything else
/// happens.
#[derive(Debug)]
pub struct Session {
    dataset: Arc<Dataset>,
    client: ModelClient,
    selection: Option<Selection>,
    draft: String,
}

impl Session {
    pub fn new(dataset: Arc<Dataset>, client: ModelClient) -> Self {
        Self {
            dataset,
            client,
            selection: None,
            draft: String::new(),
        }
    }

    #[inline]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[inline]
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// The selected record, if the selection matched one.
    #[inline]
    pub fn record(&self) -> Option<&CustomerRecord> {
        self.selection.as_ref().and_then(Selection::record)
    }

    /// Makes `identifier` the current selection.
    ///
    /// Re-selecting the current identifier keeps its summary and
    /// transcript.
    pub fn select(&mut self, identifier: &str) -> Lookup {
        if identifier.is_empty() {
            self.reset();
            return Lookup::Cleared;
        }

        let unchanged = self
            .selection
            .as_ref()
            .is_some_and(|current| current.identifier == identifier);
        if !unchanged {
            self.reset();
            let record = self.dataset.find(identifier).cloned();
            if record.is_some() && self.dataset.is_duplicate(identifier) {
                warn!(identifier, "identifier is duplicated, using first row");
            }
            self.selection = Some(Selection {
                identifier: identifier.to_owned(),
                record,
                summary: None,
                transcript: None,
            });
        }

        match self.record() {
            Some(record) => Lookup::Found(record.clone()),
            None => {
                info!(identifier, "customer not found");
                Lookup::NotFound
            }
        }
    }

    /// Returns the summary of the selected record, generating it on first
    /// use.
    pub async fn summary(&mut self) -> Option<&str> {
        let selection = self.selection.as_mut()?;
        let record = selection.record.as_ref()?;
        if selection.summary.is_none() {
            let summary = summary::summarize(&self.client, record).await;
            selection.summary = Some(summary);
        }
        selection.summary.as_deref()
    }

    /// Asks a question about the selected record.
    ///
    /// Returns `None` when no record is selected.
    pub async fn ask(&mut self, question: &str) -> Option<AskOutcome> {
        let selection = self.selection.as_mut()?;
        let record = selection.record.as_ref()?;
        let transcript = selection
            .transcript
            .get_or_insert_with(|| Transcript::seeded(record));
        Some(transcript.ask(&self.client, question).await)
    }

    /// The transcript of the selected record, if a question was asked.
    #[inline]
    pub fn transcript(&self) -> Option<&Transcript> {
        self.selection.as_ref().and_then(Selection::transcript)
    }

    /// Clears the selection and everything derived from it, including the
    /// question draft.
    pub fn reset(&mut self) {
        if let Some(selection) = self.selection.take() {
            debug!(identifier = %selection.identifier, "session reset");
        }
        self.draft.clear();
    }

    #[inline]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// The question being typed, possibly spanning several lines.
    #[inline]
    pub fn draft_mut(&mut self) -> &mut String {
        &mut self.draft
    }

    #[inline]
    pub fn take_draft(&mut self) -> String {
        std::mem::take(&mut self.draft)
    }
}
