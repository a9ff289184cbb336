//! Conversation-related types.

use raiox_model::{ModelMessage, ModelRequest};

use crate::dataset::CustomerRecord;
use crate::model_client::ModelClient;
use crate::prompt;

/// Author of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message in a transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    #[inline]
    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    fn to_message(&self) -> ModelMessage {
        let text = self.text.clone();
        match self.role {
            Role::System => ModelMessage::System(text),
            Role::User => ModelMessage::User(text),
            Role::Assistant => ModelMessage::Assistant(text),
        }
    }
}

/// What happened to a question passed to [`Transcript::ask`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AskOutcome {
    /// The question was blank. Nothing was recorded or sent.
    Ignored,
    /// The model replied; the reply was recorded.
    Answered,
    /// The call failed; the error text was recorded as the reply.
    Failed,
}

/// The ordered turns of a conversation about one customer.
///
/// Always starts with exactly one system turn, and every accepted question
/// adds exactly one user turn followed by one assistant turn.
#[derive(Clone, Debug)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Starts a transcript whose system turn carries every field of
    /// `record`.
    pub fn seeded(record: &CustomerRecord) -> Self {
        Self {
            turns: vec![Turn::new(Role::System, prompt::system_prompt(record))],
        }
    }

    #[inline]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always `false`, the system turn is never removed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The user and assistant turns, oldest first.
    pub fn exchanges(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter().filter(|turn| turn.role != Role::System)
    }

    /// Builds a deterministic request carrying every turn in order.
    pub fn to_request(&self) -> ModelRequest {
        ModelRequest::deterministic(
            self.turns.iter().map(Turn::to_message).collect(),
        )
    }

    /// Sends `question` along with the whole history.
    ///
    /// The question is recorded verbatim; only the check for a blank
    /// question looks at it trimmed.
    pub async fn ask(
        &mut self,
        client: &ModelClient,
        question: &str,
    ) -> AskOutcome {
        if question.trim().is_empty() {
            return AskOutcome::Ignored;
        }

        self.turns.push(Turn::new(Role::User, question));
        let (reply, outcome) = match client.complete(self.to_request()).await {
            Ok(reply) => (reply.trim().to_owned(), AskOutcome::Answered),
            Err(err) => (format!("Erro na API: {err}"), AskOutcome::Failed),
        };
        self.turns.push(Turn::new(Role::Assistant, reply));
        debug!(turns = self.turns.len(), ?outcome, "question answered");
        outcome
    }
}
