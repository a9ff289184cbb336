/// A request to be sent to the model provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModelRequest {
    /// The input messages, oldest first.
    pub messages: Vec<ModelMessage>,
    /// How the provider should sample the reply.
    pub sampling: Sampling,
}

impl ModelRequest {
    /// Creates a request with deterministic sampling.
    #[inline]
    pub fn deterministic(messages: Vec<ModelMessage>) -> Self {
        Self {
            messages,
            sampling: Sampling::Deterministic,
        }
    }
}

/// A complete message.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ModelMessage {
    /// The system instructions.
    System(String),
    /// A user input text.
    User(String),
    /// An assistant text.
    Assistant(String),
}

impl ModelMessage {
    /// Returns the text content of the message.
    #[inline]
    pub fn content(&self) -> &str {
        match self {
            ModelMessage::System(text)
            | ModelMessage::User(text)
            | ModelMessage::Assistant(text) => text,
        }
    }
}

/// Sampling mode of a request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Sampling {
    /// Lowest-variance sampling, identical inputs should produce (nearly)
    /// identical outputs. Usually maps to a temperature of zero.
    #[default]
    Deterministic,
    /// Whatever the provider uses by default.
    Provider,
}
