use std::fmt::{self, Display};

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The credential was missing, invalid or lacks permission.
    Unauthorized,
    /// The model provider is rate limited, or the quota is exhausted.
    RateLimitExceeded,
    /// The content is moderated.
    Moderated,
    /// Any other errors, including network and malformed responses.
    Other,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Unauthorized => write!(f, "unauthorized"),
            ErrorKind::RateLimitExceeded => write!(f, "rate limit exceeded"),
            ErrorKind::Moderated => write!(f, "moderated"),
            ErrorKind::Other => write!(f, "other"),
        }
    }
}
