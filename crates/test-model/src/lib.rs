//! A local fake model for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::future::ready;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll, ready};
use std::time::Duration;

use raiox_model::{
    ErrorKind, ModelFinishReason, ModelProvider, ModelProviderError,
    ModelRequest, ModelResponse, ModelResponseEvent,
};
use tokio::time::{Sleep, sleep};

pub use preset::*;

/// Time between two events of a response.
const EVENT_DELAY: Duration = Duration::from_millis(1);

#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

pub struct TestModelResponse {
    events: VecDeque<PresetEvent>,
    completed: bool,
    sleep: Option<Pin<Box<Sleep>>>,
}

impl ModelResponse for TestModelResponse {
    type Error = crate::Error;

    fn poll_next_event(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Result<Option<ModelResponseEvent>, Self::Error>> {
        let this = self.get_mut();

        if let Some(sleep) = &mut this.sleep {
            ready!(sleep.as_mut().poll(cx));
            this.sleep = None;

            return Poll::Ready(match this.events.pop_front() {
                Some(PresetEvent::MessageDelta(msg)) => {
                    Ok(Some(ModelResponseEvent::MessageDelta(msg)))
                }
                Some(PresetEvent::Fail(message)) => {
                    this.events.clear();
                    this.completed = true;
                    Err(Error {
                        message,
                        kind: ErrorKind::Other,
                    })
                }
                None if !this.completed => {
                    this.completed = true;
                    Ok(Some(ModelResponseEvent::Completed(
                        ModelFinishReason::Stop,
                    )))
                }
                // In case this method is called after completion.
                None => Ok(None),
            });
        }
        this.sleep = Some(Box::pin(sleep(EVENT_DELAY)));
        Pin::new(this).poll_next_event(cx)
    }
}

#[derive(Default)]
struct Script {
    responses: VecDeque<PresetResponse>,
    requests: Vec<ModelRequest>,
}

/// A local fake model for testing purpose.
///
/// Responses are queued with [`TestModelProvider::push_response`] and
/// consumed one per request, in order. When the queue is empty the request
/// fails. Every request is recorded, so tests can assert how many calls
/// were made and with which messages.
///
/// Clones share the same script, which lets a test keep a handle after
/// moving the provider into a client.
#[derive(Clone, Default)]
pub struct TestModelProvider {
    script: Arc<Mutex<Script>>,
}

impl TestModelProvider {
    #[inline]
    pub fn push_response(&self, preset: PresetResponse) {
        self.lock().responses.push_back(preset);
    }

    /// Returns all requests received so far.
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.lock().requests.clone()
    }

    #[inline]
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        // A panicking test thread must not hide the script from others.
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ModelProvider for TestModelProvider {
    type Error = crate::Error;
    type Response = TestModelResponse;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send + 'static
    {
        let mut script = self.lock();
        script.requests.push(req.clone());

        let result = match script.responses.pop_front() {
            None => Err(Error {
                message: "no preset response left".to_owned(),
                kind: ErrorKind::Other,
            }),
            Some(PresetResponse {
                rejection: Some(message),
                ..
            }) => Err(Error {
                message,
                kind: ErrorKind::Other,
            }),
            Some(PresetResponse { events, .. }) => Ok(TestModelResponse {
                events: events.into(),
                completed: false,
                sleep: None,
            }),
        };
        ready(result)
    }
}
