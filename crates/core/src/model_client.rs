use std::fmt;
use std::future::poll_fn;
use std::pin::{Pin, pin};
use std::sync::Arc;

use raiox_model::{
    ModelFinishReason, ModelProvider, ModelProviderError, ModelRequest,
    ModelResponse, ModelResponseEvent,
};
use tracing::Instrument;

type CompleteResult = Result<String, Box<dyn ModelProviderError>>;
type BoxedCompleteFuture = Pin<Box<dyn Future<Output = CompleteResult> + Send>>;
type HandlerFn = Arc<dyn Fn(ModelRequest) -> BoxedCompleteFuture + Send + Sync>;

/// A wrapper around a model provider that provides a type-erased interface
/// for the other modules.
#[derive(Clone)]
pub struct ModelClient {
    handler_fn: HandlerFn,
}

impl ModelClient {
    #[inline]
    pub fn new<P: ModelProvider + 'static>(provider: P) -> Self {
        // Erase `P` so that sessions don't need a generic parameter.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = provider.send_request(&req);
            Box::pin(
                async move {
                    trace!(messages = req.messages.len(), "sending request");
                    let resp_or_err = fut.await;
                    drain_response::<P>(resp_or_err).await
                }
                .instrument(trace_span!("model client req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends a request and returns the full reply text.
    ///
    /// # Cancel safety
    ///
    /// This method is cancel safe. The response stops streaming further
    /// events when this operation is cancelled.
    #[inline]
    pub async fn complete(
        &self,
        req: ModelRequest,
    ) -> Result<String, Box<dyn ModelProviderError>> {
        (self.handler_fn)(req).await
    }
}

impl fmt::Debug for ModelClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelClient").finish_non_exhaustive()
    }
}

async fn drain_response<P: ModelProvider + 'static>(
    resp_or_err: Result<P::Response, P::Error>,
) -> CompleteResult {
    let resp = match resp_or_err {
        Ok(resp) => resp,
        Err(err) => {
            error!(kind = %err.kind(), "request failed: {err}");
            return Err(Box::new(err));
        }
    };

    let mut text = String::new();
    let mut pinned_resp = pin!(resp);
    loop {
        let event_or_err =
            poll_fn(|cx| pinned_resp.as_mut().poll_next_event(cx)).await;
        let event = match event_or_err {
            Ok(Some(event)) => event,
            Ok(None) => break,
            Err(err) => {
                error!(kind = %err.kind(), "response failed: {err}");
                return Err(Box::new(err));
            }
        };

        match event {
            ModelResponseEvent::MessageDelta(delta) => text.push_str(&delta),
            ModelResponseEvent::Completed(ModelFinishReason::Stop) => {}
            ModelResponseEvent::Completed(reason) => {
                warn!(?reason, "reply ended early");
            }
        }
    }

    trace!(len = text.len(), "finished a request");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use raiox_model::{ErrorKind, ModelMessage};
    use raiox_test_model::{PresetEvent, PresetResponse, TestModelProvider};

    use super::*;

    fn request() -> ModelRequest {
        ModelRequest::deterministic(vec![ModelMessage::User("Oi".to_owned())])
    }

    #[tokio::test]
    async fn test_complete() {
        let provider = TestModelProvider::default();
        for _ in 0..3 {
            provider.push_response(PresetResponse::with_events([
                PresetEvent::MessageDelta("Tudo ".to_owned()),
                PresetEvent::MessageDelta("bem?".to_owned()),
            ]));
        }

        let client = ModelClient::new(provider.clone());
        for _ in 0..3 {
            assert_eq!(client.complete(request()).await.unwrap(), "Tudo bem?");
        }
        assert_eq!(provider.request_count(), 3);
        assert_eq!(provider.requests()[0], request());
    }

    #[tokio::test]
    async fn test_error_handling() {
        let provider = TestModelProvider::default();
        provider.push_response(PresetResponse::rejected("quota exceeded"));
        let client = ModelClient::new(provider);

        let err = client.complete(request()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
        assert_eq!(err.to_string(), "quota exceeded");

        // The script is exhausted now.
        let err = client.complete(request()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
        assert_eq!(err.to_string(), "no preset response left");
    }

    #[tokio::test]
    async fn test_failure_mid_stream() {
        let provider = TestModelProvider::default();
        provider.push_response(PresetResponse::with_events([
            PresetEvent::MessageDelta("Parcial".to_owned()),
            PresetEvent::Fail("connection reset".to_owned()),
        ]));
        let client = ModelClient::new(provider);

        let err = client.complete(request()).await.unwrap_err();
        assert_eq!(err.to_string(), "connection reset");
    }
}
