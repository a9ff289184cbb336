use raiox_model::{ModelMessage, ModelRequest};

use crate::dataset::CustomerRecord;
use crate::model_client::ModelClient;
use crate::prompt;

/// Asks the model for a summary of `record`.
///
/// Never fails: a provider error is turned into a display string carrying
/// the error message.
pub async fn summarize(client: &ModelClient, record: &CustomerRecord) -> String {
    debug!(identifier = record.identifier(), "generating summary");
    let request = ModelRequest::deterministic(vec![ModelMessage::User(
        prompt::summary_prompt(record),
    )]);
    match client.complete(request).await {
        Ok(reply) => reply.trim().to_owned(),
        Err(err) => format!("Erro ao chamar API: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use raiox_model::Sampling;
    use raiox_test_model::{PresetResponse, TestModelProvider};

    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn test_summarize() {
        let provider = TestModelProvider::default();
        provider.push_response(PresetResponse::with_text(
            "\n  Cliente HFC em Campinas, sem visitas técnicas.  \n",
        ));
        let client = ModelClient::new(provider.clone());
        let dataset = fixtures::dataset(&[("C-1", "Campinas")]);
        let record = dataset.find("C-1").unwrap();

        let summary = summarize(&client, record).await;
        assert_eq!(summary, "Cliente HFC em Campinas, sem visitas técnicas.");

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].sampling, Sampling::Deterministic);
        assert_eq!(
            requests[0].messages,
            [ModelMessage::User(prompt::summary_prompt(record))]
        );
    }

    #[tokio::test]
    async fn test_summarize_failure() {
        let provider = TestModelProvider::default();
        provider.push_response(PresetResponse::rejected("timeout"));
        let client = ModelClient::new(provider);
        let dataset = fixtures::dataset(&[("C-1", "Campinas")]);

        let summary = summarize(&client, dataset.find("C-1").unwrap()).await;
        assert_eq!(summary, "Erro ao chamar API: timeout");
    }
}
