use crate::core::oracle::{LabelScore, OracleError, TextClassifier};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Zero-shot classifier backed by the Hugging Face inference API
///
/// Sends `{"inputs": ..., "parameters": {"candidate_labels": [...]}}` to
/// `{base_url}/models/{model}` and normalizes the response into labels sorted
/// by descending confidence.
pub struct HuggingFaceClassifier {
    base_url: String,
    model: String,
    api_token: Option<String>,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Debug, Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [&'a str],
}

/// The API answers either in the pipeline layout or as a list of pairs
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZeroShotResponse {
    Pipeline { labels: Vec<String>, scores: Vec<f64> },
    Pairs(Vec<LabelPair>),
}

#[derive(Debug, Deserialize)]
struct LabelPair {
    label: String,
    score: f64,
}

impl HuggingFaceClassifier {
    /// Create a new classifier client
    pub fn new(
        base_url: String,
        model: String,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, OracleError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OracleError::Unavailable(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            model,
            api_token: api_token.filter(|t| !t.is_empty()),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}", self.base_url.trim_end_matches('/'), self.model)
    }
}

impl ZeroShotResponse {
    fn into_ranked(self) -> Result<Vec<LabelScore>, OracleError> {
        let mut ranked: Vec<LabelScore> = match self {
            ZeroShotResponse::Pipeline { labels, scores } => {
                if labels.len() != scores.len() {
                    return Err(OracleError::MalformedResponse(format!(
                        "{} labels but {} scores",
                        labels.len(),
                        scores.len()
                    )));
                }
                labels
                    .into_iter()
                    .zip(scores)
                    .map(|(label, score)| LabelScore::new(label, score))
                    .collect()
            }
            ZeroShotResponse::Pairs(pairs) => pairs
                .into_iter()
                .map(|p| LabelScore::new(p.label, p.score))
                .collect(),
        };

        ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        Ok(ranked)
    }
}

#[async_trait]
impl TextClassifier for HuggingFaceClassifier {
    async fn classify(&self, text: &str, labels: &[&str]) -> Result<Vec<LabelScore>, OracleError> {
        let url = self.endpoint();
        let body = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters {
                candidate_labels: labels,
            },
        };

        tracing::debug!("Classifying against {:?} via {}", labels, url);

        let mut request = self.client.post(&url).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| OracleError::Unavailable(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Classifier returned {}: {}", status, body);
            return Err(OracleError::Unavailable(format!("classifier returned {}", status)));
        }

        let parsed: ZeroShotResponse = response
            .json()
            .await
            .map_err(|e| OracleError::MalformedResponse(format!("failed to parse classification: {}", e)))?;

        parsed.into_ranked()
    }
}
