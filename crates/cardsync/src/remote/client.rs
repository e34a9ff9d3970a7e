//! GraphQL transport: request construction, auth, response envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::RemoteError;

pub const DEFAULT_ENDPOINT: &str = "https://api.graph.cool/simple/v1/metaxdb";

#[derive(Serialize)]
struct RequestPayload<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<Value>,
}

#[derive(Deserialize)]
struct ResponseEnvelope {
    #[serde(default)]
    data: Value,
    #[serde(default)]
    errors: Vec<ApiError>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

/// A thin client around one GraphQL endpoint. Owns transport, bearer auth
/// and envelope handling; the typed operations live in
/// [`super::api::RemoteApi`].
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl GraphqlClient {
    pub fn new(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    /// Executes one document. Returns the envelope's `data` payload; a
    /// non-empty `errors` array short-circuits into [`RemoteError::Api`].
    pub async fn request(
        &self,
        document: &str,
        variables: Option<Value>,
    ) -> Result<Value, RemoteError> {
        let query = compact_query(document);
        let payload = RequestPayload {
            query: &query,
            variables,
        };

        let body = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        parse_envelope(&body)
    }
}

/// The embedded documents are indented for readability; the endpoint wants
/// single-line query text.
fn compact_query(document: &str) -> String {
    document.replace('\n', " ").trim().to_string()
}

fn parse_envelope(body: &[u8]) -> Result<Value, RemoteError> {
    let envelope: ResponseEnvelope = serde_json::from_slice(body)?;

    if let Some(error) = envelope.errors.first() {
        return Err(RemoteError::Api {
            message: error.message.clone(),
        });
    }

    Ok(envelope.data)
}
