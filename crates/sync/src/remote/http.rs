//! HTTP implementation of the document service client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;
use url::Url;

use crate::config::RemoteConfig;

use super::{Collection, Document, DocumentHandle, DocumentStore, Fields, ServiceError};

/// Client for the hosted document service.
///
/// Authenticates with an `X-Api-Key` header. Endpoints:
///
/// ```text
/// GET    {base}/v1/collections/{name}/documents
/// POST   {base}/v1/collections/{name}/documents
/// PATCH  {base}/v1/collections/{name}/documents/{id}
/// DELETE {base}/v1/collections/{name}/documents/{id}
/// ```
#[derive(Clone)]
pub struct HttpDocumentStore {
    inner: Arc<Inner>,
}

struct Inner {
    client: reqwest::Client,
    base_url: Url,
    api_key: SecretString,
}

#[derive(serde::Deserialize)]
struct ListResponse {
    documents: Vec<Document>,
}

#[derive(serde::Serialize)]
struct FieldsBody {
    fields: Fields,
}

impl HttpDocumentStore {
    /// Create a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &RemoteConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            inner: Arc::new(Inner {
                client,
                base_url: config.base_url.clone(),
                api_key: config.api_key.clone(),
            }),
        })
    }

    fn collection_url(&self, collection: Collection) -> String {
        format!(
            "{}/v1/collections/{collection}/documents",
            self.inner.base_url.as_str().trim_end_matches('/')
        )
    }

    fn document_url(&self, collection: Collection, id: &str) -> String {
        format!("{}/{id}", self.collection_url(collection))
    }

    /// Send a request and return the response body text.
    ///
    /// Non-success statuses map onto the error taxonomy; bodies are logged
    /// truncated so a misbehaving service cannot flood the log.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        context: &str,
    ) -> Result<String, ServiceError> {
        let response = request
            .header("X-Api-Key", self.inner.api_key.expose_secret())
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ServiceError::NotFound(context.to_owned()));
        }
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ServiceError::PermissionDenied(context.to_owned()));
        }
        if !status.is_success() {
            tracing::error!(
                status = %status,
                context = %context,
                body = %response_text.chars().take(500).collect::<String>(),
                "Document service returned non-success status"
            );
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message: response_text.chars().take(200).collect(),
            });
        }

        Ok(response_text)
    }

    fn parse<T: serde::de::DeserializeOwned>(
        context: &str,
        response_text: &str,
    ) -> Result<T, ServiceError> {
        serde_json::from_str(response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                context = %context,
                body = %response_text.chars().take(500).collect::<String>(),
                "Failed to parse document service response"
            );
            ServiceError::Parse(e)
        })
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    #[instrument(skip(self), fields(collection = %collection))]
    async fn list_all(&self, collection: Collection) -> Result<Vec<Document>, ServiceError> {
        let context = collection.as_str();
        let request = self.inner.client.get(self.collection_url(collection));

        let body = self.send(request, context).await?;
        let response: ListResponse = Self::parse(context, &body)?;
        Ok(response.documents)
    }

    #[instrument(skip(self, fields), fields(collection = %collection))]
    async fn add(
        &self,
        collection: Collection,
        fields: Fields,
    ) -> Result<DocumentHandle, ServiceError> {
        let context = collection.as_str();
        let request = self
            .inner
            .client
            .post(self.collection_url(collection))
            .json(&FieldsBody { fields });

        let body = self.send(request, context).await?;
        Self::parse(context, &body)
    }

    #[instrument(skip(self, fields), fields(collection = %collection, id = %id))]
    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Fields,
    ) -> Result<(), ServiceError> {
        let context = format!("{collection}/{id}");
        let request = self
            .inner
            .client
            .patch(self.document_url(collection, id))
            .json(&FieldsBody { fields });

        self.send(request, &context).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(collection = %collection, id = %id))]
    async fn delete(&self, collection: Collection, id: &str) -> Result<(), ServiceError> {
        let context = format!("{collection}/{id}");
        let request = self.inner.client.delete(self.document_url(collection, id));

        self.send(request, &context).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn store() -> HttpDocumentStore {
        let config = RemoteConfig {
            base_url: "https://docs.example.com/".parse().unwrap(),
            api_key: SecretString::from("test-key"),
            timeout_secs: 10,
        };
        HttpDocumentStore::new(&config).unwrap()
    }

    #[test]
    fn test_collection_url_strips_trailing_slash() {
        assert_eq!(
            store().collection_url(Collection::Customers),
            "https://docs.example.com/v1/collections/customers/documents"
        );
    }

    #[test]
    fn test_document_url() {
        assert_eq!(
            store().document_url(Collection::Tasks, "t-9"),
            "https://docs.example.com/v1/collections/tasks/documents/t-9"
        );
    }
}
