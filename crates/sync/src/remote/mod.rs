//! Remote document service client.
//!
//! The document service is an opaque per-collection key-document store:
//! list all documents, add one (the server assigns the id and creation
//! timestamp), update fields by id, delete by id. [`DocumentStore`] is the
//! seam the sync actions call through; [`HttpDocumentStore`] talks to the
//! hosted service and [`MemoryDocumentStore`] is the in-process double used
//! by tests.

mod http;
mod memory;

pub use http::HttpDocumentStore;
pub use memory::{MemoryDocumentStore, Op};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use opsdeck_core::Timestamp;

/// A stored document's field map.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// The three synchronized collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Customers,
    Deals,
    Tasks,
}

impl Collection {
    /// Collection name as the document service spells it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Deals => "deals",
            Self::Tasks => "tasks",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire form of one stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Server-assigned identifier.
    pub id: String,
    /// Creation timestamp the service assigned. Old documents written
    /// before the service stamped creations may lack one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    /// The stored field map.
    pub fields: Fields,
}

/// Acknowledgement of a create call: the identity the server assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentHandle {
    /// Server-assigned identifier.
    pub id: String,
    /// Server-assigned creation timestamp.
    pub created_at: Timestamp,
}

/// Errors turning a wire document into a typed entity.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The stored fields do not match the entity shape.
    #[error("invalid document fields: {0}")]
    Fields(#[from] serde_json::Error),

    /// The document carries no creation timestamp.
    #[error("document {0} has no creation timestamp")]
    MissingCreatedAt(String),

    /// The creation timestamp is outside the representable range.
    #[error("document {0} has an out-of-range creation timestamp")]
    TimestampRange(String),
}

/// Errors raised by document service calls.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service rejected the request.
    #[error("Service error ({status}): {message}")]
    Api {
        /// HTTP status code, or 0 when the failure was not HTTP-shaped.
        status: u16,
        /// Truncated response body or injected failure description.
        message: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Document or collection not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The API key was rejected.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// A stored document could not be decoded into its entity shape.
    #[error("Bad document: {0}")]
    BadDocument(#[from] DecodeError),
}

/// Per-collection operations the document service exposes.
///
/// Object-safe so callers hold `Arc<dyn DocumentStore>` and swap the HTTP
/// client for the in-memory double in tests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List every document in a collection.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] if the call fails.
    async fn list_all(&self, collection: Collection) -> Result<Vec<Document>, ServiceError>;

    /// Add a document; the server assigns the id and creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] if the call fails. Nothing is stored on
    /// failure.
    async fn add(
        &self,
        collection: Collection,
        fields: Fields,
    ) -> Result<DocumentHandle, ServiceError>;

    /// Merge fields into an existing document (top-level merge).
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if no document has that id, or
    /// another [`ServiceError`] if the call fails.
    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Fields,
    ) -> Result<(), ServiceError>;

    /// Delete a document. Deleting an id that no longer exists succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] if the call fails.
    async fn delete(&self, collection: Collection, id: &str) -> Result<(), ServiceError>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::Customers.as_str(), "customers");
        assert_eq!(Collection::Deals.to_string(), "deals");
        assert_eq!(
            serde_json::to_value(Collection::Tasks).unwrap(),
            serde_json::json!("tasks")
        );
    }

    #[test]
    fn test_service_error_display() {
        let err = ServiceError::NotFound("customers/c-42".to_string());
        assert_eq!(err.to_string(), "Not found: customers/c-42");

        let err = ServiceError::Api {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "Service error (503): maintenance");
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::MissingCreatedAt("t-7".to_string());
        assert_eq!(err.to_string(), "document t-7 has no creation timestamp");

        let wrapped = ServiceError::BadDocument(DecodeError::TimestampRange("t-7".to_string()));
        assert_eq!(
            wrapped.to_string(),
            "Bad document: document t-7 has an out-of-range creation timestamp"
        );
    }

    #[test]
    fn test_document_wire_shape() {
        let json = serde_json::json!({
            "id": "d-1",
            "createdAt": {"seconds": 1_700_000_000_i64, "nanos": 0},
            "fields": {"city": "Springfield"},
        });
        let document: Document = serde_json::from_value(json).unwrap();
        assert_eq!(document.id, "d-1");
        assert_eq!(
            document.created_at,
            Some(Timestamp {
                seconds: 1_700_000_000,
                nanos: 0
            })
        );
        assert_eq!(
            document.fields.get("city"),
            Some(&serde_json::json!("Springfield"))
        );
    }

    #[test]
    fn test_document_created_at_optional() {
        let json = serde_json::json!({"id": "d-2", "fields": {}});
        let document: Document = serde_json::from_value(json).unwrap();
        assert_eq!(document.created_at, None);
    }
}
