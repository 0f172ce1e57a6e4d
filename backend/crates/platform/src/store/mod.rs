//! Document Store
//!
//! JSON documents grouped into named collections and keyed by `_id`.
//! Domain crates describe their entities with [`Document`] and reach a
//! collection through [`DocumentStoreExt::collection`].

mod memory;
mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

use std::marker::PhantomData;
use std::time::Duration;

use kernel::error::app_error::AppError;
use kernel::error::kind::ErrorKind;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// Field every stored document carries its id under
pub const ID_FIELD: &str = "_id";

/// Default deadline for a single store call
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// Errors
// ============================================================================

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store call exceeded its {0:?} deadline")]
    Timeout(Duration),

    #[error("Document must be a JSON object")]
    NotAnObject,

    #[error("Document {0} already exists")]
    Duplicate(Uuid),

    #[error("Document could not be encoded or decoded: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Classification used by domain error enums
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Timeout(_) => ErrorKind::RequestTimeout,
            StoreError::NotAnObject => ErrorKind::BadRequest,
            StoreError::Duplicate(_) => ErrorKind::Conflict,
            StoreError::Codec(_) => ErrorKind::InternalServerError,
            StoreError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)) => {
                ErrorKind::ServiceUnavailable
            }
            StoreError::Database(_) => ErrorKind::InternalServerError,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Timeout(_) => {
                AppError::request_timeout("store call timed out").with_source(err)
            }
            StoreError::NotAnObject => AppError::bad_request(err.to_string()),
            StoreError::Duplicate(_) => AppError::conflict(err.to_string()),
            StoreError::Codec(e) => AppError::internal("unable to decode document").with_source(e),
            StoreError::Database(e) => AppError::from(e),
        }
    }
}

// ============================================================================
// Store configuration
// ============================================================================

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Deadline applied to every database round trip
    pub timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}

impl StoreConfig {
    /// Read `STORE_TIMEOUT_SECS`, falling back to the default on absence
    /// or an unparsable value
    pub fn from_env() -> Self {
        let timeout = std::env::var("STORE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_STORE_TIMEOUT);

        Self { timeout }
    }
}

// ============================================================================
// Raw store trait
// ============================================================================

/// Collection-addressed JSON store
///
/// Every call is a single round trip; nothing is retried.
#[trait_variant::make(DocumentStore: Send)]
pub trait LocalDocumentStore {
    /// Store a new document; fails with `Duplicate` if the id is taken
    async fn insert(&self, collection: &str, id: Uuid, body: Value) -> StoreResult<()>;

    async fn find_by_id(&self, collection: &str, id: Uuid) -> StoreResult<Option<Value>>;

    /// First document whose top-level string `field` equals `value`
    async fn find_one_by(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> StoreResult<Option<Value>>;

    /// All documents in insertion order
    async fn find_all(&self, collection: &str) -> StoreResult<Vec<Value>>;

    /// Shallow merge of `patch` into the stored document
    ///
    /// Returns the merged document, or `None` when the id is unknown.
    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        patch: Map<String, Value>,
    ) -> StoreResult<Option<Value>>;

    /// Returns the number of documents removed (0 or 1)
    async fn delete(&self, collection: &str, id: Uuid) -> StoreResult<u64>;
}

// ============================================================================
// Typed collections
// ============================================================================

/// An entity stored as one JSON document
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name
    const COLLECTION: &'static str;

    fn id(&self) -> Uuid;
}

/// Handle bound to one named collection
pub struct Collection<'a, S, D> {
    store: &'a S,
    name: &'a str,
    _document: PhantomData<fn() -> D>,
}

impl<'a, S, D> Collection<'a, S, D>
where
    S: DocumentStore + Sync,
    D: Document,
{
    pub fn new(store: &'a S, name: &'a str) -> Self {
        Self {
            store,
            name,
            _document: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub async fn insert(&self, document: &D) -> StoreResult<Uuid> {
        let id = document.id();
        let body = serde_json::to_value(document)?;
        if !body.is_object() {
            return Err(StoreError::NotAnObject);
        }

        self.store.insert(self.name, id, body).await?;
        Ok(id)
    }

    pub async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<D>> {
        self.store
            .find_by_id(self.name, id)
            .await?
            .map(decode)
            .transpose()
    }

    pub async fn find_one_by(&self, field: &str, value: &str) -> StoreResult<Option<D>> {
        self.store
            .find_one_by(self.name, field, value)
            .await?
            .map(decode)
            .transpose()
    }

    pub async fn find_all(&self) -> StoreResult<Vec<D>> {
        self.store
            .find_all(self.name)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    /// Apply a partial update built from any serializable patch struct
    ///
    /// `null` fields and `_id` are dropped, so a patch with
    /// `skip_serializing_if = "Option::is_none"` fields sets only what was
    /// provided and can never rewrite the key.
    pub async fn update<P: Serialize>(&self, id: Uuid, patch: &P) -> StoreResult<Option<D>> {
        let Value::Object(mut fields) = serde_json::to_value(patch)? else {
            return Err(StoreError::NotAnObject);
        };
        fields.remove(ID_FIELD);
        fields.retain(|_, v| !v.is_null());

        self.store
            .update(self.name, id, fields)
            .await?
            .map(decode)
            .transpose()
    }

    pub async fn delete(&self, id: Uuid) -> StoreResult<u64> {
        self.store.delete(self.name, id).await
    }
}

fn decode<D: DeserializeOwned>(value: Value) -> StoreResult<D> {
    Ok(serde_json::from_value(value)?)
}

/// Collection accessor available on every store
pub trait DocumentStoreExt: DocumentStore + Sync + Sized {
    /// Collection named by the document type
    fn collection<D: Document>(&self) -> Collection<'_, Self, D> {
        Collection::new(self, D::COLLECTION)
    }

    /// Collection with an explicit name
    fn collection_named<'a, D: Document>(&'a self, name: &'a str) -> Collection<'a, Self, D> {
        Collection::new(self, name)
    }
}

impl<S: DocumentStore + Sync> DocumentStoreExt for S {}

/// Shallow `$set`-style merge used by stores that patch in memory
pub(crate) fn merge_fields(target: &mut Value, patch: Map<String, Value>) {
    if let Value::Object(fields) = target {
        for (key, value) in patch {
            if key != ID_FIELD {
                fields.insert(key, value);
            }
        }
    }
}
