//! Common ID Types
//!
//! Type-safe ID wrappers for stored documents.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::app_error::{AppError, AppResult};

/// Generic typed ID wrapper
///
/// Serialized as a bare UUID string so documents keep a plain `_id` field.
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type OrderId = Id<markers::Order>;
/// let id = OrderId::new();
/// assert_eq!(OrderId::parse_str(&id.to_string()).unwrap(), id);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: Uuid,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Create a new random ID (UUID v4)
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Create from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            value: uuid,
            _marker: PhantomData,
        }
    }

    /// Parse a path parameter, rejecting malformed input with 400
    pub fn parse_str(s: &str) -> AppResult<Self> {
        Uuid::parse_str(s.trim())
            .map(Self::from_uuid)
            .map_err(AppError::from)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.value
    }

    pub fn into_uuid(self) -> Uuid {
        self.value
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> FromStr for Id<T> {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Self::parse_str(s)
    }
}

impl<T> From<Uuid> for Id<T> {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl<T> From<Id<T>> for Uuid {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Uuid::deserialize(deserializer).map(Self::from_uuid)
    }
}

/// Marker types for different document IDs
pub mod markers {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StaffUser;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GuestUser;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Item;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Order;
}

pub type StaffUserId = Id<markers::StaffUser>;
pub type GuestUserId = Id<markers::GuestUser>;
pub type ItemId = Id<markers::Item>;
pub type OrderId = Id<markers::Order>;
