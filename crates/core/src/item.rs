//! The `Item` entity, its status enumeration and write-side validation.
//!
//! Request bodies arrive as [`ItemInput`] with every field optional so a
//! missing `name` is reported as a validation error rather than a
//! deserialization failure. [`ItemInput::into_new_item`] turns a valid input
//! into a [`NewItem`] ready to be persisted.

use std::fmt;
use std::str::FromStr;

use serde::de::value::MapAccessDeserializer;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Entity name used in not-found errors.
pub const ITEM_ENTITY: &str = "Item";

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of an item. Closed set: anything else is rejected on write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Active,
    Inactive,
}

impl ItemStatus {
    /// Every valid status, in display order.
    pub const ALL: [ItemStatus; 2] = [ItemStatus::Active, ItemStatus::Inactive];

    /// The value stored in the `status` column and sent over the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Active => "active",
            ItemStatus::Inactive => "inactive",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ItemStatus::Active => "Active",
            ItemStatus::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ItemStatus::Active),
            "inactive" => Ok(ItemStatus::Inactive),
            other => Err(CoreError::Validation(format!(
                "status must be one of 'active', 'inactive' (got '{other}')"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A persisted item as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub status: ItemStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Write DTOs
// ---------------------------------------------------------------------------

/// Body of a create or update request. Only a JSON object deserializes into
/// it; arrays and scalars are rejected.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct ItemInput {
    #[validate(
        required(message = "name is required"),
        length(min = 1, message = "name is required")
    )]
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// Field layout of an [`ItemInput`] object.
#[derive(Deserialize)]
struct ItemInputFields {
    name: Option<String>,
    description: Option<String>,
    status: Option<String>,
}

struct ItemInputVisitor;

impl<'de> Visitor<'de> for ItemInputVisitor {
    type Value = ItemInput;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an item object")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<ItemInput, A::Error> {
        let fields = ItemInputFields::deserialize(MapAccessDeserializer::new(map))?;
        Ok(ItemInput {
            name: fields.name,
            description: fields.description,
            status: fields.status,
        })
    }
}

impl<'de> Deserialize<'de> for ItemInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ItemInputVisitor)
    }
}

/// A validated item ready to be written. Used for both inserts and full
/// overwrites on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
    pub status: ItemStatus,
}

impl ItemInput {
    /// Validate the input and convert it into a [`NewItem`].
    ///
    /// An omitted `status` defaults to [`ItemStatus::Active`].
    pub fn into_new_item(self) -> Result<NewItem, CoreError> {
        self.validate()
            .map_err(|errors| CoreError::Validation(first_message(&errors)))?;

        let status = match self.status.as_deref() {
            None => ItemStatus::default(),
            Some(raw) => raw.parse()?,
        };

        Ok(NewItem {
            name: self.name.unwrap_or_default(),
            description: self.description,
            status,
        })
    }
}

/// Pick the first human-readable message out of a set of validation errors.
fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}
