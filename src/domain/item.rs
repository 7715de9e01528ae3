//! Collection Item Entity
//!
//! A reference to a reusable component (type, path, name, optional category)
//! placed inside exactly one collection at a time. `component_path` is unique
//! within a collection; `added_at` is the within-collection ordering key.

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

/// A component reference stored inside a collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionItem {
    /// Unique identifier (assigned by the database); survives moves
    pub id: i64,
    /// Owning collection
    pub collection_id: i64,
    pub component_type: String,
    pub component_path: String,
    pub component_name: String,
    pub component_category: Option<String>,
    /// Unix millis; within-collection ordering key
    pub added_at: i64,
}

impl Entity for CollectionItem {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Identifier type used wherever an item is referenced by id
pub type ItemId = <CollectionItem as Entity>::Id;

/// Input for adding an item to a collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCollectionItem {
    pub component_type: String,
    pub component_path: String,
    pub component_name: String,
    pub component_category: Option<String>,
}

impl NewCollectionItem {
    /// Require all mandatory component fields to be present and non-blank
    pub fn validate(&self) -> DomainResult<()> {
        if self.component_type.trim().is_empty()
            || self.component_path.trim().is_empty()
            || self.component_name.trim().is_empty()
        {
            return Err(DomainError::InvalidInput(
                "componentType, componentPath, and componentName are required".to_string(),
            ));
        }
        Ok(())
    }
}
