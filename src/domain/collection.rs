//! Collection Entity
//!
//! A user-owned, named, ordered container of component items.
//! `position` is the display ordering key among one owner's collections.

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};
use super::item::CollectionItem;

/// Maximum collection name length, in characters, after trimming
pub const MAX_NAME_LEN: usize = 100;

/// A named collection belonging to exactly one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    /// Unique identifier (assigned by the database)
    pub id: i64,
    /// Authenticated user id; immutable after creation
    pub owner_id: String,
    /// Display name (non-blank, trimmed, <= 100 chars)
    pub name: String,
    /// Ordering key among this owner's collections, densely assigned from 0
    pub position: i64,
    /// Unix millis
    pub created_at: i64,
    /// Unix millis
    pub updated_at: i64,
}

impl Collection {
    /// Validate and normalize a collection name.
    ///
    /// Returns the trimmed name, or `InvalidInput` when blank or over
    /// `MAX_NAME_LEN` characters.
    pub fn validate_name(name: &str) -> DomainResult<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidInput(
                "Collection name is required".to_string(),
            ));
        }
        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::InvalidInput(format!(
                "Collection name too long (max {} characters)",
                MAX_NAME_LEN
            )));
        }
        Ok(trimmed.to_string())
    }
}

impl Entity for Collection {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Identifier type used wherever a collection is referenced by id
pub type CollectionId = <Collection as Entity>::Id;

/// A collection composed with its ordered items.
///
/// A collection with no items carries an empty list, never an absent one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionWithItems {
    #[serde(flatten)]
    pub collection: Collection,
    pub items: Vec<CollectionItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_trims() {
        let name = Collection::validate_name("  Frontend  ").unwrap();
        assert_eq!(name, "Frontend");
    }

    #[test]
    fn test_validate_name_rejects_blank() {
        assert!(Collection::validate_name("").is_err());
        assert!(Collection::validate_name("   ").is_err());
    }

    #[test]
    fn test_validate_name_rejects_overlong() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(
            Collection::validate_name(&long),
            Err(DomainError::InvalidInput(_))
        ));
        // Exactly at the limit is fine
        let max = "x".repeat(MAX_NAME_LEN);
        assert!(Collection::validate_name(&max).is_ok());
    }

    #[test]
    fn test_surrounding_whitespace_does_not_count_toward_limit() {
        let padded = format!("  {}  ", "x".repeat(MAX_NAME_LEN));
        assert!(Collection::validate_name(&padded).is_ok());
    }
}
