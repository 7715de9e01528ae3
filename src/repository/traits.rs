//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can use SQLite, in-memory, etc.
//!
//! Every method takes the already-authenticated owner id; implementations
//! must scope every read and write to it. Entities are referenced by their
//! `Entity::Id` types.

use async_trait::async_trait;

use crate::domain::{
    CollectionId, CollectionItem, CollectionWithItems, DomainResult, ItemId, NewCollectionItem,
};

/// Store for a user's collections and their display order
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// List the owner's collections in `(position, created_at)` order, each
    /// with its items in `added_at` order
    async fn list_with_items(&self, owner_id: &str) -> DomainResult<Vec<CollectionWithItems>>;

    /// Create a collection at the next free position
    async fn create(&self, owner_id: &str, name: &str) -> DomainResult<CollectionWithItems>;

    /// Rename an owned collection
    async fn rename(
        &self,
        owner_id: &str,
        collection_id: CollectionId,
        name: &str,
    ) -> DomainResult<CollectionWithItems>;

    /// Delete an owned collection and all of its items
    async fn delete(&self, owner_id: &str, collection_id: CollectionId) -> DomainResult<()>;
}

/// Store for the items placed inside collections
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Add a component to an owned collection; `Conflict` when its path is
    /// already present there
    async fn add(
        &self,
        owner_id: &str,
        collection_id: CollectionId,
        draft: &NewCollectionItem,
    ) -> DomainResult<CollectionItem>;

    /// Delete the item matching `(item_id, collection_id)` from an owned
    /// collection. Succeeds whether or not such a row existed.
    async fn remove(
        &self,
        owner_id: &str,
        collection_id: CollectionId,
        item_id: ItemId,
    ) -> DomainResult<()>;

    /// Move an item between two owned collections. `NotFound` when the item
    /// is not currently in `from_id`.
    async fn move_between(
        &self,
        owner_id: &str,
        item_id: ItemId,
        from_id: CollectionId,
        to_id: CollectionId,
    ) -> DomainResult<CollectionItem>;
}
