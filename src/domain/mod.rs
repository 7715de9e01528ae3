//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde for serialization).

mod collection;
mod entity;
mod item;

pub use collection::{Collection, CollectionId, CollectionWithItems, MAX_NAME_LEN};
pub use entity::{DomainError, DomainResult, Entity};
pub use item::{CollectionItem, ItemId, NewCollectionItem};
