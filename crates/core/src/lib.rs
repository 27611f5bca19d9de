//! `warden-core`: foundation building blocks shared by every crate.
//!
//! This crate contains **pure** primitives (identifiers, the entity contract,
//! the error taxonomy). No storage, hashing, or IO concerns live here.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::{Entity, EntityKind};
pub use error::{DomainError, DomainResult, LookupKey};
pub use id::{PermissionId, RoleId, UserId};
