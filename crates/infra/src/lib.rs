//! Infrastructure layer: persistence gateway, credential hashing, config,
//! and the registries/authenticator that compose them.

pub mod authenticator;
pub mod config;
pub mod gateway;
pub mod hasher;
pub mod registry;
pub mod wiring;

mod integration_tests;

pub use authenticator::Authenticator;
pub use config::{ConfigError, HasherConfig, WardenConfig};
pub use gateway::{GatewayError, InMemoryGateway, PersistenceGateway};
pub use hasher::Argon2Hasher;
pub use registry::{PermissionRegistry, RoleRegistry, UserRegistry};
pub use wiring::AccessControl;
