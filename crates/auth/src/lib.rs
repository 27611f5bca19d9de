//! `warden-auth`: pure access-control model (user → role → permission).
//!
//! This crate is intentionally decoupled from storage and hashing primitives:
//! it owns the entity shapes, the authority derivation rule, and the
//! credential-hasher contract that infrastructure implements.

pub mod authority;
pub mod authorize;
pub mod hasher;
pub mod permissions;
pub mod principal;
pub mod roles;
pub mod user;
pub mod view;

pub use authority::{derive_authorities, Authority, AuthoritySet, ROLE_PREFIX};
pub use authorize::{authorize, authorize_role, AuthzError};
pub use hasher::{CredentialHasher, HashError};
pub use permissions::Permission;
pub use principal::{AuthenticatedPrincipal, LoginSummary};
pub use roles::Role;
pub use user::{PasswordHash, User};
pub use view::{PermissionView, RoleView, UserView};
