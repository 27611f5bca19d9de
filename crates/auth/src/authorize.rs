use thiserror::Error;

use crate::{AuthenticatedPrincipal, Authority};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing authority '{0}'")]
    Forbidden(String),
}

/// Check that a principal holds an exact authority token.
///
/// Tokens are compared verbatim: `READ` and `ROLE_READ` are different grants.
pub fn authorize(principal: &AuthenticatedPrincipal, required: &Authority) -> Result<(), AuthzError> {
    if principal.authorities.contains(required.as_str()) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}

/// Check that a principal holds a role, given the role's stored name.
pub fn authorize_role(principal: &AuthenticatedPrincipal, role_name: &str) -> Result<(), AuthzError> {
    authorize(principal, &Authority::for_role(role_name))
}
