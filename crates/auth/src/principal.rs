use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warden_core::UserId;

use crate::AuthoritySet;

/// Identity of an authenticated user together with its derived authorities.
///
/// The password hash is deliberately not carried here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedPrincipal {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub authorities: AuthoritySet,
    pub authenticated_at: DateTime<Utc>,
}

impl AuthenticatedPrincipal {
    pub fn summary(&self) -> LoginSummary {
        LoginSummary {
            user_id: self.user_id,
            username: self.username.clone(),
            email: self.email.clone(),
            message: "login succeeded".to_string(),
        }
    }
}

/// Minimal body returned to a client after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginSummary {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub message: String,
}
