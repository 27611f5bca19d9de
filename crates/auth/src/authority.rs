//! Authority derivation: the user → role → permission graph flattened into
//! the string tokens an authorization layer checks against.
//!
//! The naming convention is a compatibility contract with downstream
//! consumers and must not change:
//!
//! - a role named `admin` becomes `ROLE_ADMIN`;
//! - a permission named `read` becomes `READ` (no prefix).

use std::borrow::Borrow;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::User;

/// Prefix marking an authority as a role grant.
pub const ROLE_PREFIX: &str = "ROLE_";

/// A single granted capability token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Authority(String);

impl Authority {
    /// Authority for a role: `ROLE_` + uppercased name.
    pub fn for_role(role_name: &str) -> Self {
        Self(format!("{ROLE_PREFIX}{}", role_name.to_uppercase()))
    }

    /// Authority for a permission: uppercased name, no prefix.
    pub fn for_permission(permission_name: &str) -> Self {
        Self(permission_name.to_uppercase())
    }

    /// Wrap an already-formatted token verbatim.
    pub fn from_token(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_role(&self) -> bool {
        self.0.starts_with(ROLE_PREFIX)
    }
}

// Ordering of `Authority` is the ordering of its token, so set lookups by
// `&str` agree with lookups by `Authority`.
impl Borrow<str> for Authority {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Authority {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// De-duplicated, lexicographically ordered set of authorities.
///
/// Ordering is deterministic so that two derivations over the same graph are
/// directly comparable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthoritySet(BTreeSet<Authority>);

impl AuthoritySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, authority: Authority) -> bool {
        self.0.insert(authority)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn has_role(&self, role_name: &str) -> bool {
        self.0.contains(&Authority::for_role(role_name))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Authority> {
        self.0.iter()
    }

    /// Role authorities only (`ROLE_`-prefixed), in order.
    pub fn roles(&self) -> Vec<&str> {
        self.0.iter().filter(|a| a.is_role()).map(Authority::as_str).collect()
    }

    /// Permission authorities only (no prefix), in order.
    pub fn permissions(&self) -> Vec<&str> {
        self.0.iter().filter(|a| !a.is_role()).map(Authority::as_str).collect()
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|a| a.as_str().to_string()).collect()
    }
}

impl FromIterator<Authority> for AuthoritySet {
    fn from_iter<I: IntoIterator<Item = Authority>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a AuthoritySet {
    type Item = &'a Authority;
    type IntoIter = std::collections::btree_set::Iter<'a, Authority>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Derive the effective authority set for a user.
///
/// - No IO
/// - No panics
/// - No caching: every call recomputes from the given graph
///
/// A user without roles derives an empty set; that is not an error.
pub fn derive_authorities(user: &User) -> AuthoritySet {
    let mut authorities = AuthoritySet::new();

    for role in &user.roles {
        authorities.insert(Authority::for_role(&role.name));

        for permission in &role.permissions {
            authorities.insert(Authority::for_permission(&permission.name));
        }
    }

    authorities
}
