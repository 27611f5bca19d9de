//! Integration tests for the full access-control pipeline.
//!
//! Tests: Registry → Gateway → Hydration → Authority derivation → Authenticator
//!
//! Verifies:
//! - Assignments are observed by the next derivation
//! - Failed assignments leave associations untouched
//! - Authentication failures are indistinguishable
//! - Concurrent readers never observe a half-applied assignment

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use warden_auth::{authorize, authorize_role, derive_authorities, Authority, UserView};
    use warden_core::{DomainError, EntityKind, LookupKey, PermissionId};

    use crate::config::{HasherConfig, WardenConfig};
    use crate::gateway::InMemoryGateway;
    use crate::hasher::Argon2Hasher;
    use crate::wiring::AccessControl;

    type Warden = AccessControl<Arc<InMemoryGateway>, Argon2Hasher>;

    fn setup() -> Warden {
        warden_observability::init();

        let config = WardenConfig {
            hasher: HasherConfig {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            },
        };
        AccessControl::in_memory(&config).unwrap()
    }

    #[test]
    fn viewer_scenario_derives_role_and_permission() {
        let warden = setup();

        let read = warden.permissions.create_permission("read").unwrap();
        let viewer = warden.roles.create_role("viewer").unwrap();
        warden.roles.assign_permissions_to_role(viewer.id, [read.id]).unwrap();
        let alice = warden.users.register_user("alice", "alice@example.com", "pw").unwrap();
        warden.users.assign_roles_to_user(alice.id, [viewer.id]).unwrap();

        let alice = warden.users.find_user_by_id(alice.id).unwrap();
        let authorities = derive_authorities(&alice);

        assert_eq!(authorities.to_strings(), vec!["READ", "ROLE_VIEWER"]);
    }

    #[test]
    fn permission_shared_by_two_roles_is_collapsed() {
        let warden = setup();

        let read = warden.permissions.create_permission("read").unwrap();
        let write = warden.permissions.create_permission("write").unwrap();
        let admin = warden.roles.create_role("admin").unwrap();
        let viewer = warden.roles.create_role("viewer").unwrap();
        warden.roles.assign_permissions_to_role(admin.id, [read.id, write.id]).unwrap();
        warden.roles.assign_permissions_to_role(viewer.id, [read.id]).unwrap();
        let bob = warden.users.register_user("bob", "bob@example.com", "pw").unwrap();
        warden.users.assign_roles_to_user(bob.id, [admin.id, viewer.id]).unwrap();

        let bob = warden.users.find_by_username("bob").unwrap();
        let first = derive_authorities(&bob);
        let second = derive_authorities(&bob);

        assert_eq!(first, second);
        assert_eq!(first.to_strings(), vec!["READ", "ROLE_ADMIN", "ROLE_VIEWER", "WRITE"]);
    }

    #[test]
    fn role_permission_changes_are_seen_by_next_derivation() {
        let warden = setup();

        let read = warden.permissions.create_permission("read").unwrap();
        let write = warden.permissions.create_permission("write").unwrap();
        let editor = warden.roles.create_role("editor").unwrap();
        let carol = warden.users.register_user("carol", "carol@example.com", "pw").unwrap();
        warden.users.assign_roles_to_user(carol.id, [editor.id]).unwrap();

        let before = warden.authenticator.authenticate("carol", "pw").unwrap();
        assert_eq!(before.authorities.to_strings(), vec!["ROLE_EDITOR"]);

        warden.roles.assign_permissions_to_role(editor.id, [read.id, write.id]).unwrap();

        let after = warden.authenticator.authenticate("carol", "pw").unwrap();
        assert_eq!(after.authorities.to_strings(), vec!["READ", "ROLE_EDITOR", "WRITE"]);
    }

    #[test]
    fn partial_permission_assignment_is_rolled_back() {
        let warden = setup();

        let read = warden.permissions.create_permission("read").unwrap();
        let write = warden.permissions.create_permission("write").unwrap();
        let role = warden.roles.create_role("editor").unwrap();
        warden.roles.assign_permissions_to_role(role.id, [read.id]).unwrap();

        let invalid = PermissionId::new();
        let err = warden
            .roles
            .assign_permissions_to_role(role.id, [write.id, invalid])
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::not_found(EntityKind::Permission, LookupKey::id(invalid))
        );
        let role = warden.roles.find_role_by_id(role.id).unwrap();
        let names: Vec<&str> = role.permissions.iter().map(|p| p.as_str()).collect();
        assert_eq!(names, vec!["read"]);
    }

    #[test]
    fn authentication_returns_the_derived_authorities() {
        let warden = setup();

        let read = warden.permissions.create_permission("read").unwrap();
        let viewer = warden.roles.create_role("viewer").unwrap();
        warden.roles.assign_permissions_to_role(viewer.id, [read.id]).unwrap();
        let alice = warden.users.register_user("alice", "alice@example.com", "correct horse").unwrap();
        warden.users.assign_roles_to_user(alice.id, [viewer.id]).unwrap();

        let principal = warden.authenticator.authenticate("alice", "correct horse").unwrap();
        let direct = derive_authorities(&warden.users.find_by_username("alice").unwrap());

        assert_eq!(principal.user_id, alice.id);
        assert_eq!(principal.authorities, direct);
        assert!(authorize(&principal, &Authority::for_permission("read")).is_ok());
        assert!(authorize_role(&principal, "viewer").is_ok());
        assert!(authorize_role(&principal, "admin").is_err());

        let summary = principal.summary();
        assert_eq!(summary.username, "alice");
        assert_eq!(summary.email, "alice@example.com");
    }

    #[test]
    fn wrong_password_and_unknown_user_fail_identically() {
        let warden = setup();
        warden.users.register_user("alice", "alice@example.com", "right").unwrap();

        let wrong_password = warden.authenticator.authenticate("alice", "wrong").unwrap_err();
        let unknown_user = warden.authenticator.authenticate("mallory", "right").unwrap_err();

        assert_eq!(wrong_password, DomainError::Authentication);
        assert_eq!(unknown_user, wrong_password);
        assert_eq!(unknown_user.to_string(), wrong_password.to_string());
    }

    #[test]
    fn user_without_roles_authenticates_with_no_authorities() {
        let warden = setup();
        warden.users.register_user("dave", "dave@example.com", "pw").unwrap();

        let principal = warden.authenticator.authenticate("dave", "pw").unwrap();

        assert!(principal.authorities.is_empty());
    }

    #[test]
    fn user_view_serializes_graph_without_credentials() {
        let warden = setup();
        let read = warden.permissions.create_permission("read").unwrap();
        let viewer = warden.roles.create_role("viewer").unwrap();
        warden.roles.assign_permissions_to_role(viewer.id, [read.id]).unwrap();
        let erin = warden.users.register_user("erin", "erin@example.com", "hunter2").unwrap();
        warden.users.assign_roles_to_user(erin.id, [viewer.id]).unwrap();

        let erin = warden.users.find_user_by_id(erin.id).unwrap();
        let json = serde_json::to_value(UserView::from(&erin)).unwrap();

        assert_eq!(json["username"], "erin");
        assert_eq!(json["roles"][0]["name"], "viewer");
        assert_eq!(json["roles"][0]["permissions"][0]["name"], "read");
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn padded_username_authenticates_like_the_stored_one() {
        let warden = setup();
        let alice = warden.users.register_user("alice ", "alice@example.com", "pw").unwrap();

        let padded = warden.authenticator.authenticate("alice ", "pw").unwrap();
        let exact = warden.authenticator.authenticate("alice", "pw").unwrap();

        assert_eq!(padded.user_id, alice.id);
        assert_eq!(exact.user_id, alice.id);
        assert_eq!(padded.username, "alice");
    }

    #[test]
    fn permissions_cannot_grant_role_authorities() {
        let warden = setup();

        let err = warden.permissions.create_permission("role_admin").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let read = warden.permissions.create_permission("read").unwrap();
        let viewer = warden.roles.create_role("viewer").unwrap();
        warden.roles.assign_permissions_to_role(viewer.id, [read.id]).unwrap();
        let bob = warden.users.register_user("bob", "bob@example.com", "pw").unwrap();
        warden.users.assign_roles_to_user(bob.id, [viewer.id]).unwrap();

        let principal = warden.authenticator.authenticate("bob", "pw").unwrap();

        assert_eq!(principal.authorities.roles(), vec!["ROLE_VIEWER"]);
        assert!(!principal.authorities.has_role("admin"));
        assert!(authorize_role(&principal, "admin").is_err());
    }

    #[test]
    fn concurrent_readers_never_see_half_applied_assignments() {
        let warden = Arc::new(setup());

        let names = ["a", "b", "c", "d", "e", "f"];
        let perms: Vec<PermissionId> = names
            .iter()
            .map(|n| warden.permissions.create_permission(n).unwrap().id)
            .collect();
        let role = warden.roles.create_role("rotating").unwrap();
        let user_id = warden.users.register_user("frank", "frank@example.com", "pw").unwrap().id;
        let role_id = role.id;
        warden.users.assign_roles_to_user(user_id, [role_id]).unwrap();

        let (first_half, second_half) = perms.split_at(3);
        let first_half = first_half.to_vec();
        let second_half = second_half.to_vec();
        warden.roles.assign_permissions_to_role(role_id, first_half.clone()).unwrap();

        let writer = {
            let warden = warden.clone();
            thread::spawn(move || {
                for i in 0..200 {
                    let next = if i % 2 == 0 { &second_half } else { &first_half };
                    warden.roles.assign_permissions_to_role(role_id, next.clone()).unwrap();
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let warden = warden.clone();
                thread::spawn(move || {
                    for _ in 0..200 {
                        let user = warden.users.find_user_by_id(user_id).unwrap();
                        let permissions = derive_authorities(&user).permissions().join(",");
                        assert!(
                            permissions == "A,B,C" || permissions == "D,E,F",
                            "observed partial set: {permissions}"
                        );
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    }
}
