use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use warden_auth::{derive_authorities, PasswordHash, Permission, Role, User};
use warden_core::{PermissionId, RoleId, UserId};

/// A user holding `roles` roles, each granting `perms_per_role` permissions.
/// Half of every role's permissions overlap with the previous role's, so
/// de-duplication is exercised.
fn user_with_graph(roles: usize, perms_per_role: usize) -> User {
    let roles = (0..roles)
        .map(|r| {
            let permissions = (0..perms_per_role)
                .map(|p| Permission::new(PermissionId::new(), format!("perm.{}", r * perms_per_role / 2 + p)))
                .collect();
            Role::new(RoleId::new(), format!("role{r}")).with_permissions(permissions)
        })
        .collect();

    User::new(UserId::new(), "bench", "bench@example.com", PasswordHash::new("h")).with_roles(roles)
}

fn bench_derivation_by_graph_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive_authorities");

    for (roles, perms) in [(1, 4), (4, 16), (16, 64), (64, 64)] {
        let user = user_with_graph(roles, perms);
        group.throughput(Throughput::Elements((roles * perms) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{roles}x{perms}")),
            &user,
            |b, user| b.iter(|| derive_authorities(black_box(user))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_derivation_by_graph_size);
criterion_main!(benches);
