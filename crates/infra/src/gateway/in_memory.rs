use std::sync::{Arc, PoisonError, RwLock};

use super::{
    GatewayError, PermissionRecord, PersistenceGateway, Record, RoleRecord, Session, Table, UserRecord,
};

/// One in-memory table. Rows are kept in insertion order.
#[derive(Debug, Clone)]
pub struct MemTable<R> {
    rows: Vec<R>,
}

impl<R> Default for MemTable<R> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<R: Record> MemTable<R> {
    fn ensure_unique(&self, record: &R) -> Result<(), GatewayError> {
        let clash = self
            .rows
            .iter()
            .any(|row| row.id() != record.id() && row.unique_key() == record.unique_key());

        if clash {
            return Err(GatewayError::UniqueViolation {
                entity: R::KIND,
                value: record.unique_key().to_string(),
            });
        }
        Ok(())
    }
}

impl<R: Record> Table<R> for MemTable<R> {
    fn insert(&mut self, new: R::New) -> Result<R, GatewayError> {
        let record = R::from_new(R::fresh_id(), new);
        self.ensure_unique(&record)?;
        self.rows.push(record.clone());
        Ok(record)
    }

    fn update(&mut self, record: R) -> Result<R, GatewayError> {
        self.ensure_unique(&record)?;

        let slot = self
            .rows
            .iter_mut()
            .find(|row| row.id() == record.id())
            .ok_or_else(|| GatewayError::MissingRow {
                entity: R::KIND,
                id: record.id().to_string(),
            })?;

        *slot = record.clone();
        Ok(record)
    }

    fn find_by_id(&self, id: &R::Id) -> Option<R> {
        self.rows.iter().find(|row| row.id() == id).cloned()
    }

    fn find_by_unique(&self, value: &str) -> Option<R> {
        self.rows.iter().find(|row| row.unique_key() == value).cloned()
    }

    fn find_all(&self) -> Vec<R> {
        self.rows.clone()
    }
}

/// All tables of the in-memory gateway.
///
/// Each table sits behind its own `Arc`: cloning `MemTables` is three
/// refcount bumps, and a table is deep-copied only when a transaction first
/// writes to it.
#[derive(Debug, Clone, Default)]
pub struct MemTables {
    permissions: Arc<MemTable<PermissionRecord>>,
    roles: Arc<MemTable<RoleRecord>>,
    users: Arc<MemTable<UserRecord>>,
}

impl Session for MemTables {
    fn permissions(&self) -> &dyn Table<PermissionRecord> {
        &*self.permissions
    }

    fn permissions_mut(&mut self) -> &mut dyn Table<PermissionRecord> {
        Arc::<MemTable<PermissionRecord>>::make_mut(&mut self.permissions)
    }

    fn roles(&self) -> &dyn Table<RoleRecord> {
        &*self.roles
    }

    fn roles_mut(&mut self) -> &mut dyn Table<RoleRecord> {
        Arc::<MemTable<RoleRecord>>::make_mut(&mut self.roles)
    }

    fn users(&self) -> &dyn Table<UserRecord> {
        &*self.users
    }

    fn users_mut(&mut self) -> &mut dyn Table<UserRecord> {
        Arc::<MemTable<UserRecord>>::make_mut(&mut self.users)
    }
}

/// In-memory persistence gateway.
///
/// Intended for tests/dev. Transactions hold the write lock, apply their work
/// to a copy of the tables, and swap the copy in only on success, so readers
/// never observe a half-applied transaction.
///
/// The stored tables are only ever replaced wholesale, after `work` has
/// returned. A panic inside `work` therefore leaves them intact, and a
/// poisoned lock is recovered rather than reported.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    tables: RwLock<MemTables>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceGateway for InMemoryGateway {
    type Session = MemTables;

    fn read<T>(&self, work: impl FnOnce(&Self::Session) -> T) -> Result<T, GatewayError> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        Ok(work(&*tables))
    }

    fn transaction<T, E>(&self, work: impl FnOnce(&mut Self::Session) -> Result<T, E>) -> Result<T, E>
    where
        E: From<GatewayError>,
    {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);

        let mut working = tables.clone();
        let out = work(&mut working)?;
        *tables = working;

        Ok(out)
    }
}
