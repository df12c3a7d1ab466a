// Copyright 2018-2022 Cargill Incorporated
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Database-backed implementation of the [PermissionStore], powered by
//! [diesel].

pub(crate) mod models;
mod operations;
pub(crate) mod schema;

use diesel::r2d2::{ConnectionManager, Pool};

use super::{
    NewPermission, Permission, PermissionGrant, PermissionStore, PermissionStoreError,
};

use models::{GrantModel, NewGrantModel, NewPermissionModel, PermissionModel};

use operations::{
    add_grant::PermissionStoreAddGrant as _, add_permission::PermissionStoreAddPermission as _,
    get_granted_permissions::PermissionStoreGetGrantedPermissions as _,
    get_permission::PermissionStoreGetPermission as _,
    get_permission_by_codename::PermissionStoreGetPermissionByCodename as _,
    list_grants::PermissionStoreListGrants as _,
    list_permissions::PermissionStoreListPermissions as _,
    remove_grant::PermissionStoreRemoveGrant as _,
    remove_permission::PermissionStoreRemovePermission as _, PermissionStoreOperations,
};

/// Manages creating, fetching, and removing permissions and grants in the
/// database
pub struct DieselPermissionStore<C: diesel::Connection + 'static> {
    connection_pool: Pool<ConnectionManager<C>>,
}

impl<C: diesel::Connection> DieselPermissionStore<C> {
    /// Creates a new DieselPermissionStore
    ///
    /// # Arguments
    ///
    ///  * `connection_pool`: connection pool to the database
    pub fn new(connection_pool: Pool<ConnectionManager<C>>) -> Self {
        DieselPermissionStore { connection_pool }
    }
}

#[cfg(feature = "postgres")]
impl PermissionStore for DieselPermissionStore<diesel::pg::PgConnection> {
    fn add_permission(
        &self,
        permission: NewPermission,
    ) -> Result<Permission, PermissionStoreError> {
        let connection = self.connection_pool.get()?;
        PermissionStoreOperations::new(&*connection).add_permission(permission)
    }

    fn get_permission(
        &self,
        permission_id: i64,
    ) -> Result<Option<Permission>, PermissionStoreError> {
        let connection = self.connection_pool.get()?;
        PermissionStoreOperations::new(&*connection).get_permission(permission_id)
    }

    fn get_permission_by_codename(
        &self,
        codename: &str,
    ) -> Result<Option<Permission>, PermissionStoreError> {
        let connection = self.connection_pool.get()?;
        PermissionStoreOperations::new(&*connection).get_permission_by_codename(codename)
    }

    fn list_permissions(
        &self,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Permission>>, PermissionStoreError> {
        let connection = self.connection_pool.get()?;
        PermissionStoreOperations::new(&*connection).list_permissions()
    }

    fn remove_permission(&self, permission_id: i64) -> Result<(), PermissionStoreError> {
        let connection = self.connection_pool.get()?;
        PermissionStoreOperations::new(&*connection).remove_permission(permission_id)
    }

    fn add_grant(&self, grant: PermissionGrant) -> Result<(), PermissionStoreError> {
        let connection = self.connection_pool.get()?;
        PermissionStoreOperations::new(&*connection).add_grant(grant)
    }

    fn remove_grant(
        &self,
        username: &str,
        permission_id: i64,
    ) -> Result<(), PermissionStoreError> {
        let connection = self.connection_pool.get()?;
        PermissionStoreOperations::new(&*connection).remove_grant(username, permission_id)
    }

    fn list_grants(&self, username: &str) -> Result<Vec<PermissionGrant>, PermissionStoreError> {
        let connection = self.connection_pool.get()?;
        PermissionStoreOperations::new(&*connection).list_grants(username)
    }

    fn get_granted_permissions(
        &self,
        username: &str,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Permission>>, PermissionStoreError> {
        let connection = self.connection_pool.get()?;
        PermissionStoreOperations::new(&*connection).get_granted_permissions(username)
    }

    fn clone_box(&self) -> Box<dyn PermissionStore> {
        Box::new(Self {
            connection_pool: self.connection_pool.clone(),
        })
    }
}

#[cfg(feature = "sqlite")]
impl PermissionStore for DieselPermissionStore<diesel::sqlite::SqliteConnection> {
    fn add_permission(
        &self,
        permission: NewPermission,
    ) -> Result<Permission, PermissionStoreError> {
        let connection = self.connection_pool.get()?;
        PermissionStoreOperations::new(&*connection).add_permission(permission)
    }

    fn get_permission(
        &self,
        permission_id: i64,
    ) -> Result<Option<Permission>, PermissionStoreError> {
        let connection = self.connection_pool.get()?;
        PermissionStoreOperations::new(&*connection).get_permission(permission_id)
    }

    fn get_permission_by_codename(
        &self,
        codename: &str,
    ) -> Result<Option<Permission>, PermissionStoreError> {
        let connection = self.connection_pool.get()?;
        PermissionStoreOperations::new(&*connection).get_permission_by_codename(codename)
    }

    fn list_permissions(
        &self,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Permission>>, PermissionStoreError> {
        let connection = self.connection_pool.get()?;
        PermissionStoreOperations::new(&*connection).list_permissions()
    }

    fn remove_permission(&self, permission_id: i64) -> Result<(), PermissionStoreError> {
        let connection = self.connection_pool.get()?;
        PermissionStoreOperations::new(&*connection).remove_permission(permission_id)
    }

    fn add_grant(&self, grant: PermissionGrant) -> Result<(), PermissionStoreError> {
        let connection = self.connection_pool.get()?;
        PermissionStoreOperations::new(&*connection).add_grant(grant)
    }

    fn remove_grant(
        &self,
        username: &str,
        permission_id: i64,
    ) -> Result<(), PermissionStoreError> {
        let connection = self.connection_pool.get()?;
        PermissionStoreOperations::new(&*connection).remove_grant(username, permission_id)
    }

    fn list_grants(&self, username: &str) -> Result<Vec<PermissionGrant>, PermissionStoreError> {
        let connection = self.connection_pool.get()?;
        PermissionStoreOperations::new(&*connection).list_grants(username)
    }

    fn get_granted_permissions(
        &self,
        username: &str,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Permission>>, PermissionStoreError> {
        let connection = self.connection_pool.get()?;
        PermissionStoreOperations::new(&*connection).get_granted_permissions(username)
    }

    fn clone_box(&self) -> Box<dyn PermissionStore> {
        Box::new(Self {
            connection_pool: self.connection_pool.clone(),
        })
    }
}

impl From<PermissionModel> for Permission {
    fn from(permission: PermissionModel) -> Self {
        Self {
            permission_id: permission.permission_id,
            en_name: permission.en_name,
            fr_name: permission.fr_name,
            en_description: permission.en_description,
            fr_description: permission.fr_description,
            codename: permission.codename,
            content_type: permission.content_type,
            date_assigned: permission.date_assigned,
            expiry_date: permission.expiry_date,
        }
    }
}

impl From<NewPermission> for NewPermissionModel {
    fn from(permission: NewPermission) -> Self {
        Self {
            en_name: permission.en_name,
            fr_name: permission.fr_name,
            en_description: permission.en_description,
            fr_description: permission.fr_description,
            codename: permission.codename,
            content_type: permission.content_type,
            expiry_date: permission.expiry_date,
        }
    }
}

impl From<GrantModel> for PermissionGrant {
    fn from(grant: GrantModel) -> Self {
        Self {
            username: grant.username,
            permission_id: grant.permission_id,
        }
    }
}

impl From<PermissionGrant> for NewGrantModel {
    fn from(grant: PermissionGrant) -> Self {
        Self {
            username: grant.username,
            permission_id: grant.permission_id,
        }
    }
}

#[cfg(all(test, feature = "sqlite"))]
pub mod tests {
    use super::*;

    use crate::migrations::run_sqlite_migrations;
    use crate::permissions::store::{PermissionBuilder, PermissionGrantBuilder};
    use crate::users::store::{PasswordEncryptionCost, UserBuilder, UserStore};
    use crate::users::DieselUserStore;

    use diesel::{
        r2d2::{ConnectionManager, Pool},
        sqlite::SqliteConnection,
        Connection,
    };

    /// Verify that a SQLite-backed `DieselPermissionStore` correctly
    /// supports adding and fetching permissions.
    ///
    /// 1. Create a connection pool for an in-memory SQLite database and run
    ///    migrations.
    /// 2. Add a permission and verify that the returned record carries an
    ///    assigned id and the builder's fields.
    /// 3. Verify `get_permission` and `get_permission_by_codename` return
    ///    the record, and that unknown references return `None`.
    #[test]
    fn sqlite_add_and_get_permission() {
        let pool = create_connection_pool_and_migrate();

        let permission_store = DieselPermissionStore::new(pool);

        let stored = permission_store
            .add_permission(create_permission("GRADE_EXAMS"))
            .expect("Unable to add permission");

        assert!(stored.permission_id() > 0);
        assert_eq!(stored.codename(), "GRADE_EXAMS");
        assert_eq!(stored.en_name(), "Grade exams");
        assert_eq!(stored.fr_name(), "Corriger les examens");
        assert_eq!(stored.content_type(), "exam");
        assert_eq!(stored.expiry_date(), None);

        let fetched = permission_store
            .get_permission(stored.permission_id())
            .expect("Unable to get permission")
            .expect("Permission not found");
        assert_eq!(fetched, stored);

        let by_codename = permission_store
            .get_permission_by_codename("GRADE_EXAMS")
            .expect("Unable to get permission")
            .expect("Permission not found");
        assert_eq!(by_codename, stored);

        assert!(permission_store
            .get_permission(stored.permission_id() + 1)
            .expect("Unable to get permission")
            .is_none());
        assert!(permission_store
            .get_permission_by_codename("NO_SUCH_CODENAME")
            .expect("Unable to get permission")
            .is_none());
    }

    /// Verify that adding two permissions with the same codename is
    /// rejected.
    #[test]
    fn sqlite_add_duplicate_codename() {
        let pool = create_connection_pool_and_migrate();

        let permission_store = DieselPermissionStore::new(pool);

        permission_store
            .add_permission(create_permission("GRADE_EXAMS"))
            .expect("Unable to add permission");

        assert!(permission_store
            .add_permission(create_permission("GRADE_EXAMS"))
            .is_err());
    }

    /// Verify that `list_permissions` returns every permission exactly
    /// once, ordered by id, with pairwise-distinct codenames.
    #[test]
    fn sqlite_list_permissions() {
        let pool = create_connection_pool_and_migrate();

        let permission_store = DieselPermissionStore::new(pool);

        permission_store
            .add_permission(create_permission("GRADE_EXAMS"))
            .expect("Unable to add permission");
        permission_store
            .add_permission(create_permission("SCHEDULE_EXAMS"))
            .expect("Unable to add permission");

        let permissions = permission_store
            .list_permissions()
            .expect("Unable to list permissions")
            .collect::<Vec<_>>();
        assert_eq!(2, permissions.len());
        assert_eq!(permissions[0].codename(), "GRADE_EXAMS");
        assert_eq!(permissions[1].codename(), "SCHEDULE_EXAMS");
        assert!(permissions[0].permission_id() < permissions[1].permission_id());
    }

    /// Verify grant handling against a SQLite-backed store:
    ///
    /// 1. A user with no grants resolves to an empty permission set.
    /// 2. After a grant, the permission set contains exactly the granted
    ///    permission.
    /// 3. A duplicate (user, permission) grant is rejected.
    /// 4. A grant referencing an unknown user or permission is rejected.
    /// 5. After the grant is removed, the permission set is empty again.
    #[test]
    fn sqlite_grant_lifecycle() {
        let pool = create_connection_pool_and_migrate();

        let user_store = DieselUserStore::new(pool.clone());
        let permission_store = DieselPermissionStore::new(pool);

        user_store
            .add_user(create_user("alice"))
            .expect("Unable to add user");

        let granted = permission_store
            .get_granted_permissions("alice")
            .expect("Unable to get granted permissions");
        assert_eq!(0, granted.len());

        let permission = permission_store
            .add_permission(create_permission("GRADE_EXAMS"))
            .expect("Unable to add permission");

        permission_store
            .add_grant(
                PermissionGrantBuilder::new()
                    .with_username("alice".into())
                    .with_permission_id(permission.permission_id())
                    .build()
                    .expect("Unable to build grant"),
            )
            .expect("Unable to add grant");

        let granted = permission_store
            .get_granted_permissions("alice")
            .expect("Unable to get granted permissions")
            .collect::<Vec<_>>();
        assert_eq!(1, granted.len());
        assert_eq!(granted[0].codename(), "GRADE_EXAMS");
        assert_eq!(granted[0].permission_id(), permission.permission_id());

        let grants = permission_store
            .list_grants("alice")
            .expect("Unable to list grants");
        assert_eq!(1, grants.len());
        assert_eq!(grants[0].username(), "alice");
        assert_eq!(grants[0].permission_id(), permission.permission_id());

        assert!(permission_store
            .add_grant(
                PermissionGrantBuilder::new()
                    .with_username("alice".into())
                    .with_permission_id(permission.permission_id())
                    .build()
                    .expect("Unable to build grant"),
            )
            .is_err());

        assert!(permission_store
            .add_grant(
                PermissionGrantBuilder::new()
                    .with_username("no-such-user".into())
                    .with_permission_id(permission.permission_id())
                    .build()
                    .expect("Unable to build grant"),
            )
            .is_err());
        assert!(permission_store
            .add_grant(
                PermissionGrantBuilder::new()
                    .with_username("alice".into())
                    .with_permission_id(permission.permission_id() + 1)
                    .build()
                    .expect("Unable to build grant"),
            )
            .is_err());

        permission_store
            .remove_grant("alice", permission.permission_id())
            .expect("Unable to remove grant");

        let granted = permission_store
            .get_granted_permissions("alice")
            .expect("Unable to get granted permissions");
        assert_eq!(0, granted.len());

        assert!(permission_store
            .remove_grant("alice", permission.permission_id())
            .is_err());
    }

    /// Verify that removing a referenced user or permission is restricted
    /// while a grant exists, and allowed once the grant is removed.
    #[test]
    fn sqlite_remove_restricted_while_granted() {
        let pool = create_connection_pool_and_migrate();

        let user_store = DieselUserStore::new(pool.clone());
        let permission_store = DieselPermissionStore::new(pool);

        user_store
            .add_user(create_user("alice"))
            .expect("Unable to add user");
        let permission = permission_store
            .add_permission(create_permission("GRADE_EXAMS"))
            .expect("Unable to add permission");
        permission_store
            .add_grant(
                PermissionGrantBuilder::new()
                    .with_username("alice".into())
                    .with_permission_id(permission.permission_id())
                    .build()
                    .expect("Unable to build grant"),
            )
            .expect("Unable to add grant");

        assert!(user_store.remove_user("alice").is_err());
        assert!(permission_store
            .remove_permission(permission.permission_id())
            .is_err());

        permission_store
            .remove_grant("alice", permission.permission_id())
            .expect("Unable to remove grant");

        user_store
            .remove_user("alice")
            .expect("Unable to remove user");
        permission_store
            .remove_permission(permission.permission_id())
            .expect("Unable to remove permission");
    }

    fn create_permission(codename: &str) -> NewPermission {
        PermissionBuilder::new()
            .with_en_name("Grade exams".into())
            .with_fr_name("Corriger les examens".into())
            .with_en_description("Allows the holder to grade exams".into())
            .with_fr_description("Permet de corriger les examens".into())
            .with_codename(codename.into())
            .with_content_type("exam".into())
            .build()
            .expect("Unable to build permission")
    }

    fn create_user(username: &str) -> crate::users::User {
        UserBuilder::new()
            .with_username(username)
            .with_email(&format!("{}@example.com", username))
            .with_first_name("Alice")
            .with_last_name("Smith")
            .with_birth_date("2006-01-02")
            .with_password("hunter2")
            .with_password_encryption_cost(PasswordEncryptionCost::Low)
            .build()
            .expect("Unable to build user")
    }

    /// Creates a connection pool for an in-memory SQLite database with only
    /// a single connection available. Each connection is backed by a
    /// different in-memory SQLite database, so limiting the pool to a single
    /// connection insures that the same DB is used for all operations.
    fn create_connection_pool_and_migrate() -> Pool<ConnectionManager<SqliteConnection>> {
        let connection_manager = ConnectionManager::<SqliteConnection>::new(":memory:");
        let pool = Pool::builder()
            .max_size(1)
            .build(connection_manager)
            .expect("Failed to build connection pool");

        {
            let connection = pool.get().expect("Failed to get connection for migrations");
            connection
                .execute("PRAGMA foreign_keys = ON;")
                .expect("Failed to enable foreign keys");
            run_sqlite_migrations(&*connection).expect("Failed to run migrations");
        }

        pool
    }
}
