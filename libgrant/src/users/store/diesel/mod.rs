// Copyright 2018-2021 Cargill Incorporated
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

//! Database-backed implementation of the [UserStore], powered by [diesel].

pub(crate) mod models;
mod operations;
pub(crate) mod schema;

use diesel::r2d2::{ConnectionManager, Pool};

use super::{User, UserStore, UserStoreError};

use models::UserModel;

use operations::{
    add_user::UserStoreAddUser as _, get_user::UserStoreGetUser as _,
    get_user_by_login::UserStoreGetUserByLogin as _, list_users::UserStoreListUsers as _,
    remove_user::UserStoreRemoveUser as _, update_user::UserStoreUpdateUser as _,
    UserStoreOperations,
};

/// Manages creating, updating, and fetching users from the database
pub struct DieselUserStore<C: diesel::Connection + 'static> {
    connection_pool: Pool<ConnectionManager<C>>,
}

impl<C: diesel::Connection> DieselUserStore<C> {
    /// Creates a new DieselUserStore
    ///
    /// # Arguments
    ///
    ///  * `connection_pool`: connection pool to the database
    pub fn new(connection_pool: Pool<ConnectionManager<C>>) -> Self {
        DieselUserStore { connection_pool }
    }
}

#[cfg(feature = "postgres")]
impl UserStore for DieselUserStore<diesel::pg::PgConnection> {
    fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let connection = self.connection_pool.get()?;
        UserStoreOperations::new(&*connection).add_user(user)
    }

    fn update_user(&self, user: User) -> Result<(), UserStoreError> {
        let connection = self.connection_pool.get()?;
        UserStoreOperations::new(&*connection).update_user(user)
    }

    fn remove_user(&self, username: &str) -> Result<(), UserStoreError> {
        let connection = self.connection_pool.get()?;
        UserStoreOperations::new(&*connection).remove_user(username)
    }

    fn get_user(&self, username: &str) -> Result<Option<User>, UserStoreError> {
        let connection = self.connection_pool.get()?;
        UserStoreOperations::new(&*connection).get_user(username)
    }

    fn get_user_by_login(&self, login: &str) -> Result<Option<User>, UserStoreError> {
        let connection = self.connection_pool.get()?;
        UserStoreOperations::new(&*connection).get_user_by_login(login)
    }

    fn list_users(&self) -> Result<Box<dyn ExactSizeIterator<Item = User>>, UserStoreError> {
        let connection = self.connection_pool.get()?;
        UserStoreOperations::new(&*connection).list_users()
    }

    fn clone_box(&self) -> Box<dyn UserStore> {
        Box::new(Self {
            connection_pool: self.connection_pool.clone(),
        })
    }
}

#[cfg(feature = "sqlite")]
impl UserStore for DieselUserStore<diesel::sqlite::SqliteConnection> {
    fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let connection = self.connection_pool.get()?;
        UserStoreOperations::new(&*connection).add_user(user)
    }

    fn update_user(&self, user: User) -> Result<(), UserStoreError> {
        let connection = self.connection_pool.get()?;
        UserStoreOperations::new(&*connection).update_user(user)
    }

    fn remove_user(&self, username: &str) -> Result<(), UserStoreError> {
        let connection = self.connection_pool.get()?;
        UserStoreOperations::new(&*connection).remove_user(username)
    }

    fn get_user(&self, username: &str) -> Result<Option<User>, UserStoreError> {
        let connection = self.connection_pool.get()?;
        UserStoreOperations::new(&*connection).get_user(username)
    }

    fn get_user_by_login(&self, login: &str) -> Result<Option<User>, UserStoreError> {
        let connection = self.connection_pool.get()?;
        UserStoreOperations::new(&*connection).get_user_by_login(login)
    }

    fn list_users(&self) -> Result<Box<dyn ExactSizeIterator<Item = User>>, UserStoreError> {
        let connection = self.connection_pool.get()?;
        UserStoreOperations::new(&*connection).list_users()
    }

    fn clone_box(&self) -> Box<dyn UserStore> {
        Box::new(Self {
            connection_pool: self.connection_pool.clone(),
        })
    }
}

impl From<UserModel> for User {
    fn from(user: UserModel) -> Self {
        Self {
            username: user.username,
            email: user.email,
            secondary_email: user.secondary_email,
            first_name: user.first_name,
            last_name: user.last_name,
            birth_date: user.birth_date,
            pri_or_military_nbr: user.pri_or_military_nbr,
            password: user.password,
            last_password_change: user.last_password_change,
        }
    }
}

#[cfg(all(test, feature = "sqlite"))]
pub mod tests {
    use super::*;

    use crate::migrations::run_sqlite_migrations;
    use crate::users::store::{PasswordEncryptionCost, UserBuilder};

    use diesel::{
        r2d2::{ConnectionManager, Pool},
        sqlite::SqliteConnection,
    };

    /// Verify that a SQLite-backed `DieselUserStore` correctly supports
    /// adding and getting users.
    ///
    /// 1. Create a connection pool for an in-memory SQLite database and run
    ///    migrations.
    /// 2. Create the `DieselUserStore`.
    /// 3. Add a user.
    /// 4. Verify that the `get_user` method returns correct values for all
    ///    user fields.
    /// 5. Verify that the `get_user` method returns `None` for a
    ///    nonexistent username.
    #[test]
    fn sqlite_add_and_get_user() {
        let pool = create_connection_pool_and_migrate();

        let user_store = DieselUserStore::new(pool);

        user_store
            .add_user(create_user("ferris", "ferris@example.com"))
            .expect("Unable to add user");

        let user = user_store
            .get_user("ferris")
            .expect("Unable to get user")
            .expect("User not found");

        assert_eq!(user.username(), "ferris");
        assert_eq!(user.email(), "ferris@example.com");
        assert_eq!(user.first_name(), "Ferris");
        assert_eq!(user.last_name(), "Crab");
        assert_eq!(user.birth_date(), "2006-01-02");
        assert_eq!(user.secondary_email(), None);
        assert_eq!(user.pri_or_military_nbr(), None);
        assert!(user
            .verify_password("hunter2")
            .expect("Unable to verify password"));

        assert!(user_store
            .get_user("no-such-user")
            .expect("Unable to get user")
            .is_none());
    }

    /// Verify that duplicate usernames and duplicate emails are rejected by
    /// a SQLite-backed `DieselUserStore`.
    #[test]
    fn sqlite_add_duplicate_user() {
        let pool = create_connection_pool_and_migrate();

        let user_store = DieselUserStore::new(pool);

        user_store
            .add_user(create_user("ferris", "ferris@example.com"))
            .expect("Unable to add user");

        assert!(user_store
            .add_user(create_user("ferris", "other@example.com"))
            .is_err());
        assert!(user_store
            .add_user(create_user("other", "ferris@example.com"))
            .is_err());
    }

    /// Verify that `get_user_by_login` matches the username first, falls
    /// back to the primary email, and returns `None` for an unknown handle.
    #[test]
    fn sqlite_get_user_by_login() {
        let pool = create_connection_pool_and_migrate();

        let user_store = DieselUserStore::new(pool);

        user_store
            .add_user(create_user("ferris", "ferris@example.com"))
            .expect("Unable to add user");

        let by_username = user_store
            .get_user_by_login("ferris")
            .expect("Unable to get user")
            .expect("User not found by username");
        assert_eq!(by_username.username(), "ferris");

        let by_email = user_store
            .get_user_by_login("ferris@example.com")
            .expect("Unable to get user")
            .expect("User not found by email");
        assert_eq!(by_email.username(), "ferris");

        assert!(user_store
            .get_user_by_login("nobody@example.com")
            .expect("Unable to get user")
            .is_none());
    }

    /// Verify that a SQLite-backed `DieselUserStore` correctly supports
    /// updating and removing users.
    #[test]
    fn sqlite_update_and_remove_user() {
        let pool = create_connection_pool_and_migrate();

        let user_store = DieselUserStore::new(pool);

        user_store
            .add_user(create_user("ferris", "ferris@example.com"))
            .expect("Unable to add user");

        let updated = UserBuilder::new()
            .with_username("ferris")
            .with_email("new@example.com")
            .with_first_name("Ferris")
            .with_last_name("Crab")
            .with_birth_date("2006-01-02")
            .with_password("hunter3")
            .with_password_encryption_cost(PasswordEncryptionCost::Low)
            .build()
            .expect("Unable to build user");

        user_store
            .update_user(updated)
            .expect("Unable to update user");

        let user = user_store
            .get_user("ferris")
            .expect("Unable to get user")
            .expect("User not found");
        assert_eq!(user.email(), "new@example.com");

        user_store
            .remove_user("ferris")
            .expect("Unable to remove user");
        assert!(user_store
            .get_user("ferris")
            .expect("Unable to get user")
            .is_none());

        assert!(user_store.remove_user("ferris").is_err());
    }

    fn create_user(username: &str, email: &str) -> crate::users::store::User {
        UserBuilder::new()
            .with_username(username)
            .with_email(email)
            .with_first_name("Ferris")
            .with_last_name("Crab")
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

        run_sqlite_migrations(&*pool.get().expect("Failed to get connection for migrations"))
            .expect("Failed to run migrations");

        pool
    }
}
