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

//! Implementation of a `StoreFactory` for PostgreSQL

use diesel::{
    pg::PgConnection,
    r2d2::{ConnectionManager, Pool},
};

use crate::error::InternalError;
use crate::migrations::run_postgres_migrations;

use super::StoreFactory;

/// Create a PostgreSQL connection pool and run any pending migrations.
///
/// # Arguments
///
/// * url - a `postgres://` connection URL
pub fn create_postgres_connection_pool(
    url: &str,
) -> Result<Pool<ConnectionManager<PgConnection>>, InternalError> {
    let connection_manager = ConnectionManager::<PgConnection>::new(url);
    let pool = Pool::builder().build(connection_manager).map_err(|err| {
        InternalError::from_source_with_prefix(
            Box::new(err),
            "Failed to build connection pool".to_string(),
        )
    })?;
    let conn = pool
        .get()
        .map_err(|err| InternalError::from_source(Box::new(err)))?;
    run_postgres_migrations(&conn)?;

    Ok(pool)
}

/// A `StoreFactory` backed by a PostgreSQL database.
pub struct PgStoreFactory {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl PgStoreFactory {
    /// Create a new `PgStoreFactory`.
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }
}

impl StoreFactory for PgStoreFactory {
    fn get_user_store(&self) -> Box<dyn crate::users::UserStore> {
        Box::new(crate::users::DieselUserStore::new(self.pool.clone()))
    }

    fn get_permission_store(&self) -> Box<dyn crate::permissions::PermissionStore> {
        Box::new(crate::permissions::DieselPermissionStore::new(
            self.pool.clone(),
        ))
    }
}
