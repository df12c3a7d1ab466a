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

use super::PermissionStoreOperations;

use diesel::{dsl::insert_into, prelude::*, result::Error::NotFound};

use crate::error::{ConstraintViolationError, ConstraintViolationType, InternalError};
use crate::permissions::store::{
    diesel::{
        models::{NewPermissionModel, PermissionModel},
        schema::permissions,
    },
    NewPermission, Permission, PermissionStoreError,
};

pub trait PermissionStoreAddPermission {
    fn add_permission(&self, permission: NewPermission)
        -> Result<Permission, PermissionStoreError>;
}

#[cfg(feature = "sqlite")]
impl<'a> PermissionStoreAddPermission
    for PermissionStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_permission(
        &self,
        permission: NewPermission,
    ) -> Result<Permission, PermissionStoreError> {
        let duplicate_permission = permissions::table
            .filter(permissions::codename.eq(permission.codename()))
            .first::<PermissionModel>(self.conn)
            .map(Some)
            .or_else(|err| if err == NotFound { Ok(None) } else { Err(err) })
            .map_err(|err| {
                PermissionStoreError::Internal(InternalError::with_message(format!(
                    "Failed check for existing codename {}",
                    err
                )))
            })?;

        if duplicate_permission.is_some() {
            return Err(PermissionStoreError::ConstraintViolation(
                ConstraintViolationError::with_violation_type(ConstraintViolationType::Unique),
            ));
        }

        let new_permission: NewPermissionModel = permission.into();
        let codename = new_permission.codename.clone();

        insert_into(permissions::table)
            .values(new_permission)
            .execute(self.conn)
            .map(|_| ())
            .map_err(PermissionStoreError::from)?;

        // SQLite has no RETURNING support in this diesel version, so the
        // stored record is read back by its unique codename.
        let stored = permissions::table
            .filter(permissions::codename.eq(&codename))
            .first::<PermissionModel>(self.conn)
            .map_err(|err| {
                PermissionStoreError::Internal(InternalError::with_message(format!(
                    "Failed to fetch inserted permission {}",
                    err
                )))
            })?;
        Ok(Permission::from(stored))
    }
}

#[cfg(feature = "postgres")]
impl<'a> PermissionStoreAddPermission
    for PermissionStoreOperations<'a, diesel::pg::PgConnection>
{
    fn add_permission(
        &self,
        permission: NewPermission,
    ) -> Result<Permission, PermissionStoreError> {
        let duplicate_permission = permissions::table
            .filter(permissions::codename.eq(permission.codename()))
            .first::<PermissionModel>(self.conn)
            .map(Some)
            .or_else(|err| if err == NotFound { Ok(None) } else { Err(err) })
            .map_err(|err| {
                PermissionStoreError::Internal(InternalError::with_message(format!(
                    "Failed check for existing codename {}",
                    err
                )))
            })?;

        if duplicate_permission.is_some() {
            return Err(PermissionStoreError::ConstraintViolation(
                ConstraintViolationError::with_violation_type(ConstraintViolationType::Unique),
            ));
        }

        let new_permission: NewPermissionModel = permission.into();

        let stored = insert_into(permissions::table)
            .values(new_permission)
            .get_result::<PermissionModel>(self.conn)
            .map_err(PermissionStoreError::from)?;
        Ok(Permission::from(stored))
    }
}
