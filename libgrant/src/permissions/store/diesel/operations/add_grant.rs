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
        models::{GrantModel, NewGrantModel},
        schema::user_permissions,
    },
    PermissionGrant, PermissionStoreError,
};

pub trait PermissionStoreAddGrant {
    fn add_grant(&self, grant: PermissionGrant) -> Result<(), PermissionStoreError>;
}

#[cfg(feature = "sqlite")]
impl<'a> PermissionStoreAddGrant
    for PermissionStoreOperations<'a, diesel::sqlite::SqliteConnection>
{
    fn add_grant(&self, grant: PermissionGrant) -> Result<(), PermissionStoreError> {
        let duplicate_grant = user_permissions::table
            .filter(
                user_permissions::username
                    .eq(grant.username())
                    .and(user_permissions::permission_id.eq(grant.permission_id())),
            )
            .first::<GrantModel>(self.conn)
            .map(Some)
            .or_else(|err| if err == NotFound { Ok(None) } else { Err(err) })
            .map_err(|err| {
                PermissionStoreError::Internal(InternalError::with_message(format!(
                    "Failed check for existing grant {}",
                    err
                )))
            })?;

        if duplicate_grant.is_some() {
            return Err(PermissionStoreError::ConstraintViolation(
                ConstraintViolationError::with_violation_type(ConstraintViolationType::Unique),
            ));
        }

        let new_grant: NewGrantModel = grant.into();

        // An unknown username or permission id surfaces as a foreign key
        // violation and is mapped by the conversion.
        insert_into(user_permissions::table)
            .values(new_grant)
            .execute(self.conn)
            .map(|_| ())
            .map_err(PermissionStoreError::from)?;
        Ok(())
    }
}

#[cfg(feature = "postgres")]
impl<'a> PermissionStoreAddGrant for PermissionStoreOperations<'a, diesel::pg::PgConnection> {
    fn add_grant(&self, grant: PermissionGrant) -> Result<(), PermissionStoreError> {
        let duplicate_grant = user_permissions::table
            .filter(
                user_permissions::username
                    .eq(grant.username())
                    .and(user_permissions::permission_id.eq(grant.permission_id())),
            )
            .first::<GrantModel>(self.conn)
            .map(Some)
            .or_else(|err| if err == NotFound { Ok(None) } else { Err(err) })
            .map_err(|err| {
                PermissionStoreError::Internal(InternalError::with_message(format!(
                    "Failed check for existing grant {}",
                    err
                )))
            })?;

        if duplicate_grant.is_some() {
            return Err(PermissionStoreError::ConstraintViolation(
                ConstraintViolationError::with_violation_type(ConstraintViolationType::Unique),
            ));
        }

        let new_grant: NewGrantModel = grant.into();

        // An unknown username or permission id surfaces as a foreign key
        // violation and is mapped by the conversion.
        insert_into(user_permissions::table)
            .values(new_grant)
            .execute(self.conn)
            .map(|_| ())
            .map_err(PermissionStoreError::from)?;
        Ok(())
    }
}
