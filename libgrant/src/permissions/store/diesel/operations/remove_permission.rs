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

use diesel::{dsl::delete, prelude::*, result::Error::NotFound};

use crate::error::{InternalError, InvalidStateError};
use crate::permissions::store::{
    diesel::{models::PermissionModel, schema::permissions},
    PermissionStoreError,
};

pub trait PermissionStoreRemovePermission {
    fn remove_permission(&self, permission_id: i64) -> Result<(), PermissionStoreError>;
}

impl<'a, C> PermissionStoreRemovePermission for PermissionStoreOperations<'a, C>
where
    C: diesel::Connection,
    i64: diesel::deserialize::FromSql<diesel::sql_types::BigInt, C::Backend>,
    String: diesel::deserialize::FromSql<diesel::sql_types::Text, C::Backend>,
    chrono::NaiveDateTime: diesel::deserialize::FromSql<diesel::sql_types::Timestamp, C::Backend>,
{
    fn remove_permission(&self, permission_id: i64) -> Result<(), PermissionStoreError> {
        let permission = permissions::table
            .filter(permissions::permission_id.eq(permission_id))
            .first::<PermissionModel>(self.conn)
            .map(Some)
            .or_else(|err| if err == NotFound { Ok(None) } else { Err(err) })
            .map_err(|err| {
                PermissionStoreError::Internal(InternalError::with_message(format!(
                    "Failed check for existing permission id {}",
                    err
                )))
            })?;
        if permission.is_none() {
            return Err(PermissionStoreError::InvalidState(
                InvalidStateError::with_message(
                    "A permission with the given id does not exist".to_string(),
                ),
            ));
        }

        // A foreign key violation here means grants still reference the
        // permission; the conversion maps it to a ConstraintViolation.
        delete(permissions::table.filter(permissions::permission_id.eq(permission_id)))
            .execute(self.conn)
            .map(|_| ())
            .map_err(PermissionStoreError::from)?;
        Ok(())
    }
}
