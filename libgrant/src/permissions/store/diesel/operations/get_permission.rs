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

use diesel::{prelude::*, result::Error::NotFound};

use crate::error::InternalError;
use crate::permissions::store::{
    diesel::{models::PermissionModel, schema::permissions},
    Permission, PermissionStoreError,
};

pub trait PermissionStoreGetPermission {
    fn get_permission(&self, permission_id: i64)
        -> Result<Option<Permission>, PermissionStoreError>;
}

impl<'a, C> PermissionStoreGetPermission for PermissionStoreOperations<'a, C>
where
    C: diesel::Connection,
    i64: diesel::deserialize::FromSql<diesel::sql_types::BigInt, C::Backend>,
    String: diesel::deserialize::FromSql<diesel::sql_types::Text, C::Backend>,
    chrono::NaiveDateTime: diesel::deserialize::FromSql<diesel::sql_types::Timestamp, C::Backend>,
{
    fn get_permission(
        &self,
        permission_id: i64,
    ) -> Result<Option<Permission>, PermissionStoreError> {
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
        Ok(permission.map(Permission::from))
    }
}
