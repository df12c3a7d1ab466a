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

use diesel::prelude::*;

use crate::error::InternalError;
use crate::permissions::store::{
    diesel::{models::GrantModel, schema::user_permissions},
    PermissionGrant, PermissionStoreError,
};

pub trait PermissionStoreListGrants {
    fn list_grants(&self, username: &str) -> Result<Vec<PermissionGrant>, PermissionStoreError>;
}

impl<'a, C> PermissionStoreListGrants for PermissionStoreOperations<'a, C>
where
    C: diesel::Connection,
    i64: diesel::deserialize::FromSql<diesel::sql_types::BigInt, C::Backend>,
    String: diesel::deserialize::FromSql<diesel::sql_types::Text, C::Backend>,
{
    fn list_grants(&self, username: &str) -> Result<Vec<PermissionGrant>, PermissionStoreError> {
        let grants = user_permissions::table
            .filter(user_permissions::username.eq(username))
            .order(user_permissions::permission_id)
            .load::<GrantModel>(self.conn)
            .map_err(|err| {
                PermissionStoreError::Internal(InternalError::with_message(format!(
                    "Failed to get grants {}",
                    err
                )))
            })?
            .into_iter()
            .map(PermissionGrant::from)
            .collect();
        Ok(grants)
    }
}
