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

use super::PermissionStoreOperations;

use diesel::prelude::*;

use crate::permissions::store::{
    diesel::{
        models::{GrantModel, PermissionModel},
        schema::{permissions, user_permissions},
    },
    Permission, PermissionStoreError,
};

pub trait PermissionStoreGetGrantedPermissions {
    fn get_granted_permissions(
        &self,
        username: &str,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Permission>>, PermissionStoreError>;
}

impl<'a, C> PermissionStoreGetGrantedPermissions for PermissionStoreOperations<'a, C>
where
    C: diesel::Connection,
    i64: diesel::deserialize::FromSql<diesel::sql_types::BigInt, C::Backend>,
    String: diesel::deserialize::FromSql<diesel::sql_types::Text, C::Backend>,
    chrono::NaiveDateTime: diesel::deserialize::FromSql<diesel::sql_types::Timestamp, C::Backend>,
{
    fn get_granted_permissions(
        &self,
        username: &str,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Permission>>, PermissionStoreError> {
        self.conn
            .transaction::<Box<dyn ExactSizeIterator<Item = Permission>>, _, _>(|| {
                let permission_ids = user_permissions::table
                    .filter(user_permissions::username.eq(username))
                    .load::<GrantModel>(self.conn)?
                    .into_iter()
                    .map(|grant| grant.permission_id)
                    .collect::<Vec<_>>();

                let granted = permissions::table
                    .filter(permissions::permission_id.eq_any(permission_ids))
                    .order(permissions::permission_id)
                    .load::<PermissionModel>(self.conn)?
                    .into_iter()
                    .map(Permission::from)
                    .collect::<Vec<_>>();

                Ok(Box::new(granted.into_iter()))
            })
            .map_err(PermissionStoreError::from)
    }
}
