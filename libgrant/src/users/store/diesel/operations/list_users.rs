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

use super::UserStoreOperations;

use diesel::prelude::*;

use crate::error::InternalError;
use crate::users::store::{
    diesel::{models::UserModel, schema::users},
    User, UserStoreError,
};

pub trait UserStoreListUsers {
    fn list_users(&self) -> Result<Box<dyn ExactSizeIterator<Item = User>>, UserStoreError>;
}

impl<'a, C> UserStoreListUsers for UserStoreOperations<'a, C>
where
    C: diesel::Connection,
    String: diesel::deserialize::FromSql<diesel::sql_types::Text, C::Backend>,
    chrono::NaiveDate: diesel::deserialize::FromSql<diesel::sql_types::Date, C::Backend>,
{
    fn list_users(&self) -> Result<Box<dyn ExactSizeIterator<Item = User>>, UserStoreError> {
        let users = users::table
            .order(users::username)
            .load::<UserModel>(self.conn)
            .map_err(|err| {
                UserStoreError::Internal(InternalError::with_message(format!(
                    "Failed to get users {}",
                    err
                )))
            })?
            .into_iter()
            .map(User::from)
            .collect::<Vec<_>>();
        Ok(Box::new(users.into_iter()))
    }
}
