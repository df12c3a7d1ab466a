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

use diesel::{prelude::*, result::Error::NotFound};

use crate::error::InternalError;
use crate::users::store::{
    diesel::{models::UserModel, schema::users},
    User, UserStoreError,
};

pub trait UserStoreGetUserByLogin {
    fn get_user_by_login(&self, login: &str) -> Result<Option<User>, UserStoreError>;
}

impl<'a, C> UserStoreGetUserByLogin for UserStoreOperations<'a, C>
where
    C: diesel::Connection,
    String: diesel::deserialize::FromSql<diesel::sql_types::Text, C::Backend>,
    chrono::NaiveDate: diesel::deserialize::FromSql<diesel::sql_types::Date, C::Backend>,
{
    fn get_user_by_login(&self, login: &str) -> Result<Option<User>, UserStoreError> {
        // Usernames take precedence over email addresses, so a username
        // lookup is attempted before falling back to the primary email.
        let user = users::table
            .filter(users::username.eq(login))
            .first::<UserModel>(self.conn)
            .map(Some)
            .or_else(|err| if err == NotFound { Ok(None) } else { Err(err) })
            .map_err(|err| {
                UserStoreError::Internal(InternalError::with_message(format!(
                    "Failed check for existing username {}",
                    err
                )))
            })?;

        if let Some(user) = user {
            return Ok(Some(User::from(user)));
        }

        let user = users::table
            .filter(users::email.eq(login))
            .first::<UserModel>(self.conn)
            .map(Some)
            .or_else(|err| if err == NotFound { Ok(None) } else { Err(err) })
            .map_err(|err| {
                UserStoreError::Internal(InternalError::with_message(format!(
                    "Failed check for existing email {}",
                    err
                )))
            })?;

        Ok(user.map(User::from))
    }
}
