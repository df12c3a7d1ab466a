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

use diesel::{dsl::update, prelude::*, result::Error::NotFound};

use crate::error::{InternalError, InvalidStateError};
use crate::users::store::{
    diesel::{models::UserModel, schema::users},
    User, UserStoreError,
};

pub trait UserStoreUpdateUser {
    fn update_user(&self, user: User) -> Result<(), UserStoreError>;
}

impl<'a, C> UserStoreUpdateUser for UserStoreOperations<'a, C>
where
    C: diesel::Connection,
    String: diesel::deserialize::FromSql<diesel::sql_types::Text, C::Backend>,
    chrono::NaiveDate: diesel::deserialize::FromSql<diesel::sql_types::Date, C::Backend>,
{
    fn update_user(&self, user: User) -> Result<(), UserStoreError> {
        let user_exists = users::table
            .filter(users::username.eq(user.username()))
            .first::<UserModel>(self.conn)
            .map(Some)
            .or_else(|err| if err == NotFound { Ok(None) } else { Err(err) })
            .map_err(|err| {
                UserStoreError::Internal(InternalError::with_message(format!(
                    "Failed check for existing username {}",
                    err
                )))
            })?;
        if user_exists.is_none() {
            return Err(UserStoreError::InvalidState(
                InvalidStateError::with_message(
                    "A user with the given username does not exist".to_string(),
                ),
            ));
        }

        let user_model: UserModel = user.into();
        update(users::table.filter(users::username.eq(&user_model.username)))
            .set((
                users::email.eq(&user_model.email),
                users::secondary_email.eq(&user_model.secondary_email),
                users::first_name.eq(&user_model.first_name),
                users::last_name.eq(&user_model.last_name),
                users::birth_date.eq(&user_model.birth_date),
                users::pri_or_military_nbr.eq(&user_model.pri_or_military_nbr),
                users::password.eq(&user_model.password),
                users::last_password_change.eq(&user_model.last_password_change),
            ))
            .execute(self.conn)
            .map(|_| ())
            .map_err(|err| {
                UserStoreError::Internal(InternalError::with_message(format!(
                    "Failed to update user {}",
                    err
                )))
            })?;
        Ok(())
    }
}
