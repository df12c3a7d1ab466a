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

use diesel::{dsl::delete, prelude::*, result::Error::NotFound};

use crate::error::{InternalError, InvalidStateError};
use crate::users::store::{
    diesel::{models::UserModel, schema::users},
    UserStoreError,
};

pub trait UserStoreRemoveUser {
    fn remove_user(&self, username: &str) -> Result<(), UserStoreError>;
}

impl<'a, C> UserStoreRemoveUser for UserStoreOperations<'a, C>
where
    C: diesel::Connection,
    String: diesel::deserialize::FromSql<diesel::sql_types::Text, C::Backend>,
    chrono::NaiveDate: diesel::deserialize::FromSql<diesel::sql_types::Date, C::Backend>,
{
    fn remove_user(&self, username: &str) -> Result<(), UserStoreError> {
        let user = users::table
            .filter(users::username.eq(username))
            .first::<UserModel>(self.conn)
            .map(Some)
            .or_else(|err| if err == NotFound { Ok(None) } else { Err(err) })
            .map_err(|err| {
                UserStoreError::Internal(InternalError::with_message(format!(
                    "Failed check for existing username {}",
                    err
                )))
            })?;
        if user.is_none() {
            return Err(UserStoreError::InvalidState(
                InvalidStateError::with_message(
                    "A user with the given username does not exist".to_string(),
                ),
            ));
        }

        // A foreign key violation here means grants still reference the
        // user; the conversion maps it to a ConstraintViolation.
        delete(users::table.filter(users::username.eq(username)))
            .execute(self.conn)
            .map(|_| ())
            .map_err(UserStoreError::from)?;
        Ok(())
    }
}
