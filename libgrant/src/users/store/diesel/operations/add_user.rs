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

use diesel::{dsl::insert_into, prelude::*, result::Error::NotFound};

use crate::error::{ConstraintViolationError, ConstraintViolationType, InternalError};
use crate::users::store::{
    diesel::{models::UserModel, schema::users},
    User, UserStoreError,
};

pub trait UserStoreAddUser {
    fn add_user(&self, user: User) -> Result<(), UserStoreError>;
}

#[cfg(feature = "sqlite")]
impl<'a> UserStoreAddUser for UserStoreOperations<'a, diesel::sqlite::SqliteConnection> {
    fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let duplicate_user = users::table
            .filter(
                users::username
                    .eq(user.username())
                    .or(users::email.eq(user.email())),
            )
            .first::<UserModel>(self.conn)
            .map(Some)
            .or_else(|err| if err == NotFound { Ok(None) } else { Err(err) })
            .map_err(|err| {
                UserStoreError::Internal(InternalError::with_message(format!(
                    "Failed check for existing username or email {}",
                    err
                )))
            })?;

        if duplicate_user.is_some() {
            return Err(UserStoreError::ConstraintViolation(
                ConstraintViolationError::with_violation_type(ConstraintViolationType::Unique),
            ));
        }

        let user_model: UserModel = user.into();

        insert_into(users::table)
            .values(user_model)
            .execute(self.conn)
            .map(|_| ())
            .map_err(UserStoreError::from)?;
        Ok(())
    }
}

#[cfg(feature = "postgres")]
impl<'a> UserStoreAddUser for UserStoreOperations<'a, diesel::pg::PgConnection> {
    fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let duplicate_user = users::table
            .filter(
                users::username
                    .eq(user.username())
                    .or(users::email.eq(user.email())),
            )
            .first::<UserModel>(self.conn)
            .map(Some)
            .or_else(|err| if err == NotFound { Ok(None) } else { Err(err) })
            .map_err(|err| {
                UserStoreError::Internal(InternalError::with_message(format!(
                    "Failed check for existing username or email {}",
                    err
                )))
            })?;

        if duplicate_user.is_some() {
            return Err(UserStoreError::ConstraintViolation(
                ConstraintViolationError::with_violation_type(ConstraintViolationType::Unique),
            ));
        }

        let user_model: UserModel = user.into();

        insert_into(users::table)
            .values(user_model)
            .execute(self.conn)
            .map(|_| ())
            .map_err(UserStoreError::from)?;
        Ok(())
    }
}
