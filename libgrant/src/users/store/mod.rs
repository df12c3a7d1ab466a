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

//! Defines a basic representation of a user and provides an API to manage
//! user records.

#[cfg(feature = "diesel")]
pub(in crate::users) mod diesel;
mod error;
pub(crate) mod memory;

use std::str::FromStr;

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::NaiveDate;

use crate::error::{InternalError, InvalidStateError};

pub use error::UserStoreError;

#[cfg(feature = "diesel")]
use self::diesel::models::UserModel;

const MEDIUM_COST: u32 = 8;
const LOW_COST: u32 = 4;

const MAX_BIRTH_DATE_LENGTH: usize = 10;
const MAX_PRI_OR_MILITARY_NBR_LENGTH: usize = 9;

/// Represents a user of the system.
///
/// The username is the primary handle: it uniquely identifies the user and
/// is the value permission grants reference. The password is stored as a
/// bcrypt hash, produced by the [UserBuilder].
#[derive(Clone, Debug, PartialEq)]
pub struct User {
    username: String,
    email: String,
    secondary_email: Option<String>,
    first_name: String,
    last_name: String,
    birth_date: String,
    pri_or_military_nbr: Option<String>,
    password: String,
    last_password_change: Option<NaiveDate>,
}

impl User {
    /// Returns the username for the user.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the primary email address for the user.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the secondary email address for the user.
    pub fn secondary_email(&self) -> Option<&str> {
        self.secondary_email.as_deref()
    }

    /// Returns the first name for the user.
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the last name for the user.
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the birth date for the user. This is free text, at most ten
    /// characters; it is not a validated date.
    pub fn birth_date(&self) -> &str {
        &self.birth_date
    }

    /// Returns the PRI or military number for the user.
    pub fn pri_or_military_nbr(&self) -> Option<&str> {
        self.pri_or_military_nbr.as_deref()
    }

    /// Returns the hashed password for the user.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the date of the user's last password change.
    pub fn last_password_change(&self) -> Option<NaiveDate> {
        self.last_password_change
    }

    /// Verifies that a user's password is valid, returning true if it is and
    /// false otherwise.
    ///
    /// # Arguments
    ///
    /// * `password` - The plaintext password to be verified
    pub fn verify_password(&self, password: &str) -> Result<bool, InternalError> {
        verify(password, &self.password).map_err(|err| InternalError::from_source(Box::new(err)))
    }
}

/// Builder for User. It hashes the password upon build.
#[derive(Default)]
pub struct UserBuilder {
    username: Option<String>,
    email: Option<String>,
    secondary_email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    birth_date: Option<String>,
    pri_or_military_nbr: Option<String>,
    password: Option<String>,
    last_password_change: Option<NaiveDate>,
    password_encryption_cost: Option<PasswordEncryptionCost>,
}

impl UserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the username for the user.
    pub fn with_username(mut self, username: &str) -> UserBuilder {
        self.username = Some(username.to_owned());
        self
    }

    /// Sets the primary email address for the user.
    pub fn with_email(mut self, email: &str) -> UserBuilder {
        self.email = Some(email.to_owned());
        self
    }

    /// Sets the secondary email address for the user.
    pub fn with_secondary_email(mut self, secondary_email: Option<String>) -> UserBuilder {
        self.secondary_email = secondary_email;
        self
    }

    /// Sets the first name for the user.
    pub fn with_first_name(mut self, first_name: &str) -> UserBuilder {
        self.first_name = Some(first_name.to_owned());
        self
    }

    /// Sets the last name for the user.
    pub fn with_last_name(mut self, last_name: &str) -> UserBuilder {
        self.last_name = Some(last_name.to_owned());
        self
    }

    /// Sets the birth date for the user.
    pub fn with_birth_date(mut self, birth_date: &str) -> UserBuilder {
        self.birth_date = Some(birth_date.to_owned());
        self
    }

    /// Sets the PRI or military number for the user.
    pub fn with_pri_or_military_nbr(mut self, pri_or_military_nbr: Option<String>) -> UserBuilder {
        self.pri_or_military_nbr = pri_or_military_nbr;
        self
    }

    /// Sets the password for the user.
    pub fn with_password(mut self, password: &str) -> UserBuilder {
        self.password = Some(password.to_owned());
        self
    }

    /// Sets the date of the user's last password change.
    pub fn with_last_password_change(
        mut self,
        last_password_change: Option<NaiveDate>,
    ) -> UserBuilder {
        self.last_password_change = last_password_change;
        self
    }

    /// Sets the cost to encrypt the password for the user.
    ///
    /// # Arguments
    ///
    /// * `cost`: cost of the password encryption, default is high
    pub fn with_password_encryption_cost(mut self, cost: PasswordEncryptionCost) -> UserBuilder {
        self.password_encryption_cost = Some(cost);
        self
    }

    /// Consumes the builder, hashes the password and returns a User with the
    /// hashed password.
    pub fn build(self) -> Result<User, InvalidStateError> {
        let username = self.username.ok_or_else(|| {
            InvalidStateError::with_message("A user requires a username field".into())
        })?;
        if username.is_empty() {
            return Err(InvalidStateError::with_message(
                "A user requires a non-empty username field".into(),
            ));
        }
        let email = self
            .email
            .ok_or_else(|| InvalidStateError::with_message("A user requires an email field".into()))?;
        if email.is_empty() {
            return Err(InvalidStateError::with_message(
                "A user requires a non-empty email field".into(),
            ));
        }
        let first_name = self.first_name.ok_or_else(|| {
            InvalidStateError::with_message("A user requires a first_name field".into())
        })?;
        let last_name = self.last_name.ok_or_else(|| {
            InvalidStateError::with_message("A user requires a last_name field".into())
        })?;
        let birth_date = self.birth_date.ok_or_else(|| {
            InvalidStateError::with_message("A user requires a birth_date field".into())
        })?;
        if birth_date.chars().count() > MAX_BIRTH_DATE_LENGTH {
            return Err(InvalidStateError::with_message(format!(
                "A birth_date is at most {} characters",
                MAX_BIRTH_DATE_LENGTH
            )));
        }
        if let Some(pri_or_military_nbr) = &self.pri_or_military_nbr {
            if pri_or_military_nbr.chars().count() > MAX_PRI_OR_MILITARY_NBR_LENGTH {
                return Err(InvalidStateError::with_message(format!(
                    "A pri_or_military_nbr is at most {} characters",
                    MAX_PRI_OR_MILITARY_NBR_LENGTH
                )));
            }
        }

        let cost = self
            .password_encryption_cost
            .unwrap_or(PasswordEncryptionCost::High);

        let hashed_password = hash(
            self.password.ok_or_else(|| {
                InvalidStateError::with_message("A user requires a password field".into())
            })?,
            cost.to_value(),
        )
        .map_err(|err| {
            InvalidStateError::with_message(format!("Unable to hash password: {}", err))
        })?;

        Ok(User {
            username,
            email,
            secondary_email: self.secondary_email,
            first_name,
            last_name,
            birth_date,
            pri_or_military_nbr: self.pri_or_military_nbr,
            password: hashed_password,
            last_password_change: self.last_password_change,
        })
    }
}

/// Defines methods for CRUD operations and fetching users without defining a
/// storage strategy.
pub trait UserStore: Send + Sync {
    /// Adds a user to the underlying storage.
    ///
    /// # Errors
    ///
    /// Returns a `ConstraintViolation` error if a user with the same
    /// username or the same primary email already exists.
    fn add_user(&self, user: User) -> Result<(), UserStoreError>;

    /// Replaces a user record in the underlying storage, keyed by username.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidState` error if the user does not exist.
    fn update_user(&self, user: User) -> Result<(), UserStoreError>;

    /// Removes a user from the underlying storage.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidState` error if the user does not exist, and a
    /// `ConstraintViolation` error while permission grants still reference
    /// the user.
    fn remove_user(&self, username: &str) -> Result<(), UserStoreError>;

    /// Returns the user with the given username, if one exists. The match is
    /// exact and case-sensitive.
    fn get_user(&self, username: &str) -> Result<Option<User>, UserStoreError>;

    /// Returns the user for the given login handle, if one exists. The
    /// handle is first matched against usernames, then against primary
    /// email addresses.
    fn get_user_by_login(&self, login: &str) -> Result<Option<User>, UserStoreError>;

    /// Lists all users.
    fn list_users(&self) -> Result<Box<dyn ExactSizeIterator<Item = User>>, UserStoreError>;

    /// Clone into a boxed, dynamically dispatched store
    fn clone_box(&self) -> Box<dyn UserStore>;
}

impl Clone for Box<dyn UserStore> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl<US> UserStore for Box<US>
where
    US: UserStore + ?Sized,
{
    fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        (**self).add_user(user)
    }

    fn update_user(&self, user: User) -> Result<(), UserStoreError> {
        (**self).update_user(user)
    }

    fn remove_user(&self, username: &str) -> Result<(), UserStoreError> {
        (**self).remove_user(username)
    }

    fn get_user(&self, username: &str) -> Result<Option<User>, UserStoreError> {
        (**self).get_user(username)
    }

    fn get_user_by_login(&self, login: &str) -> Result<Option<User>, UserStoreError> {
        (**self).get_user_by_login(login)
    }

    fn list_users(&self) -> Result<Box<dyn ExactSizeIterator<Item = User>>, UserStoreError> {
        (**self).list_users()
    }

    fn clone_box(&self) -> Box<dyn UserStore> {
        (**self).clone_box()
    }
}

#[cfg(feature = "diesel")]
impl From<User> for UserModel {
    fn from(user: User) -> Self {
        UserModel {
            username: user.username,
            email: user.email,
            secondary_email: user.secondary_email,
            first_name: user.first_name,
            last_name: user.last_name,
            birth_date: user.birth_date,
            pri_or_military_nbr: user.pri_or_military_nbr,
            password: user.password,
            last_password_change: user.last_password_change,
        }
    }
}

/// Cost to encrypt passwords. The recommended value is High. Values Low and
/// Medium may be used for development and testing as hashing and verifying
/// passwords will be completed faster.
#[derive(Debug, Deserialize, Copy, Clone)]
pub enum PasswordEncryptionCost {
    High,
    Medium,
    Low,
}

impl FromStr for PasswordEncryptionCost {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_ref() {
            "high" => Ok(PasswordEncryptionCost::High),
            "medium" => Ok(PasswordEncryptionCost::Medium),
            "low" => Ok(PasswordEncryptionCost::Low),
            _ => Err(format!(
                "Invalid cost value {}, must be high, medium or low",
                s
            )),
        }
    }
}

impl PasswordEncryptionCost {
    fn to_value(self) -> u32 {
        match self {
            PasswordEncryptionCost::High => DEFAULT_COST,
            PasswordEncryptionCost::Medium => MEDIUM_COST,
            PasswordEncryptionCost::Low => LOW_COST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify that the `UserBuilder` produces a user with all fields set and
    /// a password hash that verifies against the original plaintext.
    #[test]
    fn build_user_with_all_fields() {
        let user = UserBuilder::new()
            .with_username("ferris")
            .with_email("ferris@example.com")
            .with_secondary_email(Some("crab@example.com".to_string()))
            .with_first_name("Ferris")
            .with_last_name("Crab")
            .with_birth_date("2006-01-02")
            .with_pri_or_military_nbr(Some("A12345678".to_string()))
            .with_password("hunter2")
            .with_password_encryption_cost(PasswordEncryptionCost::Low)
            .build()
            .expect("Unable to build user");

        assert_eq!(user.username(), "ferris");
        assert_eq!(user.email(), "ferris@example.com");
        assert_eq!(user.secondary_email(), Some("crab@example.com"));
        assert_eq!(user.first_name(), "Ferris");
        assert_eq!(user.last_name(), "Crab");
        assert_eq!(user.birth_date(), "2006-01-02");
        assert_eq!(user.pri_or_military_nbr(), Some("A12345678"));
        assert_eq!(user.last_password_change(), None);
        assert_ne!(user.password(), "hunter2");
        assert!(user
            .verify_password("hunter2")
            .expect("Unable to verify password"));
        assert!(!user
            .verify_password("wrong")
            .expect("Unable to verify password"));
    }

    /// Verify that the `UserBuilder` rejects a missing username, an
    /// over-long birth date, and an over-long PRI number.
    #[test]
    fn build_user_invalid_fields() {
        assert!(UserBuilder::new()
            .with_email("ferris@example.com")
            .with_first_name("Ferris")
            .with_last_name("Crab")
            .with_birth_date("2006-01-02")
            .with_password("hunter2")
            .with_password_encryption_cost(PasswordEncryptionCost::Low)
            .build()
            .is_err());

        assert!(UserBuilder::new()
            .with_username("ferris")
            .with_email("ferris@example.com")
            .with_first_name("Ferris")
            .with_last_name("Crab")
            .with_birth_date("2006-01-02 00:00")
            .with_password("hunter2")
            .with_password_encryption_cost(PasswordEncryptionCost::Low)
            .build()
            .is_err());

        assert!(UserBuilder::new()
            .with_username("ferris")
            .with_email("ferris@example.com")
            .with_first_name("Ferris")
            .with_last_name("Crab")
            .with_birth_date("2006-01-02")
            .with_pri_or_military_nbr(Some("A123456789".to_string()))
            .with_password("hunter2")
            .with_password_encryption_cost(PasswordEncryptionCost::Low)
            .build()
            .is_err());
    }
}
