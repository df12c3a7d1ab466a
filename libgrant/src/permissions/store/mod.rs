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

//! This module defines the store trait for permissions and their grants to
//! users.

#[cfg(feature = "diesel")]
pub(in crate::permissions) mod diesel;
mod error;
pub(crate) mod memory;

use chrono::NaiveDateTime;

use crate::error::InvalidStateError;

pub use error::PermissionStoreError;

const MAX_NAME_LENGTH: usize = 75;
const MAX_DESCRIPTION_LENGTH: usize = 255;
const MAX_CODENAME_LENGTH: usize = 25;

/// A named capability that may be granted to users.
///
/// The numeric `permission_id` is assigned by the store and immutable once
/// assigned; the `codename` is the stable reference used by application
/// code.
#[derive(Clone, Debug, PartialEq)]
pub struct Permission {
    permission_id: i64,
    en_name: String,
    fr_name: String,
    en_description: String,
    fr_description: String,
    codename: String,
    content_type: String,
    date_assigned: NaiveDateTime,
    expiry_date: Option<NaiveDateTime>,
}

impl Permission {
    /// Returns the numeric id for the permission.
    pub fn permission_id(&self) -> i64 {
        self.permission_id
    }

    /// Returns the English name for the permission.
    pub fn en_name(&self) -> &str {
        &self.en_name
    }

    /// Returns the French name for the permission.
    pub fn fr_name(&self) -> &str {
        &self.fr_name
    }

    /// Returns the English description for the permission.
    pub fn en_description(&self) -> &str {
        &self.en_description
    }

    /// Returns the French description for the permission.
    pub fn fr_description(&self) -> &str {
        &self.fr_description
    }

    /// Returns the codename for the permission.
    pub fn codename(&self) -> &str {
        &self.codename
    }

    /// Returns the content type the permission governs.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the time the permission was created.
    pub fn date_assigned(&self) -> NaiveDateTime {
        self.date_assigned
    }

    /// Returns the time the permission expires, if one was set.
    pub fn expiry_date(&self) -> Option<NaiveDateTime> {
        self.expiry_date
    }
}

/// A permission that has not yet been added to a store.
///
/// The store assigns the `permission_id` and the creation timestamp when the
/// record is added.
#[derive(Clone, Debug, PartialEq)]
pub struct NewPermission {
    en_name: String,
    fr_name: String,
    en_description: String,
    fr_description: String,
    codename: String,
    content_type: String,
    expiry_date: Option<NaiveDateTime>,
}

impl NewPermission {
    /// Returns the codename for the permission.
    pub fn codename(&self) -> &str {
        &self.codename
    }
}

/// A builder to create new permissions.
#[derive(Default)]
pub struct PermissionBuilder {
    en_name: Option<String>,
    fr_name: Option<String>,
    en_description: Option<String>,
    fr_description: Option<String>,
    codename: Option<String>,
    content_type: Option<String>,
    expiry_date: Option<NaiveDateTime>,
}

impl PermissionBuilder {
    /// Constructs a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the English name for the new permission.
    pub fn with_en_name(mut self, en_name: String) -> Self {
        self.en_name = Some(en_name);
        self
    }

    /// Sets the French name for the new permission.
    pub fn with_fr_name(mut self, fr_name: String) -> Self {
        self.fr_name = Some(fr_name);
        self
    }

    /// Sets the English description for the new permission.
    pub fn with_en_description(mut self, en_description: String) -> Self {
        self.en_description = Some(en_description);
        self
    }

    /// Sets the French description for the new permission.
    pub fn with_fr_description(mut self, fr_description: String) -> Self {
        self.fr_description = Some(fr_description);
        self
    }

    /// Sets the codename for the new permission.
    pub fn with_codename(mut self, codename: String) -> Self {
        self.codename = Some(codename);
        self
    }

    /// Sets the content type the new permission governs.
    pub fn with_content_type(mut self, content_type: String) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Sets the expiry time for the new permission.
    pub fn with_expiry_date(mut self, expiry_date: Option<NaiveDateTime>) -> Self {
        self.expiry_date = expiry_date;
        self
    }

    /// Builds the new permission.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidStateError`] under the following conditions:
    /// * no codename or an empty codename was provided, or the codename is
    ///   longer than 25 characters
    /// * either name is missing, empty, or longer than 75 characters
    /// * either description is missing or longer than 255 characters
    /// * no content type was provided
    pub fn build(self) -> Result<NewPermission, InvalidStateError> {
        let codename = self.codename.ok_or_else(|| {
            InvalidStateError::with_message("A permission requires a codename field".into())
        })?;
        if codename.is_empty() {
            return Err(InvalidStateError::with_message(
                "A permission requires a non-empty codename field".into(),
            ));
        }
        if codename.chars().count() > MAX_CODENAME_LENGTH {
            return Err(InvalidStateError::with_message(format!(
                "A codename is at most {} characters",
                MAX_CODENAME_LENGTH
            )));
        }

        let en_name = self.en_name.ok_or_else(|| {
            InvalidStateError::with_message("A permission requires an en_name field".into())
        })?;
        let fr_name = self.fr_name.ok_or_else(|| {
            InvalidStateError::with_message("A permission requires a fr_name field".into())
        })?;
        for name in [&en_name, &fr_name].iter() {
            if name.is_empty() {
                return Err(InvalidStateError::with_message(
                    "A permission requires non-empty name fields".into(),
                ));
            }
            if name.chars().count() > MAX_NAME_LENGTH {
                return Err(InvalidStateError::with_message(format!(
                    "A permission name is at most {} characters",
                    MAX_NAME_LENGTH
                )));
            }
        }

        let en_description = self.en_description.ok_or_else(|| {
            InvalidStateError::with_message("A permission requires an en_description field".into())
        })?;
        let fr_description = self.fr_description.ok_or_else(|| {
            InvalidStateError::with_message("A permission requires a fr_description field".into())
        })?;
        for description in [&en_description, &fr_description].iter() {
            if description.chars().count() > MAX_DESCRIPTION_LENGTH {
                return Err(InvalidStateError::with_message(format!(
                    "A permission description is at most {} characters",
                    MAX_DESCRIPTION_LENGTH
                )));
            }
        }

        let content_type = self.content_type.ok_or_else(|| {
            InvalidStateError::with_message("A permission requires a content_type field".into())
        })?;

        Ok(NewPermission {
            en_name,
            fr_name,
            en_description,
            fr_description,
            codename,
            content_type,
            expiry_date: self.expiry_date,
        })
    }
}

/// A grant of one permission to one user.
///
/// The grant does not own the user or the permission; it is a pure relation
/// record, unique per (username, permission_id) pair.
#[derive(Clone, Debug, PartialEq)]
pub struct PermissionGrant {
    username: String,
    permission_id: i64,
}

impl PermissionGrant {
    /// Returns the username of the user holding the permission.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the id of the granted permission.
    pub fn permission_id(&self) -> i64 {
        self.permission_id
    }
}

/// A builder to create new permission grants.
#[derive(Default)]
pub struct PermissionGrantBuilder {
    username: Option<String>,
    permission_id: Option<i64>,
}

impl PermissionGrantBuilder {
    /// Constructs a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the username for the new grant.
    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    /// Sets the permission id for the new grant.
    pub fn with_permission_id(mut self, permission_id: i64) -> Self {
        self.permission_id = Some(permission_id);
        self
    }

    /// Builds the new grant.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidStateError`] if no username, an empty username,
    /// or no permission id was provided.
    pub fn build(self) -> Result<PermissionGrant, InvalidStateError> {
        let username = self.username.ok_or_else(|| {
            InvalidStateError::with_message("A grant requires a username field".into())
        })?;
        if username.is_empty() {
            return Err(InvalidStateError::with_message(
                "A grant requires a non-empty username field".into(),
            ));
        }
        let permission_id = self.permission_id.ok_or_else(|| {
            InvalidStateError::with_message("A grant requires a permission_id field".into())
        })?;

        Ok(PermissionGrant {
            username,
            permission_id,
        })
    }
}

/// Defines methods for CRUD operations on permission and grant data.
pub trait PermissionStore: Send + Sync {
    /// Adds a permission, returning the stored record with its assigned id
    /// and creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns a `ConstraintViolation` error if a permission with the same
    /// codename already exists.
    fn add_permission(&self, permission: NewPermission)
        -> Result<Permission, PermissionStoreError>;

    /// Returns the permission for the given id, if one exists.
    fn get_permission(&self, permission_id: i64)
        -> Result<Option<Permission>, PermissionStoreError>;

    /// Returns the permission for the given codename, if one exists.
    fn get_permission_by_codename(
        &self,
        codename: &str,
    ) -> Result<Option<Permission>, PermissionStoreError>;

    /// Lists all permissions, ordered by id.
    fn list_permissions(
        &self,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Permission>>, PermissionStoreError>;

    /// Removes a permission.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidState` error if the permission does not exist, and
    /// a `ConstraintViolation` error while grants still reference it.
    fn remove_permission(&self, permission_id: i64) -> Result<(), PermissionStoreError>;

    /// Adds a grant.
    ///
    /// # Errors
    ///
    /// Returns a `ConstraintViolation` error if there is a duplicate grant
    /// of a permission to a user, or if the referenced user or permission
    /// does not exist.
    fn add_grant(&self, grant: PermissionGrant) -> Result<(), PermissionStoreError>;

    /// Removes a grant.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidState` error if the grant does not exist.
    fn remove_grant(&self, username: &str, permission_id: i64)
        -> Result<(), PermissionStoreError>;

    /// Lists the grants held by the given user.
    fn list_grants(&self, username: &str) -> Result<Vec<PermissionGrant>, PermissionStoreError>;

    /// Returns the permissions granted to the given user, ordered by id and
    /// without duplicates. A user with no grants yields an empty iterator.
    fn get_granted_permissions(
        &self,
        username: &str,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Permission>>, PermissionStoreError>;

    /// Clone into a boxed, dynamically dispatched store
    fn clone_box(&self) -> Box<dyn PermissionStore>;
}

impl Clone for Box<dyn PermissionStore> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl<PS> PermissionStore for Box<PS>
where
    PS: PermissionStore + ?Sized,
{
    fn add_permission(
        &self,
        permission: NewPermission,
    ) -> Result<Permission, PermissionStoreError> {
        (**self).add_permission(permission)
    }

    fn get_permission(
        &self,
        permission_id: i64,
    ) -> Result<Option<Permission>, PermissionStoreError> {
        (**self).get_permission(permission_id)
    }

    fn get_permission_by_codename(
        &self,
        codename: &str,
    ) -> Result<Option<Permission>, PermissionStoreError> {
        (**self).get_permission_by_codename(codename)
    }

    fn list_permissions(
        &self,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Permission>>, PermissionStoreError> {
        (**self).list_permissions()
    }

    fn remove_permission(&self, permission_id: i64) -> Result<(), PermissionStoreError> {
        (**self).remove_permission(permission_id)
    }

    fn add_grant(&self, grant: PermissionGrant) -> Result<(), PermissionStoreError> {
        (**self).add_grant(grant)
    }

    fn remove_grant(
        &self,
        username: &str,
        permission_id: i64,
    ) -> Result<(), PermissionStoreError> {
        (**self).remove_grant(username, permission_id)
    }

    fn list_grants(&self, username: &str) -> Result<Vec<PermissionGrant>, PermissionStoreError> {
        (**self).list_grants(username)
    }

    fn get_granted_permissions(
        &self,
        username: &str,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Permission>>, PermissionStoreError> {
        (**self).get_granted_permissions(username)
    }

    fn clone_box(&self) -> Box<dyn PermissionStore> {
        (**self).clone_box()
    }
}
