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

//! A memory-backed implementation of the [UserStore]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::error::{
    ConstraintViolationError, ConstraintViolationType, InternalError, InvalidStateError,
};
use crate::permissions::store::memory::MemoryPermissionStore;

use super::{error::UserStoreError, User, UserStore};

/// A memory-backed implementation of the [UserStore].
///
/// The permission store is consulted on removal so that the restrict-delete
/// semantics of the database-backed store hold here as well.
#[derive(Clone)]
pub struct MemoryUserStore {
    inner: Arc<Mutex<BTreeMap<String, User>>>,
    permission_store: MemoryPermissionStore,
}

impl MemoryUserStore {
    pub fn new(permission_store: MemoryPermissionStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BTreeMap::new())),
            permission_store,
        }
    }
}

impl UserStore for MemoryUserStore {
    fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let mut inner = self.inner.lock().map_err(|_| {
            UserStoreError::Internal(InternalError::with_message(
                "Cannot access user store: mutex lock poisoned".to_string(),
            ))
        })?;

        let duplicate = inner
            .values()
            .any(|existing| existing.username == user.username || existing.email == user.email);
        if duplicate {
            return Err(UserStoreError::ConstraintViolation(
                ConstraintViolationError::with_violation_type(ConstraintViolationType::Unique),
            ));
        }

        inner.insert(user.username.clone(), user);
        Ok(())
    }

    fn update_user(&self, user: User) -> Result<(), UserStoreError> {
        let mut inner = self.inner.lock().map_err(|_| {
            UserStoreError::Internal(InternalError::with_message(
                "Cannot access user store: mutex lock poisoned".to_string(),
            ))
        })?;
        if inner.contains_key(&user.username) {
            inner.insert(user.username.clone(), user);
            Ok(())
        } else {
            Err(UserStoreError::InvalidState(
                InvalidStateError::with_message(
                    "A user with the given username does not exist".to_string(),
                ),
            ))
        }
    }

    fn remove_user(&self, username: &str) -> Result<(), UserStoreError> {
        let grants = self
            .permission_store
            .grants_for_user(username)
            .map_err(|err| {
                UserStoreError::Internal(InternalError::from_source_with_prefix(
                    Box::new(err),
                    "Failed to check grants for user".to_string(),
                ))
            })?;
        if !grants.is_empty() {
            return Err(UserStoreError::ConstraintViolation(
                ConstraintViolationError::with_violation_type(ConstraintViolationType::ForeignKey),
            ));
        }

        let mut inner = self.inner.lock().map_err(|_| {
            UserStoreError::Internal(InternalError::with_message(
                "Cannot access user store: mutex lock poisoned".to_string(),
            ))
        })?;
        if inner.remove(username).is_some() {
            Ok(())
        } else {
            Err(UserStoreError::InvalidState(
                InvalidStateError::with_message(
                    "A user with the given username does not exist".to_string(),
                ),
            ))
        }
    }

    fn get_user(&self, username: &str) -> Result<Option<User>, UserStoreError> {
        let inner = self.inner.lock().map_err(|_| {
            UserStoreError::Internal(InternalError::with_message(
                "Cannot access user store: mutex lock poisoned".to_string(),
            ))
        })?;
        Ok(inner.get(username).cloned())
    }

    fn get_user_by_login(&self, login: &str) -> Result<Option<User>, UserStoreError> {
        let inner = self.inner.lock().map_err(|_| {
            UserStoreError::Internal(InternalError::with_message(
                "Cannot access user store: mutex lock poisoned".to_string(),
            ))
        })?;
        if let Some(user) = inner.get(login) {
            return Ok(Some(user.clone()));
        }
        Ok(inner.values().find(|user| user.email == login).cloned())
    }

    fn list_users(&self) -> Result<Box<dyn ExactSizeIterator<Item = User>>, UserStoreError> {
        let inner = self.inner.lock().map_err(|_| {
            UserStoreError::Internal(InternalError::with_message(
                "Cannot access user store: mutex lock poisoned".to_string(),
            ))
        })?;
        Ok(Box::new(
            inner.values().cloned().collect::<Vec<_>>().into_iter(),
        ))
    }

    fn clone_box(&self) -> Box<dyn UserStore> {
        Box::new(self.clone())
    }
}
