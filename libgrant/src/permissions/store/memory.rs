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

//! A memory-backed implementation of the [PermissionStore]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use crate::error::{
    ConstraintViolationError, ConstraintViolationType, InternalError, InvalidStateError,
};

use super::{
    error::PermissionStoreError, NewPermission, Permission, PermissionGrant, PermissionStore,
};

#[derive(Default)]
struct MemoryPermissionStoreState {
    next_id: i64,
    permissions: BTreeMap<i64, Permission>,
    grants: Vec<PermissionGrant>,
}

/// A memory-backed implementation of the [PermissionStore].
#[derive(Clone, Default)]
pub struct MemoryPermissionStore {
    inner: Arc<Mutex<MemoryPermissionStoreState>>,
}

impl MemoryPermissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<MemoryPermissionStoreState>, PermissionStoreError> {
        self.inner.lock().map_err(|_| {
            PermissionStoreError::Internal(InternalError::with_message(
                "Cannot access permission store: mutex lock poisoned".to_string(),
            ))
        })
    }

    /// Returns the grants held by the given user. Used by the memory user
    /// store to uphold restrict-delete semantics.
    pub(crate) fn grants_for_user(
        &self,
        username: &str,
    ) -> Result<Vec<PermissionGrant>, PermissionStoreError> {
        let inner = self.lock()?;
        Ok(inner
            .grants
            .iter()
            .filter(|grant| grant.username == username)
            .cloned()
            .collect())
    }
}

impl PermissionStore for MemoryPermissionStore {
    fn add_permission(
        &self,
        permission: NewPermission,
    ) -> Result<Permission, PermissionStoreError> {
        let mut inner = self.lock()?;

        let duplicate = inner
            .permissions
            .values()
            .any(|existing| existing.codename == permission.codename);
        if duplicate {
            return Err(PermissionStoreError::ConstraintViolation(
                ConstraintViolationError::with_violation_type(ConstraintViolationType::Unique),
            ));
        }

        inner.next_id += 1;
        let stored = Permission {
            permission_id: inner.next_id,
            en_name: permission.en_name,
            fr_name: permission.fr_name,
            en_description: permission.en_description,
            fr_description: permission.fr_description,
            codename: permission.codename,
            content_type: permission.content_type,
            date_assigned: Utc::now().naive_utc(),
            expiry_date: permission.expiry_date,
        };
        inner.permissions.insert(stored.permission_id, stored.clone());
        Ok(stored)
    }

    fn get_permission(
        &self,
        permission_id: i64,
    ) -> Result<Option<Permission>, PermissionStoreError> {
        let inner = self.lock()?;
        Ok(inner.permissions.get(&permission_id).cloned())
    }

    fn get_permission_by_codename(
        &self,
        codename: &str,
    ) -> Result<Option<Permission>, PermissionStoreError> {
        let inner = self.lock()?;
        Ok(inner
            .permissions
            .values()
            .find(|permission| permission.codename == codename)
            .cloned())
    }

    fn list_permissions(
        &self,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Permission>>, PermissionStoreError> {
        let inner = self.lock()?;
        Ok(Box::new(
            inner
                .permissions
                .values()
                .cloned()
                .collect::<Vec<_>>()
                .into_iter(),
        ))
    }

    fn remove_permission(&self, permission_id: i64) -> Result<(), PermissionStoreError> {
        let mut inner = self.lock()?;

        if inner
            .grants
            .iter()
            .any(|grant| grant.permission_id == permission_id)
        {
            return Err(PermissionStoreError::ConstraintViolation(
                ConstraintViolationError::with_violation_type(ConstraintViolationType::ForeignKey),
            ));
        }

        if inner.permissions.remove(&permission_id).is_some() {
            Ok(())
        } else {
            Err(PermissionStoreError::InvalidState(
                InvalidStateError::with_message(
                    "A permission with the given id does not exist".to_string(),
                ),
            ))
        }
    }

    fn add_grant(&self, grant: PermissionGrant) -> Result<(), PermissionStoreError> {
        let mut inner = self.lock()?;

        if !inner.permissions.contains_key(&grant.permission_id) {
            return Err(PermissionStoreError::ConstraintViolation(
                ConstraintViolationError::with_violation_type(ConstraintViolationType::ForeignKey),
            ));
        }

        let duplicate = inner.grants.iter().any(|existing| {
            existing.username == grant.username && existing.permission_id == grant.permission_id
        });
        if duplicate {
            return Err(PermissionStoreError::ConstraintViolation(
                ConstraintViolationError::with_violation_type(ConstraintViolationType::Unique),
            ));
        }

        inner.grants.push(grant);
        Ok(())
    }

    fn remove_grant(
        &self,
        username: &str,
        permission_id: i64,
    ) -> Result<(), PermissionStoreError> {
        let mut inner = self.lock()?;

        let position = inner.grants.iter().position(|grant| {
            grant.username == username && grant.permission_id == permission_id
        });
        match position {
            Some(index) => {
                inner.grants.remove(index);
                Ok(())
            }
            None => Err(PermissionStoreError::InvalidState(
                InvalidStateError::with_message(
                    "A grant for the given username and permission id does not exist".to_string(),
                ),
            )),
        }
    }

    fn list_grants(&self, username: &str) -> Result<Vec<PermissionGrant>, PermissionStoreError> {
        self.grants_for_user(username)
    }

    fn get_granted_permissions(
        &self,
        username: &str,
    ) -> Result<Box<dyn ExactSizeIterator<Item = Permission>>, PermissionStoreError> {
        let inner = self.lock()?;
        let mut permission_ids = inner
            .grants
            .iter()
            .filter(|grant| grant.username == username)
            .map(|grant| grant.permission_id)
            .collect::<Vec<_>>();
        permission_ids.sort_unstable();

        let permissions = permission_ids
            .into_iter()
            .filter_map(|id| inner.permissions.get(&id).cloned())
            .collect::<Vec<_>>();
        Ok(Box::new(permissions.into_iter()))
    }

    fn clone_box(&self) -> Box<dyn PermissionStore> {
        Box::new(self.clone())
    }
}
