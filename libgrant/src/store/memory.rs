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

//! Implementation of a `StoreFactory` for memory

use crate::permissions::{MemoryPermissionStore, PermissionStore};
use crate::users::{MemoryUserStore, UserStore};

use super::StoreFactory;

/// A `StoreFactory` backed by memory.
pub struct MemoryStoreFactory {
    permission_store: MemoryPermissionStore,
    user_store: MemoryUserStore,
}

impl MemoryStoreFactory {
    pub fn new() -> Self {
        let permission_store = MemoryPermissionStore::new();
        let user_store = MemoryUserStore::new(permission_store.clone());

        Self {
            permission_store,
            user_store,
        }
    }
}

impl Default for MemoryStoreFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreFactory for MemoryStoreFactory {
    fn get_user_store(&self) -> Box<dyn UserStore> {
        Box::new(self.user_store.clone())
    }

    fn get_permission_store(&self) -> Box<dyn PermissionStore> {
        Box::new(self.permission_store.clone())
    }
}
