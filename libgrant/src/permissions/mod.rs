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

//! Support for permission management.
//!
//! A permission is a named, bilingual-labeled capability with a unique
//! machine codename. Permissions are granted to users one at a time; the
//! store in this module maintains both the permission catalog and the
//! per-user grants, and resolves the set of permissions a user holds.

#[cfg(feature = "rest-api")]
pub mod rest_api;
pub mod store;

#[cfg(feature = "diesel")]
pub use store::diesel::DieselPermissionStore;
pub use store::memory::MemoryPermissionStore;
pub use store::{
    NewPermission, Permission, PermissionBuilder, PermissionGrant, PermissionGrantBuilder,
    PermissionStore, PermissionStoreError,
};
