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

pub(super) mod add_grant;
pub(super) mod add_permission;
pub(super) mod get_granted_permissions;
pub(super) mod get_permission;
pub(super) mod get_permission_by_codename;
pub(super) mod list_grants;
pub(super) mod list_permissions;
pub(super) mod remove_grant;
pub(super) mod remove_permission;

pub(super) struct PermissionStoreOperations<'a, C> {
    conn: &'a C,
}

impl<'a, C: diesel::Connection> PermissionStoreOperations<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        PermissionStoreOperations { conn }
    }
}
