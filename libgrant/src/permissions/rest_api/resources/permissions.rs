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

//! REST API Response structs for permission queries.

use chrono::NaiveDateTime;

use crate::permissions::store::Permission;
use crate::rest_api::paging::Paging;

/// The serialized form of one permission.
///
/// This is an explicit field list, versioned with the API: fields added to
/// the store model are not exposed until they are added here. Both the
/// catalog and the per-user query serialize through this struct so every
/// endpoint exposes the same fields.
#[derive(Serialize)]
pub struct PermissionResponse<'a> {
    pub permission_id: i64,
    pub en_name: &'a str,
    pub fr_name: &'a str,
    pub en_description: &'a str,
    pub fr_description: &'a str,
    pub codename: &'a str,
    pub content_type: &'a str,
    pub date_assigned: NaiveDateTime,
    pub expiry_date: Option<NaiveDateTime>,
}

impl<'a> From<&'a Permission> for PermissionResponse<'a> {
    fn from(permission: &'a Permission) -> Self {
        Self {
            permission_id: permission.permission_id(),
            en_name: permission.en_name(),
            fr_name: permission.fr_name(),
            en_description: permission.en_description(),
            fr_description: permission.fr_description(),
            codename: permission.codename(),
            content_type: permission.content_type(),
            date_assigned: permission.date_assigned(),
            expiry_date: permission.expiry_date(),
        }
    }
}

#[derive(Serialize)]
pub struct ListPermissionsResponse<'a> {
    pub data: Vec<PermissionResponse<'a>>,
    pub paging: Paging,
}

#[derive(Serialize)]
pub struct UserPermissionsResponse<'a> {
    pub data: Vec<PermissionResponse<'a>>,
}
