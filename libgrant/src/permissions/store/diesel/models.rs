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

use chrono::NaiveDateTime;

use super::schema::{permissions, user_permissions};

#[derive(Debug, PartialEq, Identifiable, Queryable)]
#[table_name = "permissions"]
#[primary_key(permission_id)]
pub struct PermissionModel {
    pub permission_id: i64,
    pub en_name: String,
    pub fr_name: String,
    pub en_description: String,
    pub fr_description: String,
    pub codename: String,
    pub content_type: String,
    pub date_assigned: NaiveDateTime,
    pub expiry_date: Option<NaiveDateTime>,
}

#[derive(Debug, PartialEq, Insertable)]
#[table_name = "permissions"]
pub struct NewPermissionModel {
    pub en_name: String,
    pub fr_name: String,
    pub en_description: String,
    pub fr_description: String,
    pub codename: String,
    pub content_type: String,
    pub expiry_date: Option<NaiveDateTime>,
}

#[derive(Debug, PartialEq, Associations, Identifiable, Queryable)]
#[table_name = "user_permissions"]
#[belongs_to(PermissionModel, foreign_key = "permission_id")]
#[primary_key(id)]
pub struct GrantModel {
    pub id: i64,
    pub username: String,
    pub permission_id: i64,
}

#[derive(Debug, PartialEq, Insertable)]
#[table_name = "user_permissions"]
pub struct NewGrantModel {
    pub username: String,
    pub permission_id: i64,
}
