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

use chrono::NaiveDate;

use super::schema::users;

#[derive(Debug, PartialEq, Identifiable, Insertable, Queryable)]
#[table_name = "users"]
#[primary_key(username)]
pub struct UserModel {
    pub username: String,
    pub email: String,
    pub secondary_email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub pri_or_military_nbr: Option<String>,
    pub password: String,
    pub last_password_change: Option<NaiveDate>,
}
