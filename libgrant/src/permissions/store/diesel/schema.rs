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

table! {
    permissions (permission_id) {
        permission_id -> BigInt,
        en_name -> Text,
        fr_name -> Text,
        en_description -> Text,
        fr_description -> Text,
        codename -> Text,
        content_type -> Text,
        date_assigned -> Timestamp,
        expiry_date -> Nullable<Timestamp>,
    }
}

table! {
    user_permissions (id) {
        id -> BigInt,
        username -> Text,
        permission_id -> BigInt,
    }
}

joinable!(user_permissions -> permissions (permission_id));
allow_tables_to_appear_in_same_query!(permissions, user_permissions);
