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

//! Support for user management.
//!
//! Provides an API for CRUD operations around managing users, including
//! looking a user up by either their username or their primary email
//! address.

pub mod store;

#[cfg(feature = "diesel")]
pub use store::diesel::DieselUserStore;
pub use store::memory::MemoryUserStore;
pub use store::{PasswordEncryptionCost, User, UserBuilder, UserStore, UserStoreError};
