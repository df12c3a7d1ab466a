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

//! Grant is a permissions-management library. It maintains users, named
//! permissions, and per-user permission grants, and answers the question
//! "which permissions does this user hold" over a REST API.
//!
//! The library is organized around store traits with interchangeable
//! backends: a database-backed implementation powered by diesel (PostgreSQL
//! or SQLite) and an in-memory implementation suitable for testing and
//! development.

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[macro_use]
#[cfg(feature = "rest-api")]
extern crate serde_json;
#[macro_use]
#[cfg(feature = "diesel")]
extern crate diesel;
#[macro_use]
#[cfg(any(feature = "postgres", feature = "sqlite"))]
extern crate diesel_migrations;

pub mod error;
#[cfg(any(feature = "postgres", feature = "sqlite"))]
pub mod migrations;
pub mod permissions;
#[cfg(feature = "rest-api")]
pub mod rest_api;
#[cfg(feature = "store-factory")]
pub mod store;
pub mod users;

#[cfg(feature = "rest-api")]
pub use actix_web;
#[cfg(feature = "rest-api")]
pub use futures;
