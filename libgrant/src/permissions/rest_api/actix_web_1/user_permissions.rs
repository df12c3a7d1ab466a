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

//! This module provides the following endpoints:
//!
//! * `GET /permissions/user?username={username}` for resolving the
//!   permissions granted to one user
//!
//! The username is matched exactly. A missing, empty, or literal
//! `"undefined"` username (a sentinel some web front ends pass through) is a
//! bad request; an unknown username is not found; a known user with no
//! grants yields an empty list.

use std::collections::HashMap;

use actix_web::{error::BlockingError, web, Error, HttpRequest, HttpResponse};
use futures::{Future, IntoFuture};

use crate::permissions::rest_api::resources::permissions::{
    PermissionResponse, UserPermissionsResponse,
};
use crate::permissions::store::PermissionStore;
use crate::rest_api::{ErrorResponse, Method, Resource};
use crate::users::store::UserStore;

use super::error::SendablePermissionStoreError;

pub fn make_user_permissions_resource(
    user_store: Box<dyn UserStore>,
    permission_store: Box<dyn PermissionStore>,
) -> Resource {
    Resource::build("/permissions/user").add_method(Method::Get, move |r, _| {
        get_user_permissions(
            r,
            web::Data::new(user_store.clone()),
            web::Data::new(permission_store.clone()),
        )
    })
}

fn get_user_permissions(
    req: HttpRequest,
    user_store: web::Data<Box<dyn UserStore>>,
    permission_store: web::Data<Box<dyn PermissionStore>>,
) -> Box<dyn Future<Item = HttpResponse, Error = Error>> {
    let web::Query(query): web::Query<HashMap<String, String>> =
        match web::Query::from_query(req.query_string()) {
            Ok(query) => query,
            Err(_) => {
                return Box::new(
                    HttpResponse::BadRequest()
                        .json(ErrorResponse::bad_request("Invalid query"))
                        .into_future(),
                )
            }
        };

    let username = match query.get("username") {
        Some(username) if !is_undefined(username) => username.to_string(),
        _ => {
            return Box::new(
                HttpResponse::BadRequest()
                    .json(ErrorResponse::bad_request(
                        "Missing required query parameter: username",
                    ))
                    .into_future(),
            )
        }
    };

    Box::new(
        web::block(move || {
            let user = user_store
                .get_user(&username)
                .map_err(SendablePermissionStoreError::from)?;
            if user.is_none() {
                return Err(SendablePermissionStoreError::NotFound(format!(
                    "User {} not found",
                    username
                )));
            }

            let permissions = permission_store
                .get_granted_permissions(&username)
                .map_err(SendablePermissionStoreError::from)?
                .collect::<Vec<_>>();

            Ok(permissions)
        })
        .then(
            |res: Result<_, BlockingError<SendablePermissionStoreError>>| match res {
                Ok(permissions) => Ok(HttpResponse::Ok().json(UserPermissionsResponse {
                    data: permissions.iter().map(PermissionResponse::from).collect(),
                })),
                Err(BlockingError::Error(SendablePermissionStoreError::NotFound(msg))) => {
                    Ok(HttpResponse::NotFound().json(ErrorResponse::not_found(&msg)))
                }
                Err(err) => {
                    error!("Unable to get user permissions: {}", err);
                    Ok(HttpResponse::InternalServerError().json(ErrorResponse::internal_error()))
                }
            },
        ),
    )
}

fn is_undefined(username: &str) -> bool {
    username.is_empty() || username == "undefined"
}

#[cfg(test)]
mod tests {
    use super::*;

    use reqwest::{blocking::Client, StatusCode, Url};
    use serde_json::{to_value, Value as JsonValue};

    use crate::permissions::store::{
        memory::MemoryPermissionStore, PermissionBuilder, PermissionGrantBuilder,
    };
    use crate::rest_api::{RestApiBuilder, RestApiShutdownHandle};
    use crate::users::store::{memory::MemoryUserStore, PasswordEncryptionCost, UserBuilder};

    /// Tests a GET /permissions/user request for a user holding one
    /// permission.
    ///
    /// 1. Add a user, a permission, and a grant connecting them.
    /// 2. Issue the request and verify the body holds exactly the granted
    ///    permission's descriptor.
    #[test]
    fn test_get_user_permissions_ok() {
        let permission_store = MemoryPermissionStore::new();
        let user_store = MemoryUserStore::new(permission_store.clone());

        user_store
            .add_user(create_user("alice"))
            .expect("Unable to add user");

        let permission = permission_store
            .add_permission(
                PermissionBuilder::new()
                    .with_en_name("Grade exams".into())
                    .with_fr_name("Corriger les examens".into())
                    .with_en_description("Allows the holder to grade exams".into())
                    .with_fr_description("Permet de corriger les examens".into())
                    .with_codename("GRADE_EXAMS".into())
                    .with_content_type("exam".into())
                    .build()
                    .expect("Unable to build permission"),
            )
            .expect("Unable to add permission");

        permission_store
            .add_grant(
                PermissionGrantBuilder::new()
                    .with_username("alice".into())
                    .with_permission_id(permission.permission_id())
                    .build()
                    .expect("Unable to build grant"),
            )
            .expect("Unable to add grant");

        let (shutdown_handle, join_handle, bind_url) =
            run_rest_api_on_open_port(vec![make_user_permissions_resource(
                Box::new(user_store),
                Box::new(permission_store),
            )]);

        let url = Url::parse(&format!(
            "http://{}/permissions/user?username=alice",
            bind_url
        ))
        .expect("Failed to parse URL");

        let resp = Client::new()
            .get(url)
            .send()
            .expect("Failed to perform request");

        assert_eq!(resp.status(), StatusCode::OK);
        let body: JsonValue = resp.json().expect("Failed to deserialize body");

        assert_eq!(
            json!({
                "data": [
                    to_value(PermissionResponse::from(&permission))
                        .expect("Failed to convert to value")
                ]
            }),
            body
        );

        shutdown_handle
            .shutdown()
            .expect("Unable to shutdown rest api");
        join_handle.join().expect("Unable to join rest api thread");
    }

    /// Tests that a GET /permissions/user request for a user with no grants
    /// returns an empty list, not an error.
    #[test]
    fn test_get_user_permissions_candidate() {
        let permission_store = MemoryPermissionStore::new();
        let user_store = MemoryUserStore::new(permission_store.clone());

        user_store
            .add_user(create_user("alice"))
            .expect("Unable to add user");

        let (shutdown_handle, join_handle, bind_url) =
            run_rest_api_on_open_port(vec![make_user_permissions_resource(
                Box::new(user_store),
                Box::new(permission_store),
            )]);

        let url = Url::parse(&format!(
            "http://{}/permissions/user?username=alice",
            bind_url
        ))
        .expect("Failed to parse URL");

        let resp = Client::new()
            .get(url)
            .send()
            .expect("Failed to perform request");

        assert_eq!(resp.status(), StatusCode::OK);
        let body: JsonValue = resp.json().expect("Failed to deserialize body");
        assert_eq!(json!({ "data": [] }), body);

        shutdown_handle
            .shutdown()
            .expect("Unable to shutdown rest api");
        join_handle.join().expect("Unable to join rest api thread");
    }

    /// Tests that a GET /permissions/user request without a username, with
    /// an empty username, and with the literal sentinel "undefined" all
    /// return a 400 with an error body.
    #[test]
    fn test_get_user_permissions_missing_param() {
        let permission_store = MemoryPermissionStore::new();
        let user_store = MemoryUserStore::new(permission_store.clone());

        let (shutdown_handle, join_handle, bind_url) =
            run_rest_api_on_open_port(vec![make_user_permissions_resource(
                Box::new(user_store),
                Box::new(permission_store),
            )]);

        for query in &["", "?username=", "?username=undefined"] {
            let url = Url::parse(&format!("http://{}/permissions/user{}", bind_url, query))
                .expect("Failed to parse URL");

            let resp = Client::new()
                .get(url)
                .send()
                .expect("Failed to perform request");

            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: JsonValue = resp.json().expect("Failed to deserialize body");
            assert_eq!(
                body.get("code").and_then(|code| code.as_str()),
                Some("400")
            );
        }

        shutdown_handle
            .shutdown()
            .expect("Unable to shutdown rest api");
        join_handle.join().expect("Unable to join rest api thread");
    }

    /// Tests that a GET /permissions/user request for an unknown username
    /// returns a 404 with an error body.
    #[test]
    fn test_get_user_permissions_unknown_user() {
        let permission_store = MemoryPermissionStore::new();
        let user_store = MemoryUserStore::new(permission_store.clone());

        let (shutdown_handle, join_handle, bind_url) =
            run_rest_api_on_open_port(vec![make_user_permissions_resource(
                Box::new(user_store),
                Box::new(permission_store),
            )]);

        let url = Url::parse(&format!(
            "http://{}/permissions/user?username=no-such-user",
            bind_url
        ))
        .expect("Failed to parse URL");

        let resp = Client::new()
            .get(url)
            .send()
            .expect("Failed to perform request");

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: JsonValue = resp.json().expect("Failed to deserialize body");
        assert_eq!(
            body.get("code").and_then(|code| code.as_str()),
            Some("404")
        );

        shutdown_handle
            .shutdown()
            .expect("Unable to shutdown rest api");
        join_handle.join().expect("Unable to join rest api thread");
    }

    fn create_user(username: &str) -> crate::users::User {
        UserBuilder::new()
            .with_username(username)
            .with_email(&format!("{}@example.com", username))
            .with_first_name("Alice")
            .with_last_name("Smith")
            .with_birth_date("2006-01-02")
            .with_password("hunter2")
            .with_password_encryption_cost(PasswordEncryptionCost::Low)
            .build()
            .expect("Unable to build user")
    }

    fn run_rest_api_on_open_port(
        resources: Vec<Resource>,
    ) -> (RestApiShutdownHandle, std::thread::JoinHandle<()>, String) {
        let result = RestApiBuilder::new()
            .with_bind("127.0.0.1:0")
            .add_resources(resources)
            .build()
            .expect("Failed to build REST API")
            .run();
        match result {
            Ok((shutdown_handle, join_handle)) => {
                let port = shutdown_handle.port_numbers()[0];
                (shutdown_handle, join_handle, format!("127.0.0.1:{}", port))
            }
            Err(err) => panic!("Failed to run REST API: {}", err),
        }
    }
}
