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
//! * `GET /permissions` for listing the permission catalog

use actix_web::{error::BlockingError, web, Error, HttpRequest, HttpResponse};
use futures::{Future, IntoFuture};

use crate::permissions::rest_api::resources::permissions::{
    ListPermissionsResponse, PermissionResponse,
};
use crate::permissions::store::PermissionStore;
use crate::rest_api::{
    paging::{get_response_paging_info, PagingQuery},
    ErrorResponse, Method, Resource,
};

use super::error::SendablePermissionStoreError;

pub fn make_permissions_resource(permission_store: Box<dyn PermissionStore>) -> Resource {
    Resource::build("/permissions").add_method(Method::Get, move |r, _| {
        list_permissions(r, web::Data::new(permission_store.clone()))
    })
}

fn list_permissions(
    req: HttpRequest,
    permission_store: web::Data<Box<dyn PermissionStore>>,
) -> Box<dyn Future<Item = HttpResponse, Error = Error>> {
    let web::Query(paging_query): web::Query<PagingQuery> =
        match web::Query::from_query(req.query_string()) {
            Ok(paging_query) => paging_query,
            Err(_) => {
                return Box::new(
                    HttpResponse::BadRequest()
                        .json(ErrorResponse::bad_request("Invalid query"))
                        .into_future(),
                )
            }
        };

    let link = format!("{}?", req.uri().path());

    Box::new(
        web::block(move || {
            let permissions = permission_store
                .list_permissions()
                .map_err(SendablePermissionStoreError::from)?;

            let total = permissions.len();
            let permissions = permissions
                .skip(paging_query.offset)
                .take(paging_query.limit)
                .collect::<Vec<_>>();

            Ok((permissions, link, paging_query, total))
        })
        .then(
            |res: Result<_, BlockingError<SendablePermissionStoreError>>| match res {
                Ok((permissions, link, paging_query, total)) => {
                    Ok(HttpResponse::Ok().json(ListPermissionsResponse {
                        data: permissions.iter().map(PermissionResponse::from).collect(),
                        paging: get_response_paging_info(
                            Some(paging_query.limit),
                            Some(paging_query.offset),
                            &link,
                            total,
                        ),
                    }))
                }
                Err(err) => {
                    error!("Unable to list permissions: {}", err);
                    Ok(HttpResponse::InternalServerError().json(ErrorResponse::internal_error()))
                }
            },
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use reqwest::{blocking::Client, StatusCode, Url};
    use serde_json::{to_value, Value as JsonValue};

    use crate::permissions::store::{
        memory::MemoryPermissionStore, PermissionBuilder, PermissionStore,
    };
    use crate::rest_api::{
        paging::Paging, RestApiBuilder, RestApiShutdownHandle,
    };

    /// Tests a GET /permissions request which returns the full catalog.
    ///
    /// 1. Add two permissions to a memory-backed store.
    /// 2. Issue the request and verify that the body holds exactly one
    ///    descriptor per permission, in id order, with distinct codenames.
    #[test]
    fn test_list_permissions_ok() {
        let permission_store = MemoryPermissionStore::new();

        let grade = permission_store
            .add_permission(create_permission("GRADE_EXAMS", "Grade exams"))
            .expect("Unable to add permission");
        let schedule = permission_store
            .add_permission(create_permission("SCHEDULE_EXAMS", "Schedule exams"))
            .expect("Unable to add permission");

        let (shutdown_handle, join_handle, bind_url) = run_rest_api_on_open_port(vec![
            make_permissions_resource(Box::new(permission_store)),
        ]);

        let url =
            Url::parse(&format!("http://{}/permissions", bind_url)).expect("Failed to parse URL");

        let resp = Client::new()
            .get(url)
            .send()
            .expect("Failed to perform request");

        assert_eq!(resp.status(), StatusCode::OK);
        let body: JsonValue = resp.json().expect("Failed to deserialize body");

        let json_permissions = body
            .get("data")
            .expect("No data field in response")
            .as_array()
            .expect("data field is not an array")
            .to_vec();

        assert_eq!(2, json_permissions.len());

        assert_eq!(
            &to_value(PermissionResponse::from(&grade)).expect("Failed to convert to value"),
            json_permissions.get(0).expect("no first item")
        );
        assert_eq!(
            &to_value(PermissionResponse::from(&schedule)).expect("Failed to convert to value"),
            json_permissions.get(1).expect("no second item")
        );

        let codenames = json_permissions
            .iter()
            .map(|permission| {
                permission
                    .get("codename")
                    .expect("no codename field")
                    .as_str()
                    .expect("codename is not a string")
            })
            .collect::<Vec<_>>();
        assert_eq!(codenames, vec!["GRADE_EXAMS", "SCHEDULE_EXAMS"]);

        assert_eq!(
            body.get("paging").expect("no paging field in response"),
            &to_value(create_test_paging_response(
                0,
                100,
                0,
                0,
                0,
                2,
                "/permissions?"
            ))
            .expect("failed to convert expected paging")
        );

        shutdown_handle
            .shutdown()
            .expect("Unable to shutdown rest api");
        join_handle.join().expect("Unable to join rest api thread");
    }

    /// Tests a GET /permissions request which returns the paged elements.
    /// It fetches the items on the second page and validates that the
    /// correct number are there.
    #[test]
    fn test_list_permissions_paging_ok() {
        let permission_store = MemoryPermissionStore::new();

        for i in 0..101 {
            permission_store
                .add_permission(create_permission(
                    &format!("PERM_{:0>3}", i),
                    &format!("Permission {}", i),
                ))
                .expect("Unable to add permission");
        }

        let (shutdown_handle, join_handle, bind_url) = run_rest_api_on_open_port(vec![
            make_permissions_resource(Box::new(permission_store)),
        ]);

        let url =
            Url::parse(&format!("http://{}/permissions", bind_url)).expect("Failed to parse URL");

        let resp = Client::new()
            .get(url)
            .send()
            .expect("Failed to perform request");

        assert_eq!(resp.status(), StatusCode::OK);
        let body: JsonValue = resp.json().expect("Failed to deserialize body");

        let json_permissions = body
            .get("data")
            .expect("No data field in response")
            .as_array()
            .expect("data field is not an array")
            .to_vec();
        assert_eq!(100, json_permissions.len());

        let next_link = body
            .get("paging")
            .and_then(|paging| paging.get("next"))
            .and_then(|next| next.as_str())
            .expect("paging.next field should be a string");

        let url =
            Url::parse(&format!("http://{}{}", bind_url, next_link)).expect("Failed to parse URL");

        let resp = Client::new()
            .get(url)
            .send()
            .expect("Failed to perform request");

        assert_eq!(resp.status(), StatusCode::OK);
        let body: JsonValue = resp.json().expect("Failed to deserialize body");

        let json_permissions = body
            .get("data")
            .expect("No data field in response")
            .as_array()
            .expect("data field is not an array")
            .to_vec();
        assert_eq!(1, json_permissions.len());

        assert_eq!(
            json_permissions
                .get(0)
                .and_then(|permission| permission.get("codename"))
                .and_then(|codename| codename.as_str()),
            Some("PERM_100")
        );

        shutdown_handle
            .shutdown()
            .expect("Unable to shutdown rest api");
        join_handle.join().expect("Unable to join rest api thread");
    }

    fn create_permission(
        codename: &str,
        en_name: &str,
    ) -> crate::permissions::store::NewPermission {
        PermissionBuilder::new()
            .with_en_name(en_name.into())
            .with_fr_name(format!("{} (fr)", en_name))
            .with_en_description("A permission".into())
            .with_fr_description("Une permission".into())
            .with_codename(codename.into())
            .with_content_type("exam".into())
            .build()
            .expect("Unable to build permission")
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

    fn create_test_paging_response(
        offset: usize,
        limit: usize,
        next_offset: usize,
        previous_offset: usize,
        last_offset: usize,
        total: usize,
        link: &str,
    ) -> Paging {
        let base_link = format!("{}limit={}&", link, limit);
        let current_link = format!("{}offset={}", base_link, offset);
        let first_link = format!("{}offset=0", base_link);
        let next_link = format!("{}offset={}", base_link, next_offset);
        let previous_link = format!("{}offset={}", base_link, previous_offset);
        let last_link = format!("{}offset={}", base_link, last_offset);

        Paging {
            current: current_link,
            offset,
            limit,
            total,
            first: first_link,
            prev: previous_link,
            next: next_link,
            last: last_link,
        }
    }
}
