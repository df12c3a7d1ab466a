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

use std::error::Error;
use std::fmt;

use grant::permissions::rest_api::{
    make_permissions_resource, make_user_permissions_resource,
};
use grant::rest_api::{Method, Resource, RestApiBuilder, RestApiServerError};
use grant::store::{create_store_factory, ConnectionUri};

use crate::routes;

/// The running daemon: owns the storage configuration and drives the REST
/// API lifecycle.
pub struct GrantDaemon {
    rest_api_endpoint: String,
    db_url: String,
    display_name: String,
}

impl GrantDaemon {
    pub fn start(&mut self) -> Result<(), StartError> {
        let connection_uri = self
            .db_url
            .parse::<ConnectionUri>()
            .map_err(|err| StartError::StorageError(err.to_string()))?;
        let store_factory = create_store_factory(connection_uri)
            .map_err(|err| StartError::StorageError(err.to_string()))?;

        let user_store = store_factory.get_user_store();
        let permission_store = store_factory.get_permission_store();

        let display_name = self.display_name.clone();
        let endpoint = self.rest_api_endpoint.clone();

        let rest_api_builder = RestApiBuilder::new()
            .with_bind(&self.rest_api_endpoint)
            .add_resource(
                Resource::build("/status").add_method(Method::Get, move |_, _| {
                    routes::get_status(display_name.clone(), endpoint.clone())
                }),
            )
            .add_resource(make_permissions_resource(permission_store.clone()))
            .add_resource(make_user_permissions_resource(user_store, permission_store));

        let (rest_api_shutdown_handle, rest_api_join_handle) = rest_api_builder.build()?.run()?;

        info!("Listening on {}", self.rest_api_endpoint);

        ctrlc::set_handler(move || {
            info!("Received Shutdown");

            if let Err(err) = rest_api_shutdown_handle.shutdown() {
                error!("Unable to cleanly shut down REST API server: {}", err);
            }
        })
        .expect("Error setting Ctrl-C handler");

        let _ = rest_api_join_handle.join();
        Ok(())
    }
}

/// Builder for the `GrantDaemon`.
#[derive(Default)]
pub struct GrantDaemonBuilder {
    rest_api_endpoint: Option<String>,
    db_url: Option<String>,
    display_name: Option<String>,
}

impl GrantDaemonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rest_api_endpoint(mut self, value: String) -> Self {
        self.rest_api_endpoint = Some(value);
        self
    }

    pub fn with_db_url(mut self, value: String) -> Self {
        self.db_url = Some(value);
        self
    }

    pub fn with_display_name(mut self, value: String) -> Self {
        self.display_name = Some(value);
        self
    }

    pub fn build(self) -> Result<GrantDaemon, CreateError> {
        let rest_api_endpoint = self.rest_api_endpoint.ok_or_else(|| {
            CreateError::MissingRequiredField("Missing field: rest_api_endpoint".to_string())
        })?;
        let db_url = self
            .db_url
            .ok_or_else(|| CreateError::MissingRequiredField("Missing field: db_url".to_string()))?;
        let display_name = self.display_name.ok_or_else(|| {
            CreateError::MissingRequiredField("Missing field: display_name".to_string())
        })?;

        Ok(GrantDaemon {
            rest_api_endpoint,
            db_url,
            display_name,
        })
    }
}

#[derive(Debug)]
pub enum CreateError {
    MissingRequiredField(String),
}

impl Error for CreateError {}

impl fmt::Display for CreateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CreateError::MissingRequiredField(msg) => write!(f, "unable to build, {}", msg),
        }
    }
}

#[derive(Debug)]
pub enum StartError {
    RestApiError(String),
    StorageError(String),
}

impl Error for StartError {}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StartError::RestApiError(msg) => write!(f, "REST API failed: {}", msg),
            StartError::StorageError(msg) => write!(f, "unable to set up storage: {}", msg),
        }
    }
}

impl From<RestApiServerError> for StartError {
    fn from(rest_api_error: RestApiServerError) -> Self {
        StartError::RestApiError(rest_api_error.to_string())
    }
}
