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

//! Thread-friendly version of the store errors raised by permission query
//! endpoints. Store errors carry boxed sources that are not `Send`, so they
//! are reduced to these values before crossing the `web::block` boundary.

use std::error::Error;
use std::fmt;

use crate::error::InvalidStateError;
use crate::permissions::store::PermissionStoreError;
use crate::users::store::UserStoreError;

#[derive(Debug)]
pub(crate) enum SendablePermissionStoreError {
    ConstraintViolation(String),
    InternalError(String),
    InvalidState(InvalidStateError),
    NotFound(String),
}

impl Error for SendablePermissionStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SendablePermissionStoreError::ConstraintViolation(_) => None,
            SendablePermissionStoreError::InternalError(_) => None,
            SendablePermissionStoreError::InvalidState(err) => err.source(),
            SendablePermissionStoreError::NotFound(_) => None,
        }
    }
}

impl fmt::Display for SendablePermissionStoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SendablePermissionStoreError::ConstraintViolation(err) => f.write_str(err),
            SendablePermissionStoreError::InternalError(err) => f.write_str(err),
            SendablePermissionStoreError::InvalidState(err) => f.write_str(&err.to_string()),
            SendablePermissionStoreError::NotFound(msg) => f.write_str(msg),
        }
    }
}

impl From<PermissionStoreError> for SendablePermissionStoreError {
    fn from(err: PermissionStoreError) -> Self {
        match err {
            PermissionStoreError::ConstraintViolation(err) => {
                SendablePermissionStoreError::ConstraintViolation(err.to_string())
            }
            PermissionStoreError::InvalidState(err) => {
                SendablePermissionStoreError::InvalidState(err)
            }
            PermissionStoreError::InvalidArgument(err) => {
                SendablePermissionStoreError::InternalError(err.to_string())
            }
            PermissionStoreError::Internal(err) => {
                SendablePermissionStoreError::InternalError(err.reduce_to_string())
            }
        }
    }
}

impl From<UserStoreError> for SendablePermissionStoreError {
    fn from(err: UserStoreError) -> Self {
        match err {
            UserStoreError::ConstraintViolation(err) => {
                SendablePermissionStoreError::ConstraintViolation(err.to_string())
            }
            UserStoreError::InvalidState(err) => SendablePermissionStoreError::InvalidState(err),
            UserStoreError::InvalidArgument(err) => {
                SendablePermissionStoreError::InternalError(err.to_string())
            }
            UserStoreError::Internal(err) => {
                SendablePermissionStoreError::InternalError(err.reduce_to_string())
            }
        }
    }
}
