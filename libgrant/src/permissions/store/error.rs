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

#[cfg(any(feature = "postgres", feature = "sqlite"))]
use crate::error::ConstraintViolationType;
use crate::error::{
    ConstraintViolationError, InternalError, InvalidArgumentError, InvalidStateError,
};

/// Errors that may occur during [PermissionStore](super::PermissionStore)
/// operations.
#[derive(Debug)]
pub enum PermissionStoreError {
    ConstraintViolation(ConstraintViolationError),
    Internal(InternalError),
    InvalidArgument(InvalidArgumentError),
    InvalidState(InvalidStateError),
}

impl Error for PermissionStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PermissionStoreError::ConstraintViolation(err) => err.source(),
            PermissionStoreError::Internal(err) => err.source(),
            PermissionStoreError::InvalidArgument(err) => err.source(),
            PermissionStoreError::InvalidState(err) => err.source(),
        }
    }
}

impl fmt::Display for PermissionStoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PermissionStoreError::ConstraintViolation(err) => f.write_str(&err.to_string()),
            PermissionStoreError::Internal(err) => f.write_str(&err.to_string()),
            PermissionStoreError::InvalidArgument(err) => f.write_str(&err.to_string()),
            PermissionStoreError::InvalidState(err) => f.write_str(&err.to_string()),
        }
    }
}

#[cfg(feature = "diesel")]
impl From<diesel::r2d2::PoolError> for PermissionStoreError {
    fn from(err: diesel::r2d2::PoolError) -> PermissionStoreError {
        PermissionStoreError::Internal(InternalError::from_source(Box::new(err)))
    }
}

#[cfg(any(feature = "postgres", feature = "sqlite"))]
impl From<diesel::result::Error> for PermissionStoreError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::DatabaseError(ref kind, _) => match kind {
                diesel::result::DatabaseErrorKind::UniqueViolation => {
                    PermissionStoreError::ConstraintViolation(
                        ConstraintViolationError::from_source_with_violation_type(
                            ConstraintViolationType::Unique,
                            Box::new(err),
                        ),
                    )
                }
                diesel::result::DatabaseErrorKind::ForeignKeyViolation => {
                    PermissionStoreError::ConstraintViolation(
                        ConstraintViolationError::from_source_with_violation_type(
                            ConstraintViolationType::ForeignKey,
                            Box::new(err),
                        ),
                    )
                }
                _ => PermissionStoreError::Internal(InternalError::from_source(Box::new(err))),
            },
            _ => PermissionStoreError::Internal(InternalError::from_source(Box::new(err))),
        }
    }
}
