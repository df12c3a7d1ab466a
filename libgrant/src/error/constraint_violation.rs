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

use std::error;
use std::fmt;

/// The type of constraint that was violated.
#[derive(Debug, PartialEq)]
pub enum ConstraintViolationType {
    Unique,
    ForeignKey,
    NotFound,
    Other(String),
}

impl fmt::Display for ConstraintViolationType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConstraintViolationType::Unique => f.write_str("Unique"),
            ConstraintViolationType::ForeignKey => f.write_str("ForeignKey"),
            ConstraintViolationType::NotFound => f.write_str("NotFound"),
            ConstraintViolationType::Other(msg) => f.write_str(msg),
        }
    }
}

/// An error which is returned because of a database constraint violation.
///
/// This error indicates that an update to a database failed because it would
/// have violated a constraint defined as part of the database's definition.
#[derive(Debug)]
pub struct ConstraintViolationError {
    violation_type: ConstraintViolationType,
    source: Option<Box<dyn error::Error>>,
}

impl ConstraintViolationError {
    /// Constructs a new `ConstraintViolationError` from a specified violation
    /// type.
    pub fn with_violation_type(violation_type: ConstraintViolationType) -> Self {
        Self {
            violation_type,
            source: None,
        }
    }

    /// Constructs a new `ConstraintViolationError` from a specified source
    /// error and violation type.
    pub fn from_source_with_violation_type(
        violation_type: ConstraintViolationType,
        source: Box<dyn error::Error>,
    ) -> Self {
        Self {
            violation_type,
            source: Some(source),
        }
    }

    /// Returns the type of constraint violated.
    pub fn violation_type(&self) -> &ConstraintViolationType {
        &self.violation_type
    }
}

impl error::Error for ConstraintViolationError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source.as_deref()
    }
}

impl fmt::Display for ConstraintViolationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}", source),
            None => match &self.violation_type {
                ConstraintViolationType::Unique => {
                    f.write_str("Unique constraint violated")
                }
                ConstraintViolationType::ForeignKey => {
                    f.write_str("Foreign key constraint violated")
                }
                ConstraintViolationType::NotFound => f.write_str("Record was not found"),
                ConstraintViolationType::Other(msg) => {
                    write!(f, "Constraint violated: {}", msg)
                }
            },
        }
    }
}
