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

/// An error which is returned for reasons internal to the function.
///
/// This error is produced when a failure occurred within the function but the
/// failure is due to an internal implementation detail of the function. This
/// generally means that there is no specific information which can be
/// returned that would help the caller of the function recover or otherwise
/// take action.
#[derive(Debug)]
pub struct InternalError {
    message: Option<String>,
    source: Option<Box<dyn error::Error>>,
    prefix: Option<String>,
}

impl InternalError {
    /// Constructs a new `InternalError` from a specified source error.
    pub fn from_source(source: Box<dyn error::Error>) -> Self {
        Self {
            message: None,
            source: Some(source),
            prefix: None,
        }
    }

    /// Constructs a new `InternalError` from a specified source error and
    /// message string. The message is returned by `Display` instead of the
    /// source's message.
    pub fn from_source_with_message(source: Box<dyn error::Error>, message: String) -> Self {
        Self {
            message: Some(message),
            source: Some(source),
            prefix: None,
        }
    }

    /// Constructs a new `InternalError` from a specified source error and
    /// prefix string, displayed as `format!("{}: {}", prefix, source)`.
    pub fn from_source_with_prefix(source: Box<dyn error::Error>, prefix: String) -> Self {
        Self {
            message: None,
            source: Some(source),
            prefix: Some(prefix),
        }
    }

    /// Constructs a new `InternalError` with a specified message string.
    pub fn with_message(message: String) -> Self {
        Self {
            message: Some(message),
            source: None,
            prefix: None,
        }
    }

    /// Reduces the `InternalError` to the display string.
    ///
    /// If the error includes a source, the debug format will be logged to
    /// provide information that may be lost on the conversion.
    pub fn reduce_to_string(self) -> String {
        if self.source.is_some() {
            debug!("{:?}", self);
        }
        self.to_string()
    }
}

impl error::Error for InternalError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source.as_deref()
    }
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.message, &self.source, &self.prefix) {
            (Some(message), _, _) => write!(f, "{}", message),
            (None, Some(source), Some(prefix)) => write!(f, "{}: {}", prefix, source),
            (None, Some(source), None) => write!(f, "{}", source),
            (None, None, _) => write!(f, "Internal error occurred"),
        }
    }
}
