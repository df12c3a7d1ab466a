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

use std::error::Error;
use std::fmt;

use crate::config::ConfigError;
use crate::daemon::StartError;

#[derive(Debug)]
pub enum UserError {
    ConfigError(ConfigError),
    InvalidArgument(String),
    MissingArgument(String),
    DaemonError {
        context: String,
        source: Option<Box<dyn Error>>,
    },
}

impl UserError {
    pub fn daemon_err_with_source(context: &str, err: Box<dyn Error>) -> Self {
        UserError::DaemonError {
            context: context.into(),
            source: Some(err),
        }
    }
}

impl Error for UserError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            UserError::ConfigError(err) => Some(err),
            UserError::InvalidArgument(_) => None,
            UserError::MissingArgument(_) => None,
            UserError::DaemonError { source, .. } => source.as_deref(),
        }
    }
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UserError::ConfigError(err) => write!(f, "Config Error: {}", err),
            UserError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            UserError::MissingArgument(msg) => write!(f, "Missing argument: {}", msg),
            UserError::DaemonError { context, source } => match source {
                Some(source) => write!(f, "{}: {}", context, source),
                None => f.write_str(context),
            },
        }
    }
}

impl From<ConfigError> for UserError {
    fn from(err: ConfigError) -> Self {
        UserError::ConfigError(err)
    }
}

impl From<StartError> for UserError {
    fn from(err: StartError) -> Self {
        UserError::daemon_err_with_source("unable to start the Grant daemon", Box::new(err))
    }
}

impl From<std::io::Error> for UserError {
    fn from(err: std::io::Error) -> Self {
        UserError::daemon_err_with_source("io error", Box::new(err))
    }
}
