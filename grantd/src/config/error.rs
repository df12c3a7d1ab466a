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
use std::io;

#[derive(Debug)]
pub enum ConfigError {
    MissingValue(String),
    ReadError { file: String, err: io::Error },
    StdError(io::Error),
    DeserializationError(String),
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::MissingValue(_) => None,
            ConfigError::ReadError { err, .. } => Some(err),
            ConfigError::StdError(err) => Some(err),
            ConfigError::DeserializationError(_) => None,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::MissingValue(config_field_name) => {
                write!(f, "Config value should be set: {}", config_field_name)
            }
            ConfigError::ReadError { file, err } => {
                write!(f, "Unable to read config file {}: {}", file, err)
            }
            ConfigError::StdError(err) => write!(f, "Std Error: {}", err),
            ConfigError::DeserializationError(msg) => {
                write!(f, "Unable to parse config file: {}", msg)
            }
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::StdError(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::DeserializationError(err.to_string())
    }
}
