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

//! `PartialConfig` builder using values from environment variables.

use std::env;
use std::fs;
use std::path::Path;

use crate::config::{ConfigError, ConfigSource, PartialConfig, PartialConfigBuilder};

const CONFIG_DIR_ENV: &str = "GRANT_CONFIG_DIR";
const STATE_DIR_ENV: &str = "GRANT_STATE_DIR";
const GRANT_HOME_ENV: &str = "GRANT_HOME";

pub struct EnvPartialConfigBuilder;

impl EnvPartialConfigBuilder {
    pub fn new() -> Self {
        EnvPartialConfigBuilder {}
    }
}

/// Implementation of the `PartialConfigBuilder` trait to create a
/// `PartialConfig` object from the environment variable config options.
impl PartialConfigBuilder for EnvPartialConfigBuilder {
    fn build(self) -> Result<PartialConfig, ConfigError> {
        let config_dir_env = match (
            env::var(CONFIG_DIR_ENV).ok(),
            env::var(GRANT_HOME_ENV).ok(),
        ) {
            (Some(config_dir), _) => Some(config_dir),
            (None, Some(grant_home)) => {
                let opt_path = Path::new(&grant_home).join("etc");
                if !opt_path.is_dir() {
                    fs::create_dir_all(&opt_path).map_err(ConfigError::StdError)?;
                }
                opt_path.to_str().map(ToOwned::to_owned)
            }
            _ => None,
        };
        let state_dir_env = match (
            env::var(STATE_DIR_ENV).ok(),
            env::var(GRANT_HOME_ENV).ok(),
        ) {
            (Some(state_dir), _) => Some(state_dir),
            (None, Some(grant_home)) => {
                let opt_path = Path::new(&grant_home).join("data");
                if !opt_path.is_dir() {
                    fs::create_dir_all(&opt_path).map_err(ConfigError::StdError)?;
                }
                opt_path.to_str().map(ToOwned::to_owned)
            }
            _ => None,
        };

        Ok(PartialConfig::new(ConfigSource::Environment)
            .with_config_dir(config_dir_env)
            .with_state_dir(state_dir_env))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// This test verifies that a `PartialConfig` object, constructed from
    /// the `EnvPartialConfigBuilder` module, contains the correct values
    /// using the following steps:
    ///
    /// 1. Remove any existing environment variables which may be set.
    /// 2. A new `EnvPartialConfigBuilder` object is created and built into a
    ///    `PartialConfig`; no values should be set.
    /// 3. Set the environment variables for both the state and config
    ///    directories.
    /// 4. A new `EnvPartialConfigBuilder` object is created and built into a
    ///    `PartialConfig`; the directory values should reflect the
    ///    environment.
    #[test]
    fn test_environment_var_set_config() {
        // Remove any existing environment variables.
        env::remove_var(CONFIG_DIR_ENV);
        env::remove_var(STATE_DIR_ENV);
        env::remove_var(GRANT_HOME_ENV);

        let unset_config = EnvPartialConfigBuilder::new()
            .build()
            .expect("Unable to build EnvPartialConfigBuilder");
        assert_eq!(unset_config.source(), ConfigSource::Environment);
        assert_eq!(unset_config.config_dir(), None);
        assert_eq!(unset_config.state_dir(), None);

        // Set the environment variables.
        env::set_var(CONFIG_DIR_ENV, "config/test/config");
        env::set_var(STATE_DIR_ENV, "state/test/config");

        let set_config = EnvPartialConfigBuilder::new()
            .build()
            .expect("Unable to build EnvPartialConfigBuilder");
        assert_eq!(set_config.source(), ConfigSource::Environment);
        assert_eq!(
            set_config.config_dir(),
            Some(String::from("config/test/config"))
        );
        assert_eq!(
            set_config.state_dir(),
            Some(String::from("state/test/config"))
        );
    }
}
