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

use crate::config::error::ConfigError;
use crate::config::partial::{ConfigSource, PartialConfig};

/// Trait implemented by all of the `PartialConfig` builder modules.
pub trait PartialConfigBuilder {
    /// Takes all values set in a config object to create a `PartialConfig`
    /// object.
    fn build(self) -> Result<PartialConfig, ConfigError>;
}

/// The final configuration values for the daemon. Each value records the
/// source it was taken from.
#[derive(Debug)]
pub struct Config {
    config_dir: (String, ConfigSource),
    state_dir: (String, ConfigSource),
    bind: (String, ConfigSource),
    database: (String, ConfigSource),
    display_name: (String, ConfigSource),
}

impl Config {
    pub fn config_dir(&self) -> &str {
        &self.config_dir.0
    }

    pub fn state_dir(&self) -> &str {
        &self.state_dir.0
    }

    pub fn bind(&self) -> &str {
        &self.bind.0
    }

    pub fn database(&self) -> &str {
        &self.database.0
    }

    pub fn display_name(&self) -> &str {
        &self.display_name.0
    }

    fn config_dir_source(&self) -> &ConfigSource {
        &self.config_dir.1
    }

    fn state_dir_source(&self) -> &ConfigSource {
        &self.state_dir.1
    }

    fn bind_source(&self) -> &ConfigSource {
        &self.bind.1
    }

    fn database_source(&self) -> &ConfigSource {
        &self.database.1
    }

    fn display_name_source(&self) -> &ConfigSource {
        &self.display_name.1
    }

    /// Displays the configuration value along with where the value was
    /// sourced from.
    pub fn log_as_debug(&self) {
        debug!(
            "Config: config_dir: {} (source: {:?})",
            self.config_dir(),
            self.config_dir_source()
        );
        debug!(
            "Config: state_dir: {} (source: {:?})",
            self.state_dir(),
            self.state_dir_source()
        );
        debug!(
            "Config: bind: {} (source: {:?})",
            self.bind(),
            self.bind_source()
        );
        debug!(
            "Config: database: {} (source: {:?})",
            self.database(),
            self.database_source()
        );
        debug!(
            "Config: display_name: {} (source: {:?})",
            self.display_name(),
            self.display_name_source()
        );
    }
}

/// ConfigBuilder collects `PartialConfig` objects from various sources to be
/// merged into a final `Config` object. Sources added earlier take
/// precedence over sources added later.
#[derive(Default)]
pub struct ConfigBuilder {
    partial_configs: Vec<PartialConfig>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `PartialConfig` to the `ConfigBuilder` object.
    ///
    /// # Arguments
    ///
    /// * `partial` - A `PartialConfig` object generated from any of the
    ///   config modules.
    pub fn with_partial_config(mut self, partial: PartialConfig) -> Self {
        self.partial_configs.push(partial);
        self
    }

    /// Builds a `Config` object by incorporating the values from each
    /// `PartialConfig` object.
    pub fn build(self) -> Result<Config, ConfigError> {
        let config_dir = self
            .partial_configs
            .iter()
            .find_map(|partial| {
                partial
                    .config_dir()
                    .map(|value| (value, partial.source()))
            })
            .ok_or_else(|| ConfigError::MissingValue("config_dir".to_string()))?;
        let state_dir = self
            .partial_configs
            .iter()
            .find_map(|partial| {
                partial.state_dir().map(|value| (value, partial.source()))
            })
            .ok_or_else(|| ConfigError::MissingValue("state_dir".to_string()))?;
        let bind = self
            .partial_configs
            .iter()
            .find_map(|partial| partial.bind().map(|value| (value, partial.source())))
            .ok_or_else(|| ConfigError::MissingValue("bind".to_string()))?;
        let database = self
            .partial_configs
            .iter()
            .find_map(|partial| partial.database().map(|value| (value, partial.source())))
            .ok_or_else(|| ConfigError::MissingValue("database".to_string()))?;
        let display_name = self
            .partial_configs
            .iter()
            .find_map(|partial| {
                partial
                    .display_name()
                    .map(|value| (value, partial.source()))
            })
            .ok_or_else(|| ConfigError::MissingValue("display_name".to_string()))?;

        Ok(Config {
            config_dir,
            state_dir,
            bind,
            database,
            display_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify that values from a `PartialConfig` added earlier take
    /// precedence over values from one added later, and that unset values
    /// fall through to the later source.
    #[test]
    fn merge_partial_configs() {
        let command_line = PartialConfig::new(ConfigSource::CommandLine)
            .with_bind(Some("127.0.0.1:8085".to_string()));
        let defaults = PartialConfig::new(ConfigSource::Default)
            .with_config_dir(Some("/etc/grant".to_string()))
            .with_state_dir(Some("/var/lib/grant".to_string()))
            .with_bind(Some("127.0.0.1:8080".to_string()))
            .with_database(Some("grant_state.db".to_string()))
            .with_display_name(Some("grantd".to_string()));

        let config = ConfigBuilder::new()
            .with_partial_config(command_line)
            .with_partial_config(defaults)
            .build()
            .expect("Unable to build config");

        assert_eq!(config.bind(), "127.0.0.1:8085");
        assert_eq!(config.database(), "grant_state.db");
        assert_eq!(config.display_name(), "grantd");
    }

    /// Verify that a missing required value produces a `MissingValue`
    /// error.
    #[test]
    fn missing_value() {
        let command_line = PartialConfig::new(ConfigSource::CommandLine)
            .with_bind(Some("127.0.0.1:8085".to_string()));

        assert!(matches!(
            ConfigBuilder::new()
                .with_partial_config(command_line)
                .build(),
            Err(ConfigError::MissingValue(_))
        ));
    }
}
