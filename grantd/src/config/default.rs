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

//! `PartialConfig` builder using default values.

use crate::config::{ConfigError, ConfigSource, PartialConfig, PartialConfigBuilder};

const CONFIG_DIR: &str = "/etc/grant";
const STATE_DIR: &str = "/var/lib/grant";

const REST_API_ENDPOINT: &str = "127.0.0.1:8080";
const DATABASE: &str = "grant_state.db";
const DISPLAY_NAME: &str = "grantd";

pub struct DefaultPartialConfigBuilder;

impl DefaultPartialConfigBuilder {
    pub fn new() -> Self {
        DefaultPartialConfigBuilder {}
    }
}

/// Constructs a `PartialConfig` object from the
/// `DefaultPartialConfigBuilder`.
impl PartialConfigBuilder for DefaultPartialConfigBuilder {
    fn build(self) -> Result<PartialConfig, ConfigError> {
        let partial_config = PartialConfig::new(ConfigSource::Default)
            .with_config_dir(Some(String::from(CONFIG_DIR)))
            .with_state_dir(Some(String::from(STATE_DIR)))
            .with_bind(Some(String::from(REST_API_ENDPOINT)))
            .with_database(Some(String::from(DATABASE)))
            .with_display_name(Some(String::from(DISPLAY_NAME)));

        Ok(partial_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify that a `PartialConfig` built from the
    /// `DefaultPartialConfigBuilder` module carries the expected default
    /// values.
    #[test]
    fn test_default_config_values() {
        let config = DefaultPartialConfigBuilder::new()
            .build()
            .expect("Unable to build DefaultPartialConfigBuilder");

        assert_eq!(config.source(), ConfigSource::Default);
        assert_eq!(config.config_dir(), Some(String::from(CONFIG_DIR)));
        assert_eq!(config.state_dir(), Some(String::from(STATE_DIR)));
        assert_eq!(config.bind(), Some(String::from(REST_API_ENDPOINT)));
        assert_eq!(config.database(), Some(String::from(DATABASE)));
        assert_eq!(config.display_name(), Some(String::from(DISPLAY_NAME)));
    }
}
