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

/// ConfigSource displays the source of configuration values, used to
/// identify which of the various config modules were used to create a
/// particular PartialConfig object.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub enum ConfigSource {
    Toml { file: String },
    Default,
    Environment,
    CommandLine,
}

/// PartialConfig is an intermediate representation of configuration values,
/// used when combining several sources. As such, all values of the
/// PartialConfig are options as it is not necessary to provide all values
/// from a single source.
#[derive(Deserialize, Debug)]
pub struct PartialConfig {
    source: ConfigSource,
    config_dir: Option<String>,
    state_dir: Option<String>,
    bind: Option<String>,
    database: Option<String>,
    display_name: Option<String>,
}

impl PartialConfig {
    pub fn new(source: ConfigSource) -> Self {
        PartialConfig {
            source,
            config_dir: None,
            state_dir: None,
            bind: None,
            database: None,
            display_name: None,
        }
    }

    pub fn source(&self) -> ConfigSource {
        self.source.clone()
    }

    pub fn config_dir(&self) -> Option<String> {
        self.config_dir.clone()
    }

    pub fn state_dir(&self) -> Option<String> {
        self.state_dir.clone()
    }

    pub fn bind(&self) -> Option<String> {
        self.bind.clone()
    }

    pub fn database(&self) -> Option<String> {
        self.database.clone()
    }

    pub fn display_name(&self) -> Option<String> {
        self.display_name.clone()
    }

    /// Adds a `config_dir` value to the `PartialConfig` object.
    pub fn with_config_dir(mut self, config_dir: Option<String>) -> Self {
        self.config_dir = config_dir;
        self
    }

    /// Adds a `state_dir` value to the `PartialConfig` object.
    pub fn with_state_dir(mut self, state_dir: Option<String>) -> Self {
        self.state_dir = state_dir;
        self
    }

    /// Adds a `bind` value to the `PartialConfig` object.
    pub fn with_bind(mut self, bind: Option<String>) -> Self {
        self.bind = bind;
        self
    }

    /// Adds a `database` value to the `PartialConfig` object.
    pub fn with_database(mut self, database: Option<String>) -> Self {
        self.database = database;
        self
    }

    /// Adds a `display_name` value to the `PartialConfig` object.
    pub fn with_display_name(mut self, display_name: Option<String>) -> Self {
        self.display_name = display_name;
        self
    }
}
