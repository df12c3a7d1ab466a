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

//! `PartialConfig` builder using command line arguments.

use clap::ArgMatches;

use crate::config::{ConfigError, ConfigSource, PartialConfig, PartialConfigBuilder};

pub struct ClapPartialConfigBuilder<'a> {
    matches: ArgMatches<'a>,
}

impl<'a> ClapPartialConfigBuilder<'a> {
    pub fn new(matches: ArgMatches<'a>) -> Self {
        ClapPartialConfigBuilder { matches }
    }
}

/// Implementation of the `PartialConfigBuilder` trait to create a
/// `PartialConfig` object from the command line config options.
impl<'a> PartialConfigBuilder for ClapPartialConfigBuilder<'a> {
    fn build(self) -> Result<PartialConfig, ConfigError> {
        let partial_config = PartialConfig::new(ConfigSource::CommandLine)
            .with_config_dir(self.matches.value_of("config_dir").map(String::from))
            .with_state_dir(self.matches.value_of("state_dir").map(String::from))
            .with_bind(self.matches.value_of("bind").map(String::from))
            .with_database(self.matches.value_of("database").map(String::from))
            .with_display_name(self.matches.value_of("display_name").map(String::from));

        Ok(partial_config)
    }
}
