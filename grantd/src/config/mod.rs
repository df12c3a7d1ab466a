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

//! Configuration for the daemon, built up from several sources: command
//! line arguments, a toml config file, environment variables, and defaults.
//! Sources are consulted in that order; the first source to provide a value
//! wins.

mod builder;
mod clap;
mod default;
mod env;
mod error;
mod partial;
mod toml;

pub use self::clap::ClapPartialConfigBuilder;
pub use self::toml::TomlPartialConfigBuilder;
pub use builder::{Config, ConfigBuilder, PartialConfigBuilder};
pub use default::DefaultPartialConfigBuilder;
pub use env::EnvPartialConfigBuilder;
pub use error::ConfigError;
pub use partial::{ConfigSource, PartialConfig};
