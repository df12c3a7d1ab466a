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

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate clap;

mod config;
mod daemon;
mod error;
mod routes;

use std::fs;
use std::path::Path;
use std::thread;

use clap::{clap_app, crate_version};
use clap::{Arg, ArgMatches};
use flexi_logger::{style, DeferredNow, LogSpecBuilder, Logger};
use log::Record;

use crate::config::{
    ClapPartialConfigBuilder, Config, ConfigBuilder, ConfigError, DefaultPartialConfigBuilder,
    EnvPartialConfigBuilder, PartialConfigBuilder, TomlPartialConfigBuilder,
};
use crate::daemon::GrantDaemonBuilder;
use crate::error::UserError;

fn create_config(_toml_path: Option<&str>, _matches: ArgMatches) -> Result<Config, UserError> {
    let mut builder = ConfigBuilder::new();

    let clap_config = ClapPartialConfigBuilder::new(_matches).build()?;
    builder = builder.with_partial_config(clap_config);

    if let Some(file) = _toml_path {
        debug!("Loading config toml file: {:?}", fs::canonicalize(file)?);
        let toml_string = fs::read_to_string(file).map_err(|err| ConfigError::ReadError {
            file: String::from(file),
            err,
        })?;
        let toml_config = TomlPartialConfigBuilder::new(toml_string, String::from(file))
            .map_err(UserError::ConfigError)?
            .build()?;
        builder = builder.with_partial_config(toml_config);
    }

    let env_config = EnvPartialConfigBuilder::new().build()?;
    builder = builder.with_partial_config(env_config);

    let default_config = DefaultPartialConfigBuilder::new().build()?;
    builder = builder.with_partial_config(default_config);

    builder
        .build()
        .map_err(|e| UserError::MissingArgument(e.to_string()))
}

// format for logs
pub fn log_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    let level = record.level();
    write!(
        w,
        "[{}] T[{:?}] {} [{}] {}",
        now.now().format("%Y-%m-%d %H:%M:%S%.3f"),
        thread::current().name().unwrap_or("<unnamed>"),
        record.level(),
        record.module_path().unwrap_or("<unnamed>"),
        style(level, &record.args()),
    )
}

fn main() {
    let app = clap_app!(grantd =>
        (version: crate_version!())
        (about: "Grant Daemon")
        (@arg config: -c --config +takes_value)
        (@arg display_name: --("display-name") +takes_value
          "Human-readable name for the service")
        (@arg bind: --("bind") +takes_value
          "Connection endpoint for REST API")
        (@arg verbose: -v --verbose +multiple
          "Increase output verbosity"));

    let app = app
        .arg(
            Arg::with_name("config_dir")
                .long("config-dir")
                .help("Path to the directory containing configuration files")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("state_dir")
                .long("state-dir")
                .help("Path to the directory containing daemon state")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("database")
                .long("database")
                .long_help("DB connection URL")
                .takes_value(true),
        );

    let matches = app.get_matches();

    let log_level = match matches.occurrences_of("verbose") {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let mut log_spec_builder = LogSpecBuilder::new();
    log_spec_builder.default(log_level);
    log_spec_builder.module("hyper", log::LevelFilter::Warn);
    log_spec_builder.module("tokio", log::LevelFilter::Warn);

    Logger::with(log_spec_builder.build())
        .format(log_format)
        .log_target(flexi_logger::LogTarget::StdOut)
        .start()
        .expect("Failed to create logger");

    if let Err(err) = start_daemon(matches) {
        error!("Failed to start daemon, {}", err);
        std::process::exit(1);
    }
}

fn start_daemon(matches: ArgMatches) -> Result<(), UserError> {
    // get provided config file or search default location
    let config_file = matches
        .value_of("config")
        .unwrap_or("/etc/grant/grantd.toml");

    let config_file_path = if Path::new(&config_file).is_file() {
        Some(config_file)
    } else {
        None
    };

    let config = create_config(config_file_path, matches.clone())?;

    let state_dir = Path::new(config.state_dir());

    // A plain file name is resolved under the state directory; "memory",
    // postgres URLs, and absolute paths are used as-is.
    let db_url = {
        let database = config.database();
        if database == "memory"
            || database.starts_with("postgres://")
            || Path::new(database).is_absolute()
        {
            database.to_string()
        } else {
            state_dir
                .join(database)
                .to_str()
                .ok_or_else(|| {
                    UserError::InvalidArgument("'state_dir' is not a valid UTF-8 string".into())
                })?
                .to_string()
        }
    };

    config.log_as_debug();

    let mut node = GrantDaemonBuilder::new()
        .with_rest_api_endpoint(String::from(config.bind()))
        .with_db_url(db_url)
        .with_display_name(String::from(config.display_name()))
        .build()
        .map_err(|err| {
            UserError::daemon_err_with_source("unable to build the Grant daemon", Box::new(err))
        })?;
    node.start()?;
    Ok(())
}
