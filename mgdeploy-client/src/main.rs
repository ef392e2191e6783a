/*
 * This file is part of mgdeploy, licensed under the MIT License (MIT).
 *
 * Copyright (c) 2024 easybill GmbH
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */
use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::{error, info};
use std::process::exit;

use crate::cli::{Cli, ConfigCommands, DeploymentCommands, RootCommands};
use crate::config::Configuration;
use crate::executor::config_commands::{display_configuration, set_endpoint_in_config};
use crate::executor::deployment_commands::{
    display_deployment, display_deployments, stop_deployments,
};
use crate::util::input_validator::validate_grpc_endpoint_uri;

mod cli;
pub(crate) mod config;
pub(crate) mod deployment;
pub(crate) mod executor;
pub(crate) mod util;

const GIT_SHA: &str = env!("GIT_HASH");
const VERSION: &str = env!("CARGO_PKG_VERSION");

pub(crate) mod mgdeploy {
    tonic::include_proto!("mgdeploy");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // initializes the logger, using the "info" level if the RUST_LOG environment variable isn't set
    // logs go to stderr, stdout only carries the command output
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_module_path(false)
        .format_target(false)
        .format_timestamp_secs()
        .try_init()
        .context("unable to initialize logging")?;
    info!(
        "Running mgdeploy version {} (git commit {})",
        VERSION, GIT_SHA
    );

    // load & validate the configuration from the specified file path, create it if it does not exist yet
    let cli = Cli::parse();
    let mut configuration = if cli.configuration_path.exists() {
        let configuration = Configuration::load_from_file(&cli.configuration_path)
            .await
            .context("couldn't parse configuration file")?;
        configuration.validate()?;
        configuration
    } else {
        info!("Creating and storing new configuration...");
        let configuration = Configuration::default();
        configuration.save_to_file(&cli.configuration_path).await?;
        configuration
    };

    // the endpoint override only applies to this invocation and is never written back
    if let Some(endpoint) = &cli.endpoint {
        validate_grpc_endpoint_uri(endpoint)?;
        configuration.endpoint = endpoint.clone();
    }

    // execute the requested command and display the error message if an error occurred
    let command_execution_result = match cli.command {
        RootCommands::Config { action } => match action {
            ConfigCommands::Show => {
                display_configuration(&configuration);
                Ok(())
            }
            ConfigCommands::SetEndpoint { address } => {
                set_endpoint_in_config(configuration, cli.configuration_path, address).await
            }
        },
        RootCommands::Deployment { action } => match action {
            DeploymentCommands::Get {
                management_group_id,
                name,
            } => display_deployment(configuration, management_group_id, name).await,
            DeploymentCommands::List {
                management_group_id,
            } => display_deployments(configuration, management_group_id).await,
            DeploymentCommands::Stop(arguments) => stop_deployments(configuration, arguments).await,
        },
    };
    if let Err(err) = command_execution_result {
        error!("Issue occurred while executing requested command: {:#}", err);
        exit(1)
    }

    Ok(())
}
