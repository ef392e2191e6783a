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

use clap::builder::NonEmptyStringValueParser;
use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

/// The CLI interface of mgdeploy
#[derive(Parser, Debug, Clone)]
#[command(disable_version_flag = true)]
pub(crate) struct Cli {
    /// The command that was executed.
    #[command(subcommand)]
    pub command: RootCommands,
    /// The path where the client configuration file is located.
    #[arg(short = 'c', long = "config-path", env = "MGDEPLOY_CONFIG_PATH")]
    pub configuration_path: PathBuf,
    /// Overrides the management service endpoint from the configuration for this invocation.
    #[arg(long = "endpoint", env = "MGDEPLOY_ENDPOINT")]
    pub endpoint: Option<String>,
}

/// Holds the collection of top-level commands.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum RootCommands {
    /// Manages the client configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
    /// Manages deployments in management group scope.
    Deployment {
        #[command(subcommand)]
        action: DeploymentCommands,
    },
}

/// The subcommand to manage the client configuration file.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum ConfigCommands {
    /// Displays the current configuration.
    Show,
    /// Sets the gRPC endpoint of the management service.
    SetEndpoint {
        /// The uri of the management service gRPC endpoint, for example http://127.0.0.1:50051.
        address: String,
    },
}

/// The subcommand to work with deployments of a management group.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum DeploymentCommands {
    /// Prints a deployment as json object.
    Get {
        /// The management group id.
        #[arg(short = 'm', long, value_parser = NonEmptyStringValueParser::new())]
        management_group_id: String,
        /// The name of the deployment.
        #[arg(short = 'n', long, visible_alias = "deployment-name", value_parser = NonEmptyStringValueParser::new())]
        name: String,
    },
    /// Prints all deployments of a management group as json array.
    List {
        /// The management group id.
        #[arg(short = 'm', long, value_parser = NonEmptyStringValueParser::new())]
        management_group_id: String,
    },
    /// Cancels a running deployment.
    Stop(StopArguments),
}

/// The arguments of the stop command. The deployment is either given by management group id and name, by its
/// resource id or by a deployment object.
#[derive(Args, Debug, Clone, Default)]
#[command(group(
    ArgGroup::new("deployment")
        .required(true)
        .args(["management_group_id", "id", "input_object"])
))]
pub(crate) struct StopArguments {
    /// The management group id.
    #[arg(short = 'm', long, requires = "name", value_parser = NonEmptyStringValueParser::new())]
    pub management_group_id: Option<String>,
    /// The name of the deployment.
    #[arg(
        short = 'n',
        long,
        visible_alias = "deployment-name",
        requires = "management_group_id",
        conflicts_with_all = ["id", "input_object"],
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub name: Option<String>,
    /// The fully qualified resource id of the deployment. example:
    /// /providers/Microsoft.Management/managementGroups/{managementGroupId}/providers/Microsoft.Resources/deployments/{deploymentName}
    #[arg(long, visible_aliases = ["deployment-id", "resource-id"], value_parser = NonEmptyStringValueParser::new())]
    pub id: Option<String>,
    /// A file containing the deployment object(s) as printed by the get or list command, "-" reads from stdin.
    #[arg(long, value_name = "PATH")]
    pub input_object: Option<PathBuf>,
    /// Prints "true" when the cancellation was accepted.
    #[arg(long)]
    pub pass_thru: bool,
    /// Shows which deployment would be cancelled without cancelling it.
    #[arg(long)]
    pub what_if: bool,
    /// Cancels the deployment without asking for confirmation.
    #[arg(short = 'f', long)]
    pub force: bool,
}
