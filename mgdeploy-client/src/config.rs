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
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::util::input_validator::validate_grpc_endpoint_uri;

/// The root configuration file model.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Configuration {
    /// The gRPC endpoint of the management service.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// The maximum amount of seconds to wait for the connection to the management service.
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,
}

fn default_endpoint() -> String {
    "http://127.0.0.1:50051".to_string()
}

fn default_connect_timeout_seconds() -> u64 {
    10
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
        }
    }
}

impl Configuration {
    /// Loads the configuration from the given file path, returning an error if the file reading or toml parsing fails.
    ///
    /// # Arguments
    /// * `file_path` - The path to load the configuration from.
    pub async fn load_from_file(file_path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let toml_file_content = fs::read_to_string(file_path).await?;
        let parsed_configuration: Configuration = toml::from_str(&toml_file_content)?;
        Ok(parsed_configuration)
    }

    /// Saves the current configuration state into the file at the given path.
    ///
    /// # Arguments
    /// * `file_path` - The path where the configuration should be stored.
    pub async fn save_to_file(&self, file_path: impl AsRef<Path>) -> anyhow::Result<()> {
        let serialized =
            toml::to_string_pretty(&self).context("unable to serialize config to toml")?;
        fs::write(file_path, serialized).await?;
        Ok(())
    }

    /// Validates that the configuration options in this file are all set correctly for the client to function.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_grpc_endpoint_uri(&self.endpoint)?;
        if self.connect_timeout_seconds == 0 {
            bail!("connect timeout must be at least one second")
        }

        Ok(())
    }

    /// Get the connect timeout as duration.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}
