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

use log::info;

use crate::config::Configuration;
use crate::util::input_validator::validate_grpc_endpoint_uri;

/// Prints the current client configuration into the console.
///
/// # Arguments
/// * `configuration` - The current client configuration.
pub(crate) fn display_configuration(configuration: &Configuration) {
    info!("--| Management Service Endpoint : {}", configuration.endpoint);
    info!(
        "--| Connect Timeout             : {}s",
        configuration.connect_timeout_seconds
    );
}

/// Sets the endpoint of the management service in the configuration and stores it. The address must be a valid gRPC
/// endpoint uri, otherwise an error is returned and the configuration is left untouched.
///
/// # Arguments
/// * `configuration` - The current client configuration.
/// * `config_path` - The path from where the configuration is loaded.
/// * `address` - The new endpoint address of the management service.
pub(crate) async fn set_endpoint_in_config(
    mut configuration: Configuration,
    config_path: impl AsRef<Path>,
    address: String,
) -> anyhow::Result<()> {
    let endpoint = validate_grpc_endpoint_uri(address.trim())?.to_string();
    configuration.endpoint = endpoint;
    configuration.save_to_file(config_path).await?;
    info!(
        "Successfully set management service endpoint to {}",
        configuration.endpoint
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[tokio::test]
    async fn stores_validated_endpoint() {
        let directory = tempdir().unwrap();
        let path = directory.path().join("mgdeploy.toml");

        set_endpoint_in_config(
            Configuration::default(),
            &path,
            " https://management.example.com:8443 ".to_string(),
        )
        .await
        .unwrap();

        let stored = Configuration::load_from_file(&path).await.unwrap();
        assert!(stored.endpoint.starts_with("https://management.example.com:8443"));
        assert!(stored.validate().is_ok());
    }

    #[tokio::test]
    async fn invalid_endpoint_is_not_stored() {
        let directory = tempdir().unwrap();
        let path = directory.path().join("mgdeploy.toml");

        let result =
            set_endpoint_in_config(Configuration::default(), &path, "not an uri".to_string()).await;
        assert!(result.is_err());
        assert!(!path.exists());
    }
}
