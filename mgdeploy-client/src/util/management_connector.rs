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
use std::time::Duration;

use anyhow::{anyhow, Context};
use futures::StreamExt;
use tonic::transport::{Channel, Endpoint};
use tonic::Status;

use crate::config::Configuration;
use crate::deployment::descriptor::DeploymentDescriptor;
use crate::deployment::selection::CancellationRequest;
use crate::mgdeploy::deployment_service_client::DeploymentServiceClient;
use crate::mgdeploy::{
    CancelDeploymentRequest, DeploymentScope, GetDeploymentRequest, ListDeploymentsRequest,
};

/// The operations of the management service that are used by the deployment commands.
pub(crate) trait ManagementClient {
    /// Requests the cancellation of the deployment identified by the given request in the management group scope.
    async fn cancel_deployment(&mut self, request: &CancellationRequest) -> anyhow::Result<()>;

    /// Get the deployment with the given name in the given management group.
    async fn get_deployment(
        &mut self,
        management_group_id: &str,
        deployment_name: &str,
    ) -> anyhow::Result<DeploymentDescriptor>;

    /// Get all deployments that are tracked in the given management group.
    async fn list_deployments(
        &mut self,
        management_group_id: &str,
    ) -> anyhow::Result<Vec<DeploymentDescriptor>>;
}

/// A management client that talks to the gRPC endpoint of the management service.
pub(crate) struct GrpcManagementClient {
    client: DeploymentServiceClient<Channel>,
}

impl GrpcManagementClient {
    /// Opens a connection to the management service listening on the given endpoint.
    ///
    /// # Arguments
    /// * `endpoint` - The gRPC endpoint uri of the management service.
    /// * `connect_timeout` - The maximum time to wait for the connection to be established.
    pub async fn connect(endpoint: &str, connect_timeout: Duration) -> anyhow::Result<Self> {
        let channel = Endpoint::from_shared(endpoint.to_string())
            .with_context(|| format!("invalid management service endpoint {}", endpoint))?
            .connect_timeout(connect_timeout)
            .connect()
            .await
            .with_context(|| format!("error while connecting to {}", endpoint))?;
        Ok(Self {
            client: DeploymentServiceClient::new(channel),
        })
    }
}

impl ManagementClient for GrpcManagementClient {
    async fn cancel_deployment(&mut self, request: &CancellationRequest) -> anyhow::Result<()> {
        let request = CancelDeploymentRequest {
            scope: DeploymentScope::ManagementGroup.into(),
            management_group_id: request.management_group_id.clone(),
            deployment_name: request.deployment_name.clone(),
        };
        self.client
            .cancel_deployment(request)
            .await
            .map_err(status_error)?;
        Ok(())
    }

    async fn get_deployment(
        &mut self,
        management_group_id: &str,
        deployment_name: &str,
    ) -> anyhow::Result<DeploymentDescriptor> {
        let request = GetDeploymentRequest {
            scope: DeploymentScope::ManagementGroup.into(),
            management_group_id: management_group_id.to_string(),
            deployment_name: deployment_name.to_string(),
        };
        let response = self
            .client
            .get_deployment(request)
            .await
            .map_err(status_error)?;
        Ok(response.into_inner().into())
    }

    async fn list_deployments(
        &mut self,
        management_group_id: &str,
    ) -> anyhow::Result<Vec<DeploymentDescriptor>> {
        let request = ListDeploymentsRequest {
            scope: DeploymentScope::ManagementGroup.into(),
            management_group_id: management_group_id.to_string(),
        };
        let mut stream = self
            .client
            .list_deployments(request)
            .await
            .map_err(status_error)?
            .into_inner();

        let mut deployments = Vec::new();
        while let Some(data) = stream.next().await {
            match data {
                Ok(deployment) => deployments.push(deployment.into()),
                Err(status) => return Err(status_error(status)),
            }
        }
        Ok(deployments)
    }
}

/// A management client that only opens the connection to the management service once the first request is made.
pub(crate) struct LazyManagementClient {
    endpoint: String,
    connect_timeout: Duration,
    client: Option<GrpcManagementClient>,
}

impl LazyManagementClient {
    pub fn new(endpoint: String, connect_timeout: Duration) -> Self {
        Self {
            endpoint,
            connect_timeout,
            client: None,
        }
    }

    /// Creates a client for the management service endpoint of the given configuration.
    pub fn from_configuration(configuration: &Configuration) -> Self {
        Self::new(
            configuration.endpoint.clone(),
            configuration.connect_timeout(),
        )
    }

    async fn connected(&mut self) -> anyhow::Result<&mut GrpcManagementClient> {
        let client = match self.client.take() {
            Some(client) => client,
            None => GrpcManagementClient::connect(&self.endpoint, self.connect_timeout).await?,
        };
        Ok(self.client.insert(client))
    }
}

impl ManagementClient for LazyManagementClient {
    async fn cancel_deployment(&mut self, request: &CancellationRequest) -> anyhow::Result<()> {
        self.connected().await?.cancel_deployment(request).await
    }

    async fn get_deployment(
        &mut self,
        management_group_id: &str,
        deployment_name: &str,
    ) -> anyhow::Result<DeploymentDescriptor> {
        self.connected()
            .await?
            .get_deployment(management_group_id, deployment_name)
            .await
    }

    async fn list_deployments(
        &mut self,
        management_group_id: &str,
    ) -> anyhow::Result<Vec<DeploymentDescriptor>> {
        self.connected()
            .await?
            .list_deployments(management_group_id)
            .await
    }
}

/// Converts a non-ok status returned by the management service into an error.
fn status_error(status: Status) -> anyhow::Error {
    anyhow!(
        "server returned status {:?}: {}",
        status.code(),
        status.message()
    )
}
