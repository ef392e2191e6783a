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
use std::fmt;

use crate::deployment::descriptor::DeploymentDescriptor;
use crate::deployment::error::StopDeploymentError;
use crate::deployment::resource_id::DeploymentResourceId;

/// The canonical key of a deployment that should be cancelled. Both fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CancellationRequest {
    /// The id of the management group in which the deployment is tracked.
    pub management_group_id: String,
    /// The name of the deployment to cancel.
    pub deployment_name: String,
}

impl CancellationRequest {
    /// Get the fully-qualified resource id of the deployment to cancel.
    pub fn resource_id(&self) -> String {
        DeploymentResourceId {
            management_group_id: self.management_group_id.clone(),
            deployment_name: self.deployment_name.clone(),
        }
        .to_resource_id()
    }
}

impl fmt::Display for CancellationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.management_group_id, self.deployment_name)
    }
}

/// The user input that identifies the deployment to cancel. Normally only the fields of one input shape are present
/// (name, resource id or input object), but the resolution does not depend on that.
#[derive(Debug, Clone, Default)]
pub(crate) struct DeploymentSelection {
    /// The explicitly given management group id.
    pub management_group_id: Option<String>,
    /// The explicitly given deployment name.
    pub deployment_name: Option<String>,
    /// The fully-qualified resource id of the deployment.
    pub resource_id: Option<String>,
    /// A deployment object, for example one that was previously retrieved using the `get` command.
    pub input_object: Option<DeploymentDescriptor>,
}

impl DeploymentSelection {
    /// Resolves this selection into the canonical cancellation key. For each field the first non-empty source wins,
    /// in the order: explicit argument, resource id, input object. The resource id is only parsed if one of the
    /// fields is not given explicitly.
    pub fn resolve(&self) -> Result<CancellationRequest, StopDeploymentError> {
        let explicit_group_id = non_empty(self.management_group_id.as_deref());
        let explicit_name = non_empty(self.deployment_name.as_deref());

        let parsed_resource_id = match non_empty(self.resource_id.as_deref()) {
            Some(resource_id) if explicit_group_id.is_none() || explicit_name.is_none() => {
                Some(DeploymentResourceId::parse(resource_id)?)
            }
            _ => None,
        };

        let management_group_id = explicit_group_id
            .or_else(|| {
                parsed_resource_id
                    .as_ref()
                    .map(|parsed| parsed.management_group_id.as_str())
            })
            .or_else(|| {
                self.input_object
                    .as_ref()
                    .and_then(|object| non_empty(Some(object.management_group_id.as_str())))
            })
            .ok_or(StopDeploymentError::MissingIdentifier("management group id"))?;
        let deployment_name = explicit_name
            .or_else(|| {
                parsed_resource_id
                    .as_ref()
                    .map(|parsed| parsed.deployment_name.as_str())
            })
            .or_else(|| {
                self.input_object
                    .as_ref()
                    .and_then(|object| non_empty(Some(object.deployment_name.as_str())))
            })
            .ok_or(StopDeploymentError::MissingIdentifier("deployment name"))?;

        Ok(CancellationRequest {
            management_group_id: management_group_id.to_string(),
            deployment_name: deployment_name.to_string(),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
impl DeploymentSelection {
    pub(crate) fn by_name(management_group_id: &str, deployment_name: &str) -> Self {
        Self {
            management_group_id: Some(management_group_id.to_string()),
            deployment_name: Some(deployment_name.to_string()),
            ..Default::default()
        }
    }

    pub(crate) fn by_id(resource_id: &str) -> Self {
        Self {
            resource_id: Some(resource_id.to_string()),
            ..Default::default()
        }
    }

    pub(crate) fn by_object(input_object: DeploymentDescriptor) -> Self {
        Self {
            input_object: Some(input_object),
            ..Default::default()
        }
    }
}
