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
use crate::deployment::error::StopDeploymentError;

/// The segments that precede the management group id in a deployment resource id.
const MANAGEMENT_GROUP_PREFIX: [&str; 3] = ["providers", "Microsoft.Management", "managementGroups"];
/// The segments between the management group id and the deployment name in a deployment resource id.
const DEPLOYMENT_PREFIX: [&str; 3] = ["providers", "Microsoft.Resources", "deployments"];

/// The identifiers that are encoded into a management group deployment resource id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DeploymentResourceId {
    /// The id of the management group in which the deployment is tracked.
    pub management_group_id: String,
    /// The name of the deployment.
    pub deployment_name: String,
}

impl DeploymentResourceId {
    /// Parses a fully-qualified resource id in the form
    /// `/providers/Microsoft.Management/managementGroups/{managementGroupId}/providers/Microsoft.Resources/deployments/{deploymentName}`.
    /// The fixed segments are matched case-insensitively, the captured ids are returned as given.
    ///
    /// # Arguments
    /// * `resource_id` - The resource id to parse.
    pub fn parse(resource_id: &str) -> Result<Self, StopDeploymentError> {
        let malformed = || StopDeploymentError::MalformedResourceId(resource_id.to_string());

        let path = resource_id.strip_prefix('/').ok_or_else(malformed)?;
        let path = path.strip_suffix('/').unwrap_or(path);
        let segments: Vec<&str> = path.split('/').collect();
        match segments.as_slice() {
            [p1, p2, p3, management_group_id, d1, d2, d3, deployment_name]
                if segments_match([p1, p2, p3], &MANAGEMENT_GROUP_PREFIX)
                    && segments_match([d1, d2, d3], &DEPLOYMENT_PREFIX)
                    && !management_group_id.is_empty()
                    && !deployment_name.is_empty() =>
            {
                Ok(Self {
                    management_group_id: management_group_id.to_string(),
                    deployment_name: deployment_name.to_string(),
                })
            }
            _ => Err(malformed()),
        }
    }

    /// Formats the fully-qualified resource id of the deployment.
    pub fn to_resource_id(&self) -> String {
        format!(
            "/{}/{}/{}/{}",
            MANAGEMENT_GROUP_PREFIX.join("/"),
            self.management_group_id,
            DEPLOYMENT_PREFIX.join("/"),
            self.deployment_name
        )
    }
}

fn segments_match(actual: [&&str; 3], expected: &[&str; 3]) -> bool {
    actual
        .iter()
        .zip(expected.iter())
        .all(|(actual, expected)| actual.eq_ignore_ascii_case(expected))
}
