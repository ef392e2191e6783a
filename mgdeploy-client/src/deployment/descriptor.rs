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
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::mgdeploy::Deployment;

/// A deployment as returned by the management service. This is the object that is written by the `get` and `list`
/// commands and that can be given back to the `stop` command as input object.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct DeploymentDescriptor {
    /// The fully-qualified resource id of the deployment.
    pub id: String,
    /// The name of the deployment.
    pub deployment_name: String,
    /// The id of the management group in which the deployment is tracked.
    pub management_group_id: String,
    /// The location where the deployment metadata is stored.
    pub location: String,
    /// The provisioning state reported by the management service, for example `Running`.
    pub provisioning_state: String,
    /// The time of the last state change.
    pub timestamp: String,
    /// The correlation id of the deployment operation.
    pub correlation_id: String,
}

impl From<Deployment> for DeploymentDescriptor {
    fn from(deployment: Deployment) -> Self {
        Self {
            id: deployment.id,
            deployment_name: deployment.deployment_name,
            management_group_id: deployment.management_group_id,
            location: deployment.location,
            provisioning_state: deployment.provisioning_state,
            timestamp: deployment.timestamp,
            correlation_id: deployment.correlation_id,
        }
    }
}

/// Parses the deployment descriptors from the given json content. The content can either be a single json object or
/// a json array of objects, each of them being handled as a separate pipeline record.
///
/// # Arguments
/// * `content` - The raw json content of the input object stream.
pub(crate) fn read_descriptors(content: &[u8]) -> anyhow::Result<Vec<DeploymentDescriptor>> {
    let stream: Value =
        serde_json::from_slice(content).context("unable to parse deployment input object")?;
    match stream {
        Value::Array(items) => items.into_iter().map(parse_descriptor).collect(),
        object @ Value::Object(_) => Ok(vec![parse_descriptor(object)?]),
        other => bail!("expected a deployment object or an array of them, got {}", other),
    }
}

fn parse_descriptor(value: Value) -> anyhow::Result<DeploymentDescriptor> {
    match value {
        object @ Value::Object(_) => {
            serde_json::from_value(object).context("unable to parse deployment input object")
        }
        other => bail!("expected a deployment object, got {}", other),
    }
}
