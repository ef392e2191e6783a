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
use thiserror::Error;

/// The errors that can occur while resolving and cancelling a management group deployment.
#[derive(Error, Debug)]
pub(crate) enum StopDeploymentError {
    /// The given resource id is not a management group deployment resource id.
    #[error("malformed deployment resource id {0:?}, expected /providers/Microsoft.Management/managementGroups/{{managementGroupId}}/providers/Microsoft.Resources/deployments/{{deploymentName}}")]
    MalformedResourceId(String),
    /// An identifier could not be resolved from any of the given inputs.
    #[error("unable to resolve the {0} of the deployment to cancel")]
    MissingIdentifier(&'static str),
    /// The confirmation prompt could not be displayed or read.
    #[error("unable to confirm the cancellation")]
    Confirmation(#[source] anyhow::Error),
    /// The management service rejected or failed the request.
    #[error("management service request failed")]
    ClientError(#[source] anyhow::Error),
}
