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

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use log::{info, warn};
use tokio::fs::File;
use tokio::io::{self, AsyncRead, AsyncReadExt};

use crate::cli::StopArguments;
use crate::config::Configuration;
use crate::deployment::descriptor::{read_descriptors, DeploymentDescriptor};
use crate::deployment::error::StopDeploymentError;
use crate::deployment::selection::DeploymentSelection;
use crate::util::confirmation::{ConfirmationPrompt, TerminalPrompt};
use crate::util::management_connector::{LazyManagementClient, ManagementClient};

/// The question that is displayed before a deployment gets cancelled.
pub(crate) const CANCEL_DEPLOYMENT_MESSAGE: &str = "Are you sure you want to cancel the deployment?";

/// The switches that control how a deployment cancellation is executed.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct StopOptions {
    /// Emit `true` when the cancellation was accepted.
    pub pass_thru: bool,
    /// Only report which deployment would be cancelled.
    pub what_if: bool,
    /// Skip the confirmation prompt.
    pub force: bool,
}

impl From<&StopArguments> for StopOptions {
    fn from(arguments: &StopArguments) -> Self {
        Self {
            pass_thru: arguments.pass_thru,
            what_if: arguments.what_if,
            force: arguments.force,
        }
    }
}

/// Cancels the deployments selected by the given arguments. Each selected deployment is confirmed separately unless
/// forced, `true` is printed for each accepted cancellation if pass-thru is requested.
///
/// # Arguments
/// * `configuration` - The client configuration.
/// * `arguments` - The arguments that select the deployment(s) and control the execution.
pub(crate) async fn stop_deployments(
    configuration: Configuration,
    arguments: StopArguments,
) -> anyhow::Result<()> {
    let selections = collect_selections(&arguments).await?;
    if selections.is_empty() {
        warn!("No deployment objects were provided, nothing to cancel");
        return Ok(());
    }

    let mut client = LazyManagementClient::from_configuration(&configuration);
    stop_selected_deployments(
        &mut client,
        &mut TerminalPrompt,
        &selections,
        StopOptions::from(&arguments),
        &mut std::io::stdout(),
    )
    .await
}

/// Prints the deployment with the given name as json object.
///
/// # Arguments
/// * `configuration` - The client configuration.
/// * `management_group_id` - The id of the management group in which the deployment is tracked.
/// * `deployment_name` - The name of the deployment.
pub(crate) async fn display_deployment(
    configuration: Configuration,
    management_group_id: String,
    deployment_name: String,
) -> anyhow::Result<()> {
    let mut client = LazyManagementClient::from_configuration(&configuration);
    let deployment = client
        .get_deployment(&management_group_id, &deployment_name)
        .await
        .with_context(|| {
            format!(
                "unable to get deployment {} in management group {}",
                deployment_name, management_group_id
            )
        })?;
    write_json(&mut std::io::stdout(), &deployment)
}

/// Prints all deployments of the given management group as json array.
///
/// # Arguments
/// * `configuration` - The client configuration.
/// * `management_group_id` - The id of the management group to list the deployments of.
pub(crate) async fn display_deployments(
    configuration: Configuration,
    management_group_id: String,
) -> anyhow::Result<()> {
    let mut client = LazyManagementClient::from_configuration(&configuration);
    let deployments = client
        .list_deployments(&management_group_id)
        .await
        .with_context(|| {
            format!(
                "unable to list deployments in management group {}",
                management_group_id
            )
        })?;
    info!(
        "Found {} deployments in management group {}",
        deployments.len(),
        management_group_id
    );
    write_json(&mut std::io::stdout(), &deployments)
}

/// Resolves the given selection, asks for confirmation and requests the cancellation of the selected deployment.
///
/// # Returns
/// * `Some(true)` - if the cancellation was accepted and pass-thru is enabled.
/// * `None` - if pass-thru is disabled, the cancellation was declined or only a what-if run was requested.
pub(crate) async fn stop_deployment(
    client: &mut impl ManagementClient,
    prompt: &mut impl ConfirmationPrompt,
    selection: &DeploymentSelection,
    options: StopOptions,
) -> Result<Option<bool>, StopDeploymentError> {
    let request = selection.resolve()?;

    if options.what_if {
        info!(
            "What if: Performing the operation \"Cancel deployment\" on target \"{}\" ({})",
            request.deployment_name,
            request.resource_id()
        );
        return Ok(None);
    }

    if !options.force {
        let confirmed = prompt
            .confirm(CANCEL_DEPLOYMENT_MESSAGE, &request.deployment_name)
            .map_err(StopDeploymentError::Confirmation)?;
        if !confirmed {
            info!("[{}] --| Cancellation declined", request);
            return Ok(None);
        }
    }

    client
        .cancel_deployment(&request)
        .await
        .map_err(StopDeploymentError::ClientError)?;
    info!("[{}] --| Cancellation requested", request);

    Ok(options.pass_thru.then_some(true))
}

/// Cancels the given selections one after another, stopping at the first error.
async fn stop_selected_deployments(
    client: &mut impl ManagementClient,
    prompt: &mut impl ConfirmationPrompt,
    selections: &[DeploymentSelection],
    options: StopOptions,
    output: &mut impl Write,
) -> anyhow::Result<()> {
    for selection in selections {
        if let Some(result) = stop_deployment(client, prompt, selection, options).await? {
            writeln!(output, "{}", result)?;
        }
    }
    Ok(())
}

/// Converts the arguments into the deployment selections to process. An input object file yields one selection per
/// contained deployment object, all other arguments yield exactly one selection.
async fn collect_selections(arguments: &StopArguments) -> anyhow::Result<Vec<DeploymentSelection>> {
    let explicit_selection = DeploymentSelection {
        management_group_id: arguments.management_group_id.clone(),
        deployment_name: arguments.name.clone(),
        resource_id: arguments.id.clone(),
        input_object: None,
    };
    let input_objects = match &arguments.input_object {
        Some(path) => read_input_objects(path).await?,
        None => return Ok(vec![explicit_selection]),
    };

    Ok(input_objects
        .into_iter()
        .map(|input_object| DeploymentSelection {
            input_object: Some(input_object),
            ..explicit_selection.clone()
        })
        .collect())
}

/// Reads the deployment objects from the given file, or from stdin if the path is `-`.
async fn read_input_objects(path: &Path) -> anyhow::Result<Vec<DeploymentDescriptor>> {
    if path == Path::new("-") {
        read_input_stream(io::stdin())
            .await
            .context("unable to read input object from stdin")
    } else {
        let file = File::open(path)
            .await
            .with_context(|| format!("unable to open input object file {:?}", path))?;
        read_input_stream(file)
            .await
            .with_context(|| format!("unable to read input object file {:?}", path))
    }
}

/// Reads the given stream to its end and parses the contained deployment objects.
async fn read_input_stream(
    mut reader: impl AsyncRead + Unpin,
) -> anyhow::Result<Vec<DeploymentDescriptor>> {
    let mut content = Vec::new();
    reader.read_to_end(&mut content).await?;
    read_descriptors(&content)
}

fn write_json(output: &mut impl Write, value: &impl serde::Serialize) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *output, value).context("unable to serialize output")?;
    writeln!(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use anyhow::bail;
    use tempfile::tempdir;
    use tokio::fs;

    use super::*;
    use crate::deployment::selection::CancellationRequest;
    use crate::util::management_connector::tests::{serve_fake_service, FakeDeploymentService};

    const RESOURCE_ID: &str =
        "/providers/Microsoft.Management/managementGroups/mg1/providers/Microsoft.Resources/deployments/dep1";

    /// Records the cancel requests, optionally failing each of them with the given message.
    #[derive(Default)]
    struct RecordingClient {
        cancelled: Vec<CancellationRequest>,
        failure: Option<&'static str>,
    }

    impl ManagementClient for RecordingClient {
        async fn cancel_deployment(&mut self, request: &CancellationRequest) -> anyhow::Result<()> {
            if let Some(failure) = self.failure {
                bail!(failure)
            }
            self.cancelled.push(request.clone());
            Ok(())
        }

        async fn get_deployment(
            &mut self,
            _management_group_id: &str,
            _deployment_name: &str,
        ) -> anyhow::Result<DeploymentDescriptor> {
            bail!("not used")
        }

        async fn list_deployments(
            &mut self,
            _management_group_id: &str,
        ) -> anyhow::Result<Vec<DeploymentDescriptor>> {
            bail!("not used")
        }
    }

    /// Answers every prompt with the same answer and records what was asked.
    struct ScriptedPrompt {
        answer: anyhow::Result<bool>,
        asked: Vec<(String, String)>,
    }

    impl ScriptedPrompt {
        fn answering(answer: bool) -> Self {
            Self {
                answer: Ok(answer),
                asked: Vec::new(),
            }
        }
    }

    impl ConfirmationPrompt for ScriptedPrompt {
        fn confirm(&mut self, message: &str, target: &str) -> anyhow::Result<bool> {
            self.asked.push((message.to_string(), target.to_string()));
            match &self.answer {
                Ok(answer) => Ok(*answer),
                Err(err) => bail!("{}", err),
            }
        }
    }

    fn pass_thru() -> StopOptions {
        StopOptions {
            pass_thru: true,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn confirmed_cancellation_with_pass_thru_returns_true() {
        let mut client = RecordingClient::default();
        let mut prompt = ScriptedPrompt::answering(true);

        let result = stop_deployment(
            &mut client,
            &mut prompt,
            &DeploymentSelection::by_id(RESOURCE_ID),
            pass_thru(),
        )
        .await
        .unwrap();

        assert_eq!(result, Some(true));
        assert_eq!(
            prompt.asked,
            vec![(CANCEL_DEPLOYMENT_MESSAGE.to_string(), "dep1".to_string())]
        );
        assert_eq!(client.cancelled.len(), 1);
        assert_eq!(client.cancelled[0].management_group_id, "mg1");
        assert_eq!(client.cancelled[0].deployment_name, "dep1");
    }

    #[tokio::test]
    async fn confirmed_cancellation_without_pass_thru_returns_nothing() {
        let mut client = RecordingClient::default();
        let mut prompt = ScriptedPrompt::answering(true);

        let result = stop_deployment(
            &mut client,
            &mut prompt,
            &DeploymentSelection::by_name("mg1", "dep1"),
            StopOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(result, None);
        assert_eq!(client.cancelled.len(), 1);
    }

    #[tokio::test]
    async fn declined_confirmation_does_not_cancel() {
        let mut client = RecordingClient::default();
        let mut prompt = ScriptedPrompt::answering(false);

        let result = stop_deployment(
            &mut client,
            &mut prompt,
            &DeploymentSelection::by_name("mg1", "dep1"),
            pass_thru(),
        )
        .await
        .unwrap();

        assert_eq!(result, None);
        assert_eq!(prompt.asked.len(), 1);
        assert!(client.cancelled.is_empty());
    }

    #[tokio::test]
    async fn what_if_neither_prompts_nor_cancels() {
        let mut client = RecordingClient::default();
        let mut prompt = ScriptedPrompt::answering(true);
        let options = StopOptions {
            what_if: true,
            force: true,
            pass_thru: true,
        };

        let result = stop_deployment(
            &mut client,
            &mut prompt,
            &DeploymentSelection::by_name("mg1", "dep1"),
            options,
        )
        .await
        .unwrap();

        assert_eq!(result, None);
        assert!(prompt.asked.is_empty());
        assert!(client.cancelled.is_empty());
    }

    #[tokio::test]
    async fn force_skips_the_prompt() {
        let mut client = RecordingClient::default();
        let mut prompt = ScriptedPrompt::answering(false);
        let options = StopOptions {
            force: true,
            pass_thru: true,
            ..Default::default()
        };

        let result = stop_deployment(
            &mut client,
            &mut prompt,
            &DeploymentSelection::by_name("mg1", "dep1"),
            options,
        )
        .await
        .unwrap();

        assert_eq!(result, Some(true));
        assert!(prompt.asked.is_empty());
        assert_eq!(client.cancelled.len(), 1);
    }

    #[tokio::test]
    async fn unresolved_identifiers_fail_before_prompt_and_client() {
        let mut client = RecordingClient::default();
        let mut prompt = ScriptedPrompt::answering(true);

        let missing = DeploymentSelection::by_object(DeploymentDescriptor {
            management_group_id: "mg1".to_string(),
            ..Default::default()
        });
        let result = stop_deployment(&mut client, &mut prompt, &missing, pass_thru()).await;
        assert!(matches!(
            result,
            Err(StopDeploymentError::MissingIdentifier("deployment name"))
        ));

        let malformed = DeploymentSelection::by_id("/providers/Microsoft.Management");
        let result = stop_deployment(&mut client, &mut prompt, &malformed, pass_thru()).await;
        assert!(matches!(
            result,
            Err(StopDeploymentError::MalformedResourceId(_))
        ));

        assert!(prompt.asked.is_empty());
        assert!(client.cancelled.is_empty());
    }

    #[tokio::test]
    async fn client_errors_are_propagated() {
        let mut client = RecordingClient {
            failure: Some("deployment already completed"),
            ..Default::default()
        };
        let mut prompt = ScriptedPrompt::answering(true);

        let result = stop_deployment(
            &mut client,
            &mut prompt,
            &DeploymentSelection::by_name("mg1", "dep1"),
            pass_thru(),
        )
        .await;

        match result {
            Err(StopDeploymentError::ClientError(err)) => {
                assert_eq!(err.to_string(), "deployment already completed")
            }
            other => panic!("expected client error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn prompt_failures_are_reported() {
        let mut client = RecordingClient::default();
        let mut prompt = ScriptedPrompt {
            answer: Err(anyhow::anyhow!("terminal closed")),
            asked: Vec::new(),
        };

        let result = stop_deployment(
            &mut client,
            &mut prompt,
            &DeploymentSelection::by_name("mg1", "dep1"),
            pass_thru(),
        )
        .await;

        assert!(matches!(result, Err(StopDeploymentError::Confirmation(_))));
        assert!(client.cancelled.is_empty());
    }

    #[tokio::test]
    async fn input_object_file_cancels_each_deployment_through_service() {
        let directory = tempdir().unwrap();
        let path = directory.path().join("deployments.json");
        fs::write(
            &path,
            r#"[
                {"deploymentName": "dep1", "managementGroupId": "mg1"},
                {"deploymentName": "dep2", "managementGroupId": "mg1"}
            ]"#,
        )
        .await
        .unwrap();

        let service = FakeDeploymentService::with_deployments(&[("mg1", "dep1"), ("mg1", "dep2")]);
        let endpoint = serve_fake_service(service.clone()).await;
        let arguments = StopArguments {
            input_object: Some(path),
            pass_thru: true,
            ..Default::default()
        };

        let selections = collect_selections(&arguments).await.unwrap();
        assert_eq!(selections.len(), 2);

        let mut client = LazyManagementClient::new(endpoint, Duration::from_secs(5));
        let mut prompt = ScriptedPrompt::answering(true);
        let mut output = Vec::new();
        stop_selected_deployments(
            &mut client,
            &mut prompt,
            &selections,
            StopOptions::from(&arguments),
            &mut output,
        )
        .await
        .unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "true\ntrue\n");
        let cancelled: Vec<String> = service
            .cancel_requests()
            .into_iter()
            .map(|request| request.deployment_name)
            .collect();
        assert_eq!(cancelled, vec!["dep1", "dep2"]);
    }

    #[tokio::test]
    async fn first_failing_record_stops_processing() {
        let service = FakeDeploymentService::with_deployments(&[("mg1", "dep2")]);
        let endpoint = serve_fake_service(service.clone()).await;
        let selections = vec![
            DeploymentSelection::by_name("mg1", "unknown"),
            DeploymentSelection::by_name("mg1", "dep2"),
        ];

        let mut client = LazyManagementClient::new(endpoint, Duration::from_secs(5));
        let mut prompt = ScriptedPrompt::answering(true);
        let mut output = Vec::new();
        let result = stop_selected_deployments(
            &mut client,
            &mut prompt,
            &selections,
            pass_thru(),
            &mut output,
        )
        .await;

        assert!(result.is_err());
        assert!(output.is_empty());
        assert!(service.cancel_requests().is_empty());
    }

    #[tokio::test]
    async fn input_stream_yields_descriptors_in_order() {
        let content = r#"[
            {"deploymentName": "dep1", "managementGroupId": "mg1"},
            {"deploymentName": "dep2", "managementGroupId": "mg2"}
        ]"#;
        let descriptors = read_input_stream(content.as_bytes()).await.unwrap();
        let keys: Vec<(&str, &str)> = descriptors
            .iter()
            .map(|descriptor| {
                (
                    descriptor.management_group_id.as_str(),
                    descriptor.deployment_name.as_str(),
                )
            })
            .collect();
        assert_eq!(keys, vec![("mg1", "dep1"), ("mg2", "dep2")]);

        assert!(read_input_stream(r#"["dep1", "mg1"]"#.as_bytes()).await.is_err());
    }

    #[tokio::test]
    async fn missing_input_object_file_is_reported() {
        let directory = tempdir().unwrap();
        let arguments = StopArguments {
            input_object: Some(directory.path().join("missing.json")),
            ..Default::default()
        };
        assert!(collect_selections(&arguments).await.is_err());
    }

    #[tokio::test]
    async fn explicit_arguments_yield_single_selection() {
        let arguments = StopArguments {
            id: Some(RESOURCE_ID.to_string()),
            ..Default::default()
        };
        let selections = collect_selections(&arguments).await.unwrap();
        assert_eq!(selections.len(), 1);
        assert_eq!(selections[0].resource_id.as_deref(), Some(RESOURCE_ID));
        assert!(selections[0].input_object.is_none());
    }

    #[test]
    fn writes_pretty_json_with_trailing_newline() {
        let descriptor = DeploymentDescriptor {
            deployment_name: "dep1".to_string(),
            ..Default::default()
        };
        let mut output = Vec::new();
        write_json(&mut output, &descriptor).unwrap();

        let written = String::from_utf8(output).unwrap();
        assert!(written.ends_with("}\n"));
        let parsed: DeploymentDescriptor = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, descriptor);
    }
}
