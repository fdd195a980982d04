// crates/cert-relay-cli/src/runner.rs
// ============================================================================
// Module: Invocation Runner
// Description: Client assembly and single-invocation execution.
// Purpose: Turn validated parameters and configuration into one response.
// Dependencies: cert-relay-core, cert-relay-clients, tokio
// ============================================================================

//! ## Overview
//! The runner wires the five HTTP collaborators to the core workflow and
//! executes exactly one invocation. Setup failures — malformed parameters,
//! unbuildable clients — surface through the same uniform response as
//! workflow failures, so the caller always receives one structured result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use cert_relay_clients::AlbClient;
use cert_relay_clients::AlbConfig;
use cert_relay_clients::CertificateManagerClient;
use cert_relay_clients::CertificateManagerConfig;
use cert_relay_clients::IamClient;
use cert_relay_clients::IamConfig;
use cert_relay_clients::NotificationDecoder;
use cert_relay_clients::NotificationDecoderConfig;
use cert_relay_clients::SlackNotifier;
use cert_relay_core::CancelSignal;
use cert_relay_core::InvocationResponse;
use cert_relay_core::Workflow;
use thiserror::Error;

use crate::config::RelayConfig;
use crate::params::InvocationParams;
use crate::params::ParamsError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures while assembling the invocation.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Parameter validation failed.
    #[error(transparent)]
    Params(#[from] ParamsError),
    /// A collaborator client could not be constructed.
    #[error("collaborator client could not be constructed: {0}")]
    Client(String),
}

// ============================================================================
// SECTION: Assembly
// ============================================================================

/// Concrete workflow over the HTTP collaborators.
type HttpWorkflow =
    Workflow<CertificateManagerClient, NotificationDecoder, IamClient, AlbClient, SlackNotifier>;

/// Builds the workflow from validated parameters and configuration.
///
/// # Errors
///
/// Returns [`SetupError`] when parameters fail validation or a client
/// cannot be constructed.
fn build_workflow(
    params: &InvocationParams,
    config: &RelayConfig,
) -> Result<HttpWorkflow, SetupError> {
    let timeout_ms = config.timing.request_timeout_ms;

    let key_source = CertificateManagerClient::new(CertificateManagerConfig {
        base_url: config.endpoints.certificate_manager_base_url.clone(),
        timeout_ms,
        ..CertificateManagerConfig::default()
    })
    .map_err(|err| SetupError::Client(err.to_string()))?;

    let verifier = NotificationDecoder::new(NotificationDecoderConfig {
        algorithm: config.verify.algorithm.into(),
    });

    let exchanger = IamClient::new(IamConfig {
        token_url: config
            .endpoints
            .iam_token_url
            .clone()
            .unwrap_or_else(|| IamConfig::default().token_url),
        timeout_ms,
    })
    .map_err(|err| SetupError::Client(err.to_string()))?;

    let control_plane = AlbClient::new(AlbConfig {
        base_url: config
            .endpoints
            .alb_base_url
            .clone()
            .unwrap_or_else(|| AlbConfig::default().base_url),
        timeout_ms,
    })
    .map_err(|err| SetupError::Client(err.to_string()))?;

    let mut slack_config = params.slack_config()?;
    slack_config.timeout_ms = timeout_ms;
    let notifier =
        SlackNotifier::new(slack_config).map_err(|err| SetupError::Client(err.to_string()))?;

    Ok(Workflow::new(
        key_source,
        verifier,
        exchanger,
        control_plane,
        notifier,
        Duration::from_secs(config.timing.settle_delay_secs),
    ))
}

// ============================================================================
// SECTION: Execution
// ============================================================================

/// Runs one invocation end to end and returns the uniform response.
///
/// Setup failures map to a 500 response with a human-readable cause, the
/// same shape workflow failures produce.
pub async fn run_invocation(
    params: &InvocationParams,
    config: &RelayConfig,
    cancel: &CancelSignal,
) -> InvocationResponse {
    let input = match params.workflow_input() {
        Ok(input) => input,
        Err(error) => {
            tracing::error!("invocation parameters rejected");
            return InvocationResponse::failure(500, error.to_string());
        }
    };
    let workflow = match build_workflow(params, config) {
        Ok(workflow) => workflow,
        Err(error) => {
            tracing::error!("invocation setup failed");
            return InvocationResponse::failure(500, error.to_string());
        }
    };
    let report = workflow.run(&input, cancel).await;
    if let Some(delivery_error) = &report.notification_error {
        tracing::warn!(
            status = delivery_error.status(),
            "outcome notification was not delivered"
        );
    }
    report.into_response()
}
