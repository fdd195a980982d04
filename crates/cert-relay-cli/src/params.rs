// crates/cert-relay-cli/src/params.rs
// ============================================================================
// Module: Invocation Parameters
// Description: Caller-supplied JSON parameters for one invocation.
// Purpose: Decode and validate untrusted invocation input fail-closed.
// Dependencies: cert-relay-core, cert-relay-clients, serde, thiserror, url
// ============================================================================

//! ## Overview
//! The caller hands over one JSON object per invocation: the instance CRN,
//! the signed notification payload, the API key, the deployment target, and
//! the Slack destination. Decoding is strict and validation happens before
//! any network call — a malformed CRN or webhook URL fails the invocation
//! immediately.
//!
//! Security posture: the API key and the webhook URL are secrets; `Debug`
//! output redacts both.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use cert_relay_clients::SlackConfig;
use cert_relay_clients::slack::DEFAULT_SLACK_CHANNEL;
use cert_relay_core::ClusterId;
use cert_relay_core::Credential;
use cert_relay_core::CrnParseError;
use cert_relay_core::InstanceCrn;
use cert_relay_core::NotificationPayload;
use cert_relay_core::SecretName;
use cert_relay_core::WorkflowInput;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures while decoding or validating invocation parameters.
#[derive(Debug, Error)]
pub enum ParamsError {
    /// The JSON input did not decode to the parameter contract.
    #[error("invocation parameters could not be decoded: {0}")]
    Decode(String),
    /// The instance CRN is malformed.
    #[error(transparent)]
    InvalidInstanceCrn(#[from] CrnParseError),
    /// The Slack webhook is not a valid URL.
    #[error("slack webhook is not a valid URL")]
    InvalidWebhook,
}

// ============================================================================
// SECTION: Parameters
// ============================================================================

/// Caller-supplied parameters for one invocation.
///
/// # Invariants
/// - Field names follow the caller's JSON contract, not Rust casing.
/// - `slack_channel` falls back to the default channel when omitted.
#[derive(Clone, Deserialize)]
pub struct InvocationParams {
    /// Certificate-manager instance CRN.
    #[serde(rename = "instanceCrn")]
    pub instance_crn: String,
    /// Signed notification payload, exactly as delivered.
    pub data: String,
    /// Long-lived API key for the token exchange.
    #[serde(rename = "apiKey")]
    pub api_key: Credential,
    /// Target cluster identifier.
    #[serde(rename = "clusterId")]
    pub cluster_id: String,
    /// Ingress secret name inside the cluster.
    #[serde(rename = "secretName")]
    pub secret_name: String,
    /// Slack incoming-webhook URL.
    #[serde(rename = "slackWebHook")]
    pub slack_web_hook: String,
    /// Slack channel for outcome messages.
    #[serde(rename = "slackChannel", default = "default_channel")]
    pub slack_channel: String,
}

/// Returns the default Slack channel.
fn default_channel() -> String {
    DEFAULT_SLACK_CHANNEL.to_string()
}

impl InvocationParams {
    /// Decodes parameters from raw JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::Decode`] when the input does not match the
    /// parameter contract.
    pub fn from_json(raw: &[u8]) -> Result<Self, ParamsError> {
        serde_json::from_slice(raw).map_err(|err| ParamsError::Decode(err.to_string()))
    }

    /// Builds the workflow input, validating the instance CRN.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::InvalidInstanceCrn`] when the CRN is malformed.
    pub fn workflow_input(&self) -> Result<WorkflowInput, ParamsError> {
        Ok(WorkflowInput {
            instance: InstanceCrn::parse(self.instance_crn.clone())?,
            payload: NotificationPayload::new(self.data.clone()),
            credential: self.api_key.clone(),
            cluster_id: ClusterId::new(self.cluster_id.clone()),
            secret_name: SecretName::new(self.secret_name.clone()),
        })
    }

    /// Builds the Slack configuration, validating the webhook URL.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::InvalidWebhook`] when the webhook does not
    /// parse as a URL.
    pub fn slack_config(&self) -> Result<SlackConfig, ParamsError> {
        let webhook = Url::parse(&self.slack_web_hook).map_err(|_| ParamsError::InvalidWebhook)?;
        Ok(SlackConfig::new(webhook, self.slack_channel.clone()))
    }
}

impl fmt::Debug for InvocationParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationParams")
            .field("instance_crn", &self.instance_crn)
            .field("data", &"<payload omitted>")
            .field("api_key", &"<redacted>")
            .field("cluster_id", &self.cluster_id)
            .field("secret_name", &self.secret_name)
            .field("slack_web_hook", &"<redacted>")
            .field("slack_channel", &self.slack_channel)
            .finish()
    }
}
