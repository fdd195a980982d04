// crates/cert-relay-clients/src/slack.rs
// ============================================================================
// Module: Slack Outcome Notifier
// Description: Webhook delivery of terminal deployment outcomes.
// Purpose: Post exactly one channel-alerting message per invocation outcome.
// Dependencies: cert-relay-core, reqwest, serde, url
// ============================================================================

//! ## Overview
//! One webhook POST per terminal outcome. The message text leads with a
//! channel alert so operators see both confirmations and failures, and the
//! attachment color encodes the outcome class. Delivery failure is reported
//! to the caller but never alters the deployment outcome itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use cert_relay_core::NotificationDeliveryError;
use cert_relay_core::OutcomeNotice;
use cert_relay_core::OutcomeNotifier;
use reqwest::Client;
use serde::Serialize;
use url::Url;

use crate::http::DEFAULT_TIMEOUT_MS;
use crate::http::build_client;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Channel used when the caller does not name one.
pub const DEFAULT_SLACK_CHANNEL: &str = "#certificates";

/// Attachment color for successful outcomes.
const COLOR_GOOD: &str = "good";

/// Attachment color for failed outcomes.
const COLOR_DANGER: &str = "danger";

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the Slack notifier.
///
/// # Invariants
/// - `webhook_url` embeds its own authorization; it is never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct SlackConfig {
    /// Incoming-webhook URL.
    pub webhook_url: Url,
    /// Channel the message is posted to.
    pub channel: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl SlackConfig {
    /// Builds a config for the given webhook and channel.
    #[must_use]
    pub fn new(webhook_url: Url, channel: impl Into<String>) -> Self {
        Self {
            webhook_url,
            channel: channel.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl std::fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackConfig")
            .field("webhook_url", &"<redacted>")
            .field("channel", &self.channel)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

// ============================================================================
// SECTION: Wire Types
// ============================================================================

/// Webhook message body.
#[derive(Serialize)]
struct SlackMessage<'a> {
    /// Channel-alerting message text.
    text: String,
    /// Attachment color encoding the outcome class.
    color: &'static str,
    /// Destination channel.
    channel: &'a str,
}

// ============================================================================
// SECTION: Notifier
// ============================================================================

/// Outcome notifier over a Slack incoming webhook.
pub struct SlackNotifier {
    /// Notifier configuration.
    config: SlackConfig,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl SlackNotifier {
    /// Creates a new notifier with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationDeliveryError`] when the HTTP client cannot be
    /// created.
    pub fn new(config: SlackConfig) -> Result<Self, NotificationDeliveryError> {
        let client = build_client(config.timeout_ms)
            .map_err(|err| NotificationDeliveryError::Transport(err.to_string()))?;
        Ok(Self {
            config,
            client,
        })
    }

    /// Renders the message for a terminal outcome.
    fn message(&self, notice: &OutcomeNotice) -> SlackMessage<'_> {
        SlackMessage {
            text: format!("@channel {}", notice.detail),
            color: if notice.is_success() { COLOR_GOOD } else { COLOR_DANGER },
            channel: &self.config.channel,
        }
    }
}

#[async_trait]
impl OutcomeNotifier for SlackNotifier {
    async fn notify(&self, notice: &OutcomeNotice) -> Result<(), NotificationDeliveryError> {
        let message = self.message(notice);
        tracing::info!(
            outcome = ?notice.outcome,
            cluster_id = notice.cluster_id.as_str(),
            "posting outcome notification"
        );
        let response = self
            .client
            .post(self.config.webhook_url.clone())
            .json(&message)
            .send()
            .await
            .map_err(|err| NotificationDeliveryError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotificationDeliveryError::UpstreamStatus {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::use_debug,
        reason = "Panic-based assertions and debug rendering are permitted in tests."
    )]

    use cert_relay_core::ClusterId;
    use cert_relay_core::DeploymentOutcome;
    use cert_relay_core::OutcomeNotice;
    use cert_relay_core::SecretName;
    use url::Url;

    use super::SlackConfig;
    use super::SlackNotifier;

    /// Builds a notice with the given outcome.
    fn notice(outcome: DeploymentOutcome) -> OutcomeNotice {
        OutcomeNotice {
            outcome,
            cluster_id: ClusterId::new("cluster-1"),
            secret_name: SecretName::new("ingress-secret"),
            detail: "certificate deployed to cluster-1".to_string(),
        }
    }

    /// Builds a notifier against a placeholder webhook.
    fn notifier() -> SlackNotifier {
        let url = Url::parse("https://hooks.example.test/services/T0/B0/xyz").unwrap();
        SlackNotifier::new(SlackConfig::new(url, "#alerts")).unwrap()
    }

    #[test]
    fn message_alerts_the_channel_and_encodes_success() {
        let notifier = notifier();
        let message = notifier.message(&notice(DeploymentOutcome::Applied));
        assert_eq!(message.text, "@channel certificate deployed to cluster-1");
        assert_eq!(message.color, "good");
        assert_eq!(message.channel, "#alerts");
    }

    #[test]
    fn message_encodes_failure_as_danger() {
        let notifier = notifier();
        let message = notifier.message(&notice(DeploymentOutcome::Rejected));
        assert_eq!(message.color, "danger");
    }

    #[test]
    fn config_debug_redacts_the_webhook() {
        let url = Url::parse("https://hooks.example.test/services/T0/B0/xyz").unwrap();
        let config = SlackConfig::new(url, "#alerts");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hooks.example.test"));
        assert!(rendered.contains("#alerts"));
    }
}
