// crates/cert-relay-core/src/runtime/workflow.rs
// ============================================================================
// Module: Cert Relay Workflow
// Description: Orchestrator state machine for one renewal invocation.
// Purpose: Sequence key fetch, verification, exchange, deployment, and report.
// Dependencies: tokio, tracing, crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The workflow drives one notification through
//! `Start → KeyFetched → PayloadVerified → {NotRenewal | CredentialsExchanged
//! → Deployed → Verified}` with a universal failure path. Key fetch and
//! verification run unconditionally; everything downstream runs only for
//! renewal events. No step is retried and no step is re-entered.
//!
//! The public key, credential, and session tokens are local bindings inside
//! [`Workflow::run`]; nothing is cached across invocations, so a rotated key
//! can never verify a later payload.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use crate::core::event::NotificationPayload;
use crate::core::identifiers::ClusterId;
use crate::core::identifiers::InstanceCrn;
use crate::core::identifiers::SecretName;
use crate::core::outcome::DeploymentOutcome;
use crate::core::outcome::OutcomeNotice;
use crate::core::outcome::SecretUpdateRequest;
use crate::core::response::InvocationResponse;
use crate::core::secrets::Credential;
use crate::interfaces::CredentialExchanger;
use crate::interfaces::InvalidSignatureError;
use crate::interfaces::NotificationDeliveryError;
use crate::interfaces::OutcomeNotifier;
use crate::interfaces::PayloadVerifier;
use crate::interfaces::PublicKeySource;
use crate::interfaces::SecretControlPlane;
use crate::interfaces::VerificationError;
use crate::interfaces::WorkflowError;
use crate::runtime::cancel::CancelSignal;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default settle delay before the single verification read.
///
/// Approximates observed ingress-controller convergence latency; there is no
/// poll loop, so a slower cluster reads as a failed verification.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(60);

// ============================================================================
// SECTION: Workflow Input
// ============================================================================

/// Caller-supplied input for one invocation.
///
/// # Invariants
/// - Immutable for the duration of the run; replaying the same input is an
///   independent invocation with no hidden dedup state.
#[derive(Debug, Clone)]
pub struct WorkflowInput {
    /// Certificate-manager instance reference.
    pub instance: InstanceCrn,
    /// Signed notification payload.
    pub payload: NotificationPayload,
    /// Long-lived API credential.
    pub credential: Credential,
    /// Target cluster identifier.
    pub cluster_id: ClusterId,
    /// Ingress secret name inside the cluster.
    pub secret_name: SecretName,
}

// ============================================================================
// SECTION: Workflow Report
// ============================================================================

/// Terminal disposition of one invocation.
///
/// # Invariants
/// - Variants are stable for response mapping and tests.
#[derive(Debug)]
pub enum WorkflowDisposition {
    /// The event was not a renewal; nothing was deployed.
    NotRenewal,
    /// The renewed certificate was deployed and the applied state confirmed.
    Applied,
    /// Deployment was triggered but the invocation was cancelled during the
    /// settle wait; verification was skipped, not failed.
    VerificationSkipped,
    /// A step failed; the workflow halted at that step.
    Failed(WorkflowError),
}

/// Outcome of one invocation, including secondary notification failures.
///
/// # Invariants
/// - `notification_error` never changes the disposition; the invocation
///   result always reflects the deployment outcome.
#[derive(Debug)]
pub struct WorkflowReport {
    /// Terminal disposition.
    pub disposition: WorkflowDisposition,
    /// Delivery failure from the notifier, if one occurred.
    pub notification_error: Option<NotificationDeliveryError>,
}

impl WorkflowReport {
    /// Builds a report for a failed step with no notification attempt.
    const fn failed(error: WorkflowError) -> Self {
        Self {
            disposition: WorkflowDisposition::Failed(error),
            notification_error: None,
        }
    }

    /// Maps the report onto the uniform invocation response.
    #[must_use]
    pub fn into_response(self) -> InvocationResponse {
        match self.disposition {
            WorkflowDisposition::NotRenewal
            | WorkflowDisposition::Applied
            | WorkflowDisposition::VerificationSkipped => InvocationResponse::success(),
            WorkflowDisposition::Failed(error) => {
                InvocationResponse::failure(error.status(), error.to_string())
            }
        }
    }
}

// ============================================================================
// SECTION: Workflow
// ============================================================================

/// Orchestrator for the notification-verification-and-deployment workflow.
///
/// # Invariants
/// - Sole caller of the collaborator traits; leaf components perform no
///   orchestration of their own.
/// - One invocation per [`Workflow::run`] call; no state is retained
///   between runs.
pub struct Workflow<K, P, X, S, N> {
    /// Public-key source for the certificate-manager instance.
    key_source: K,
    /// Notification payload verifier.
    verifier: P,
    /// Credential-to-token exchanger.
    exchanger: X,
    /// Ingress-secret control plane.
    control_plane: S,
    /// Terminal outcome notifier.
    notifier: N,
    /// Settle delay before the single verification read.
    settle_delay: Duration,
}

impl<K, P, X, S, N> Workflow<K, P, X, S, N>
where
    K: PublicKeySource,
    P: PayloadVerifier,
    X: CredentialExchanger,
    S: SecretControlPlane,
    N: OutcomeNotifier,
{
    /// Assembles a workflow over the five collaborators.
    pub fn new(
        key_source: K,
        verifier: P,
        exchanger: X,
        control_plane: S,
        notifier: N,
        settle_delay: Duration,
    ) -> Self {
        Self {
            key_source,
            verifier,
            exchanger,
            control_plane,
            notifier,
            settle_delay,
        }
    }

    /// Runs one invocation to its terminal state.
    ///
    /// Failures before the deployment stage are not mirrored to the
    /// notifier; deployment-stage failures are, so a human sees them even
    /// if nobody inspects the invocation result.
    pub async fn run(&self, input: &WorkflowInput, cancel: &CancelSignal) -> WorkflowReport {
        let key = match self.key_source.fetch_public_key(&input.instance).await {
            Ok(key) => key,
            Err(error) => {
                tracing::error!(status = error.status(), "public key fetch failed");
                return WorkflowReport::failed(error.into());
            }
        };
        tracing::info!(region = input.instance.region(), "public key fetched");

        let event = match self.verifier.verify(&input.payload, &key) {
            Ok(event) => event,
            Err(error) => {
                tracing::error!("notification signature rejected");
                return WorkflowReport::failed(error.into());
            }
        };
        tracing::info!(event_type = ?event.event_type, "notification payload verified");

        if !event.is_renewal() {
            tracing::info!("event is not a renewal; nothing to deploy");
            return WorkflowReport {
                disposition: WorkflowDisposition::NotRenewal,
                notification_error: None,
            };
        }

        // The verifier guarantees at least one certificate on renewal
        // events; enforce the contract here rather than index blindly.
        let Some(certificate) = event.certificates.first() else {
            let error = InvalidSignatureError::Claims(
                "renewal event carries no certificate entries".to_string(),
            );
            return WorkflowReport::failed(error.into());
        };
        let request = SecretUpdateRequest {
            cert_crn: certificate.cert_crn.clone(),
            cluster_id: input.cluster_id.clone(),
            secret_name: input.secret_name.clone(),
        };

        let tokens = match self.exchanger.exchange(&input.credential).await {
            Ok(tokens) => tokens,
            Err(error) => {
                tracing::error!(status = error.status(), "credential exchange failed");
                return WorkflowReport::failed(error.into());
            }
        };

        if let Err(error) = self.control_plane.apply_update(&tokens, &request).await {
            tracing::error!(
                status = error.status(),
                cluster_id = %request.cluster_id,
                "secret update rejected"
            );
            let notice = self.notice(
                input,
                DeploymentOutcome::Rejected,
                format!("ALB failed updating the certificate secret. Reason: {error}"),
            );
            let notification_error = self.send_notice(&notice).await;
            return WorkflowReport {
                disposition: WorkflowDisposition::Failed(error.into()),
                notification_error,
            };
        }
        tracing::info!(
            cluster_id = %request.cluster_id,
            delay_secs = self.settle_delay.as_secs(),
            "secret update accepted; waiting for ingress controller to settle"
        );

        tokio::select! {
            () = tokio::time::sleep(self.settle_delay) => {}
            () = cancel.cancelled() => {
                tracing::warn!(
                    cluster_id = %request.cluster_id,
                    "invocation cancelled during settle wait; skipping verification"
                );
                let notice = self.notice(
                    input,
                    DeploymentOutcome::VerificationSkipped,
                    format!(
                        "ALB secret update triggered for cluster {}; verification skipped \
                         (invocation cancelled).",
                        request.cluster_id
                    ),
                );
                let notification_error = self.send_notice(&notice).await;
                return WorkflowReport {
                    disposition: WorkflowDisposition::VerificationSkipped,
                    notification_error,
                };
            }
        }

        match self.control_plane.read_secret_state(&tokens, &request).await {
            Ok(state) if state.is_applied() => {
                tracing::info!(cluster_id = %request.cluster_id, "secret update applied");
                let notice = self.notice(
                    input,
                    DeploymentOutcome::Applied,
                    format!("ALB secret updated in cluster {}.", request.cluster_id),
                );
                let notification_error = self.send_notice(&notice).await;
                WorkflowReport {
                    disposition: WorkflowDisposition::Applied,
                    notification_error,
                }
            }
            Ok(state) => {
                let error = VerificationError::NotApplied {
                    state: state.as_str().to_string(),
                };
                tracing::error!(
                    cluster_id = %request.cluster_id,
                    state = state.as_str(),
                    "secret settled in a non-applied state"
                );
                let notice = self.notice(
                    input,
                    DeploymentOutcome::NotYetApplied,
                    format!("ALB failed updating the certificate secret. Reason: {error}"),
                );
                let notification_error = self.send_notice(&notice).await;
                WorkflowReport {
                    disposition: WorkflowDisposition::Failed(error.into()),
                    notification_error,
                }
            }
            Err(error) => {
                tracing::error!(
                    status = error.status(),
                    cluster_id = %request.cluster_id,
                    "secret state query failed"
                );
                let notice = self.notice(
                    input,
                    DeploymentOutcome::VerifyFailed,
                    format!("ALB failed updating the certificate secret. Reason: {error}"),
                );
                let notification_error = self.send_notice(&notice).await;
                WorkflowReport {
                    disposition: WorkflowDisposition::Failed(error.into()),
                    notification_error,
                }
            }
        }
    }

    /// Builds an outcome notice for the invocation's deployment target.
    fn notice(
        &self,
        input: &WorkflowInput,
        outcome: DeploymentOutcome,
        detail: String,
    ) -> OutcomeNotice {
        OutcomeNotice {
            outcome,
            cluster_id: input.cluster_id.clone(),
            secret_name: input.secret_name.clone(),
            detail,
        }
    }

    /// Delivers a notice, demoting delivery failure to a secondary error.
    async fn send_notice(&self, notice: &OutcomeNotice) -> Option<NotificationDeliveryError> {
        match self.notifier.notify(notice).await {
            Ok(()) => None,
            Err(error) => {
                tracing::warn!(status = error.status(), "outcome notification delivery failed");
                Some(error)
            }
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
