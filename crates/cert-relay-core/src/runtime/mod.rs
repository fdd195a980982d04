// crates/cert-relay-core/src/runtime/mod.rs
// ============================================================================
// Module: Cert Relay Runtime
// Description: Workflow orchestration and invocation-scoped cancellation.
// Purpose: Drive one notification through verification and deployment.
// Dependencies: tokio, tracing, crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The runtime owns the invocation lifecycle: the [`workflow::Workflow`]
//! sequences the collaborators and the [`cancel`] pair bounds the settle
//! wait to the invocation's lifetime.

pub mod cancel;
pub mod workflow;
