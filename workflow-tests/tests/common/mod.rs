//! Common test utilities for workflow integration tests.

use workflow_tests::{init_tracing, WorkflowContext};

/// Create a workflow context with both routers sharing one secret.
pub fn setup() -> WorkflowContext {
    init_tracing();
    WorkflowContext::new()
}
