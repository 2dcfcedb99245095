/// State management module
///
/// This module handles all workflow state, including:
/// - Shared data structures (data.rs)
/// - The try-on request state machine (workflow.rs)

pub mod data;
pub mod workflow;
