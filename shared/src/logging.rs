//! Shared logging utilities for consistent tracing across the gateway

use crate::types::Workflow;
use chrono::{DateTime, Utc};
use tracing::{error, info};

/// Crates whose events pass the filter at the configured level
const WORKSPACE_TARGETS: [&str; 3] = ["gateway", "orchestrator", "shared"];

/// Build the `EnvFilter` directive string for a base level
pub fn filter_directives(log_level: Option<&str>) -> String {
    let base_level = log_level.unwrap_or("info");
    let mut directives: Vec<String> = WORKSPACE_TARGETS
        .iter()
        .map(|target| format!("{target}={base_level}"))
        .collect();
    directives.push("tower_http=debug".to_string());
    directives.push("reqwest=warn".to_string());
    directives.push("hyper=warn".to_string());
    directives.join(",")
}

/// Initialize the stdout tracing subscriber with an optional log level
pub fn init_tracing_with_level(log_level: Option<&str>) {
    use tracing_subscriber::{fmt, EnvFilter};

    let level_filter = filter_directives(log_level);
    println!("📊 Log level: {level_filter}");

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = fmt()
        .with_env_filter(EnvFilter::new(&level_filter))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for workflow-aware info logging
#[macro_export]
macro_rules! flow_info {
    ($flow:expr, $($arg:tt)*) => {
        tracing::info!(
            workflow = %$flow,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for workflow-aware warning logging
#[macro_export]
macro_rules! flow_warn {
    ($flow:expr, $($arg:tt)*) => {
        tracing::warn!(
            workflow = %$flow,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for workflow-aware error logging
#[macro_export]
macro_rules! flow_error {
    ($flow:expr, $($arg:tt)*) => {
        tracing::error!(
            workflow = %$flow,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for workflow-aware debug logging
#[macro_export]
macro_rules! flow_debug {
    ($flow:expr, $($arg:tt)*) => {
        tracing::debug!(
            workflow = %$flow,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Contextual logging helper for startup messages
pub fn log_startup(flow: &Workflow, details: &str) {
    info!(
        workflow = %flow,
        timestamp = format_timestamp(),
        "🚀 Starting {}",
        details
    );
}

/// Contextual logging helper for shutdown messages
pub fn log_shutdown(flow: &Workflow, reason: &str) {
    info!(
        workflow = %flow,
        timestamp = format_timestamp(),
        "🛑 Shutting down: {}",
        reason
    );
}

/// Contextual logging helper for error conditions
pub fn log_error(flow: &Workflow, context: &str, error: &dyn std::fmt::Display) {
    error!(
        workflow = %flow,
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

/// Contextual logging helper for success conditions
pub fn log_success(flow: &Workflow, message: &str) {
    info!(
        workflow = %flow,
        timestamp = format_timestamp(),
        "✅ {}",
        message
    );
}

/// Contextual logging helper for progress updates
pub fn log_progress(flow: &Workflow, action: &str, details: &str) {
    info!(
        workflow = %flow,
        timestamp = format_timestamp(),
        "📋 {}: {}",
        action,
        details
    );
}
