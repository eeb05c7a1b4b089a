use tracing::{error, info, warn};

/// Logs command start with consistent format
pub fn log_command_start(command: &str, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!("CMD_START: {} in chat {} - {}", command, chat_id, d),
        None => info!("CMD_START: {} in chat {}", command, chat_id),
    }
}

/// Logs command completion with consistent format
pub fn log_command_success(command: &str, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!("CMD_SUCCESS: {} in chat {} - {}", command, chat_id, d),
        None => info!("CMD_SUCCESS: {} in chat {}", command, chat_id),
    }
}

/// Logs command errors with consistent format
pub fn log_command_error(command: &str, chat_id: i64, error: &str) {
    error!("CMD_ERROR: {} in chat {} - {}", command, chat_id, error);
}

/// Logs wizard validation rejections with consistent format
pub fn log_validation_error(step: &str, value: &str, error: &str, chat_id: i64) {
    warn!(
        "VALIDATION_ERROR: {} rejected '{}': {} - chat {}",
        step, value, error, chat_id
    );
}

/// Logs store operations with consistent format
pub fn log_store_operation(operation: &str, tab: &str, details: Option<&str>) {
    match details {
        Some(d) => tracing::debug!("STORE_OP: {} on {} - {}", operation, tab, d),
        None => tracing::debug!("STORE_OP: {} on {}", operation, tab),
    }
}

/// Logs store errors with consistent format
pub fn log_store_error(operation: &str, tab: &str, error: &str) {
    error!("STORE_ERROR: {} on {} failed: {}", operation, tab, error);
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
