use crate::api::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    ConnectionRefused,
    Timeout,
    Unauthorized, // HTTP 401
    NotFound,     // HTTP 404
    ServerError,  // HTTP 500+
    NetworkError, // DNS, routing, etc.
    Other,
}

/// Classify a transport failure message
pub fn classify_message(message: &str) -> ErrorType {
    let error_msg = message.to_lowercase();

    if error_msg.contains("connection refused") {
        return ErrorType::ConnectionRefused;
    }
    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        return ErrorType::Timeout;
    }
    if error_msg.contains("dns") || error_msg.contains("network") {
        return ErrorType::NetworkError;
    }

    ErrorType::Other
}

/// Classify any API error for the connection indicator
pub fn classify_error(error: &ApiError) -> ErrorType {
    match error {
        ApiError::Transport(message) => classify_message(message),
        ApiError::Application { status, .. } => match status {
            401 => ErrorType::Unauthorized,
            404 => ErrorType::NotFound,
            500..=599 => ErrorType::ServerError,
            _ => ErrorType::Other,
        },
    }
}

/// Raw description of a reqwest failure, walking to the root cause
pub fn describe_transport(error: &reqwest::Error) -> String {
    let mut deepest = error.to_string();
    let mut source = std::error::Error::source(error);

    while let Some(err) = source {
        deepest = err.to_string();
        source = err.source();
    }

    if error.is_timeout() && !deepest.to_lowercase().contains("time") {
        return format!("request timed out ({})", deepest);
    }

    deepest
}

/// Short label for the status bar
pub fn error_type_label(error_type: &ErrorType) -> &'static str {
    match error_type {
        ErrorType::ConnectionRefused => "connection refused",
        ErrorType::Timeout => "timed out",
        ErrorType::Unauthorized => "not logged in",
        ErrorType::NotFound => "not found",
        ErrorType::ServerError => "server error",
        ErrorType::NetworkError => "network unreachable",
        ErrorType::Other => "error",
    }
}

/// The one notification text shown for a failed operation
///
/// `failed` names the operation for server errors ("Error loading processes"),
/// `doing` names it for connection errors ("loading processes"). Server
/// messages are always shown verbatim.
pub fn failure_notice(failed: &str, doing: &str, error: &ApiError) -> String {
    match error {
        ApiError::Application { message, .. } => format!("{}: {}", failed, message),
        ApiError::Transport(_) => format!("Connection error while {}", doing),
    }
}
