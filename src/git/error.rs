//! Readable messages for libgit2 failures

use git2::{Error, ErrorClass, ErrorCode};

/// Interpret a git2 error as a short, user-facing reason
pub fn interpret_git_error(err: &Error) -> String {
    let message = err.message().to_lowercase();

    if err.code() == ErrorCode::Auth
        || message.contains("authentication")
        || message.contains("credentials")
    {
        return "Authentication failed".to_string();
    }

    if message.contains("not found")
        || message.contains("404")
        || message.contains("does not appear to be a git repository")
    {
        return "Repository not found".to_string();
    }

    if message.contains("timed out") || message.contains("timeout") {
        return "Network timeout".to_string();
    }

    match err.class() {
        ErrorClass::Net => format!("Network error: {}", err.message()),
        ErrorClass::Http => format!("HTTP error: {}", err.message()),
        ErrorClass::Ssh => format!("SSH error: {}", err.message()),
        ErrorClass::Ssl => format!("TLS error: {}", err.message()),
        _ => err.message().to_string(),
    }
}
