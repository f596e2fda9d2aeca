// Octocrab error mapping

use mobydick_core::port::RemoteError;

/// Map an octocrab error into the port's RemoteError
///
/// GitHub API errors keep their status code and the platform's message;
/// transport and decoding errors carry no status.
pub fn remote_error(err: octocrab::Error) -> RemoteError {
    match err {
        octocrab::Error::GitHub { source, .. } => RemoteError::new(
            Some(source.status_code.as_u16()),
            source.message.clone(),
        ),
        other => RemoteError::without_status(other.to_string()),
    }
}
