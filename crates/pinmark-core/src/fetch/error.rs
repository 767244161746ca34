//! Fetch error type and its coarse classification for logs.

/// Why a remote image could not be retrieved.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, TLS, bad URL, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// The response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// The body grew past the configured limit; the transfer was aborted.
    #[error("response exceeds {limit} bytes")]
    TooLarge { limit: u64 },
    /// The server answered 2xx with no bytes.
    #[error("response body is empty")]
    EmptyBody,
    /// The blocking fetch task panicked or was cancelled.
    #[error("fetch task aborted: {0}")]
    Aborted(String),
}

/// Coarse failure category, used as a structured log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Timeout,
    Connection,
    HttpStatus,
    TooLarge,
    EmptyBody,
    Other,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Curl(e) => classify_curl_error(e),
            FetchError::Http(_) => FetchErrorKind::HttpStatus,
            FetchError::TooLarge { .. } => FetchErrorKind::TooLarge,
            FetchError::EmptyBody => FetchErrorKind::EmptyBody,
            FetchError::Aborted(_) => FetchErrorKind::Other,
        }
    }
}

fn classify_curl_error(e: &curl::Error) -> FetchErrorKind {
    if e.is_operation_timedout() {
        return FetchErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return FetchErrorKind::Connection;
    }
    FetchErrorKind::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curl_timeouts_and_connection_errors() {
        // CURLE_OPERATION_TIMEDOUT
        assert_eq!(FetchError::Curl(curl::Error::new(28)).kind(), FetchErrorKind::Timeout);
        // CURLE_COULDNT_CONNECT
        assert_eq!(FetchError::Curl(curl::Error::new(7)).kind(), FetchErrorKind::Connection);
        // CURLE_COULDNT_RESOLVE_HOST
        assert_eq!(FetchError::Curl(curl::Error::new(6)).kind(), FetchErrorKind::Connection);
    }

    #[test]
    fn non_curl_kinds() {
        assert_eq!(FetchError::Http(404).kind(), FetchErrorKind::HttpStatus);
        assert_eq!(FetchError::TooLarge { limit: 1 }.kind(), FetchErrorKind::TooLarge);
        assert_eq!(FetchError::EmptyBody.kind(), FetchErrorKind::EmptyBody);
        assert_eq!(FetchError::Http(503).to_string(), "HTTP 503");
    }
}
