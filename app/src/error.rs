use thiserror::Error;

/// Errors from the restaurant endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("server responded with status {status}")]
    Status { status: u16 },
    #[error("invalid response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::Decode(error)
        } else if let Some(status) = error.status() {
            ApiError::Status {
                status: status.as_u16(),
            }
        } else {
            ApiError::Request(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message() {
        let error = ApiError::Status { status: 404 };
        assert_eq!(error.to_string(), "server responded with status 404");
    }
}
