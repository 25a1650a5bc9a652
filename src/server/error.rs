//! Error handling for the lot server module

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The server's JSON could not be decoded into the expected shape.
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with a non-success status and no usable body.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },
}

impl ServerError {
    pub async fn from_response(response: reqwest::Response) -> ServerError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        ServerError::Http { status, message }
    }
}
