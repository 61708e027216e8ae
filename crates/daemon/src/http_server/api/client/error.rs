use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("HTTP status {0}: {1}")]
    HttpStatus(StatusCode, String),
}

impl ApiError {
    /// Status code if the server answered with an error
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::HttpStatus(status, _) => Some(*status),
            _ => None,
        }
    }

    /// The server's message, or a generic one for transport failures
    pub fn user_message(&self) -> String {
        match self {
            ApiError::HttpStatus(_, msg) if !msg.is_empty() => msg.clone(),
            ApiError::HttpStatus(status, _) => format!("request failed ({})", status),
            _ => "could not reach the note service, please try again".to_string(),
        }
    }
}
