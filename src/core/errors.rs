use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZimuError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No transcript found for key: {0}")]
    MissingTranscript(String),

    #[error("Malformed transcript {0}: {1}")]
    MalformedTranscript(String, String),

    #[error("No video handle available")]
    NoVideo,

    #[error("ZimuError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for ZimuError {
    fn from(error: std::io::Error) -> Self {
        ZimuError::Io(Box::new(error))
    }
}
