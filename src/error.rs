use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Required element '#{0}' is missing from the document")]
    MissingElement(String),

    #[error("Malformed inbound payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Channel closed")]
    ChannelClosed,

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Display write failed: {0}")]
    Io(#[from] std::io::Error),
}
