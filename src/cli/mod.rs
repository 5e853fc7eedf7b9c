use crate::client::{ ClientOptions, DEFAULT_ERROR_LABEL };
use crate::error::ClientError;
use crate::models::websocket::OutboundField;
use clap::Parser;
use url::Url;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Connection Args ---
    /// Host (and optional port) serving the chat endpoint, e.g. 127.0.0.1:8000
    #[arg(long, env = "CHAT_HOST", default_value = "127.0.0.1:8000")]
    pub host: String,

    /// Path of the WebSocket endpoint on the host.
    #[arg(long, env = "CHAT_WS_PATH", default_value = "/ws")]
    pub ws_path: String,

    /// Connect with wss:// instead of ws://
    #[arg(long, env = "CHAT_SECURE", default_value = "false")]
    pub secure: bool,

    // --- Protocol Args ---
    /// Field that carries the user's text in outbound messages (input, text)
    #[arg(long, env = "CHAT_OUTBOUND_FIELD", default_value = "input")]
    pub outbound_field: OutboundField,

    /// Label prefixed to every error reported by the server.
    #[arg(long, env = "CHAT_ERROR_LABEL", default_value = DEFAULT_ERROR_LABEL)]
    pub error_label: String,

    // --- General App Args ---
    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,
}

impl Args {
    pub fn endpoint(&self) -> Result<Url, ClientError> {
        let scheme = if self.secure { "wss" } else { "ws" };
        let host = self.host.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err(ClientError::InvalidEndpoint("host is empty".to_string()));
        }
        if host.contains("://") {
            return Err(
                ClientError::InvalidEndpoint(
                    format!("host '{}' must not include a scheme; use --secure for wss", host)
                )
            );
        }

        let mut url = Url::parse(&format!("{}://{}", scheme, host)).map_err(|e|
            ClientError::InvalidEndpoint(format!("{}: {}", host, e))
        )?;
        if url.path() != "/" || url.query().is_some() {
            return Err(ClientError::InvalidEndpoint(format!("host '{}' must not include a path", host)));
        }

        let path = self.ws_path.trim();
        if path.starts_with('/') {
            url.set_path(path);
        } else {
            url.set_path(&format!("/{}", path));
        }
        Ok(url)
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            outbound_field: self.outbound_field,
            error_label: self.error_label.clone(),
        }
    }
}
