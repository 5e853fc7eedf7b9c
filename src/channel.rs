use crate::error::ClientError;
use async_trait::async_trait;
use futures::SinkExt;
use futures_util::stream::SplitSink;
use tokio::io::{ AsyncRead, AsyncWrite };
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::WebSocketStream;

/// Outbound half of the chat connection.
#[async_trait]
pub trait Channel: Send {
    async fn send_text(&mut self, payload: String) -> Result<(), ClientError>;
}

pub struct WsChannel<S> {
    sink: SplitSink<WebSocketStream<S>, Message>,
    closed: bool,
}

impl<S> WsChannel<S> where S: AsyncRead + AsyncWrite + Unpin + Send {
    pub fn new(sink: SplitSink<WebSocketStream<S>, Message>) -> Self {
        Self { sink, closed: false }
    }

    pub async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        let _ = self.sink.close().await;
    }
}

#[async_trait]
impl<S> Channel for WsChannel<S> where S: AsyncRead + AsyncWrite + Unpin + Send {
    async fn send_text(&mut self, payload: String) -> Result<(), ClientError> {
        if self.closed {
            return Err(ClientError::ChannelClosed);
        }
        match self.sink.send(Message::Text(payload)).await {
            Ok(()) => Ok(()),
            Err(
                tokio_tungstenite::tungstenite::Error::ConnectionClosed
                | tokio_tungstenite::tungstenite::Error::AlreadyClosed
            ) => {
                self.closed = true;
                Err(ClientError::ChannelClosed)
            }
            Err(e) => Err(ClientError::WebSocket(e)),
        }
    }
}
