use crate::channel::{ Channel, WsChannel };
use crate::client::ChatClient;
use crate::error::ClientError;
use crate::view::View;
use futures::{ Stream, StreamExt };
use log::{ debug, error, info, warn };
use tokio::io::{ AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite };
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{ connect_async, MaybeTlsStream, WebSocketStream };
use url::Url;

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub async fn connect(endpoint: &Url) -> Result<WsStream, ClientError> {
    info!("Connecting to {}", endpoint);
    let (websocket, response) = connect_async(endpoint.as_str()).await?;
    debug!("Handshake completed with status {}", response.status());
    info!("Connected to {}", endpoint);
    Ok(websocket)
}

/// Splits an open socket into the outbound channel and the inbound frame stream.
pub fn split<S>(
    websocket: WebSocketStream<S>
) -> (WsChannel<S>, futures_util::stream::SplitStream<WebSocketStream<S>>)
    where S: AsyncRead + AsyncWrite + Unpin + Send
{
    let (sink, stream) = websocket.split();
    (WsChannel::new(sink), stream)
}

/// Drives one client until the channel closes.
///
/// Input lines and socket frames are handled strictly one at a time. When
/// `input` reaches EOF the loop keeps delivering inbound messages. There is no
/// reconnection: once the server closes the channel the session ends.
pub async fn run_session<C, V, St, R>(
    client: &mut ChatClient<C, V>,
    mut inbound: St,
    input: R
) -> Result<(), ClientError>
    where
        C: Channel,
        V: View,
        St: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
        R: AsyncBufRead + Unpin
{
    let mut lines = input.lines();
    let mut input_open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                match line {
                    Ok(Some(line)) => {
                        client.view_mut().set_input(&line);
                        if !client.send().await {
                            debug!("Ignoring empty input");
                        }
                    }
                    Ok(None) => {
                        info!("Input closed; still listening for server messages");
                        input_open = false;
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                        warn!("Skipping unreadable input line: {}", e);
                    }
                    Err(e) => {
                        error!("Failed to read input: {}", e);
                        input_open = false;
                    }
                }
            }
            frame = inbound.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        if let Err(e) = client.receive(&text) {
                            error!("Failed to handle inbound message: {}", e);
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        info!("Server closed the channel: {:?}", frame);
                        return Ok(());
                    }
                    Some(Ok(Message::Binary(_))) => {
                        warn!("Ignoring binary message from server");
                    }
                    Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {}
                    Some(Ok(Message::Frame(_))) => {}
                    Some(Err(e)) => {
                        match e {
                            | tokio_tungstenite::tungstenite::Error::ConnectionClosed
                            | tokio_tungstenite::tungstenite::Error::AlreadyClosed => {
                                info!("Channel closed");
                                return Ok(());
                            }
                            tokio_tungstenite::tungstenite::Error::Io(ref io_err) if
                                io_err.kind() == std::io::ErrorKind::ConnectionReset
                            => {
                                info!("Channel reset by server");
                                return Ok(());
                            }
                            _ => {
                                error!("Error receiving message: {}", e);
                                return Err(ClientError::WebSocket(e));
                            }
                        }
                    }
                    None => {
                        info!("Channel stream ended");
                        return Ok(());
                    }
                }
            }
        }
    }
}
