pub mod channel;
pub mod cli;
pub mod client;
pub mod error;
pub mod models;
pub mod view;
pub mod websocket;

use client::ChatClient;
use cli::Args;
use log::info;
use std::error::Error;
use tokio::io::BufReader;
use view::document::Document;
use view::TerminalView;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let endpoint = args.endpoint()?;

    info!("--- Core Configuration ---");
    info!("Endpoint: {}", endpoint);
    info!("Outbound Field: {}", args.outbound_field);
    info!("Error Label: {:?}", args.error_label);
    info!("Debug: {}", args.debug);
    info!("-------------------------");

    let websocket = websocket::connect(&endpoint).await?;
    let (channel, inbound) = websocket::split(websocket);
    let view = TerminalView::new(Document::page(), std::io::stdout());
    let mut client = ChatClient::initialize(channel, view, args.client_options())?;

    let input = BufReader::new(tokio::io::stdin());
    websocket::run_session(&mut client, inbound, input).await?;

    client.channel_mut().close().await;
    info!("Session ended for {}", endpoint);
    Ok(())
}
