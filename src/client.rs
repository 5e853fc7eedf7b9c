use crate::channel::Channel;
use crate::error::ClientError;
use crate::models::websocket::{ InboundMessage, OutboundField, OutboundMessage };
use crate::view::{ Indicator, MessageKind, View };
use log::{ debug, warn };

pub const DEFAULT_ERROR_LABEL: &str = "错误: ";

#[derive(Clone, Debug)]
pub struct ClientOptions {
    pub outbound_field: OutboundField,
    /// Prefixed verbatim to every server-reported error.
    pub error_label: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            outbound_field: OutboundField::default(),
            error_label: DEFAULT_ERROR_LABEL.to_string(),
        }
    }
}

/// Binds the input controls and display of a page to one chat channel.
pub struct ChatClient<C: Channel, V: View> {
    channel: C,
    view: V,
    options: ClientOptions,
}

impl<C: Channel, V: View> ChatClient<C, V> {
    /// Fails when the view does not expose the controls the client needs.
    pub fn initialize(channel: C, view: V, options: ClientOptions) -> Result<Self, ClientError> {
        view.locate_controls()?;
        Ok(Self { channel, view, options })
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    pub fn into_parts(self) -> (C, V) {
        (self.channel, self.view)
    }

    /// Sends the current input. Returns `false` when the trimmed input is empty.
    ///
    /// Delivery is fire-and-forget: a transport failure is logged and the
    /// message is still shown locally, the same way a closed page socket
    /// silently discards outgoing data.
    pub async fn send(&mut self) -> bool {
        let raw = self.view.input_value();
        let text = raw.trim();
        if text.is_empty() {
            return false;
        }
        let text = text.to_string();

        let outbound = OutboundMessage::new(self.options.outbound_field, text.as_str());
        if let Err(e) = self.channel.send_text(outbound.to_json()).await {
            warn!("Outbound message dropped: {}", e);
        }
        self.view.render_message(&text, MessageKind::User);
        self.view.clear_input();
        true
    }

    /// Applies one inbound frame to the view.
    pub fn receive(&mut self, payload: &str) -> Result<(), ClientError> {
        let message = match InboundMessage::decode(payload)? {
            Some(message) => message,
            None => {
                debug!("Ignoring inbound message with unrecognized type: {}", payload);
                return Ok(());
            }
        };

        match message {
            InboundMessage::Output(data) => {
                if data.is_clear() {
                    self.view.clear_display();
                } else if let Some(content) = data.content {
                    self.view.render_message(&content, MessageKind::Bot);
                }
            }
            InboundMessage::Status(data) => {
                self.view.upsert_indicator(Indicator::Status, &data.message);
            }
            InboundMessage::Error(data) => {
                let text = format!("{}{}", self.options.error_label, data.message);
                self.view.render_message(&text, MessageKind::Error);
            }
            InboundMessage::Think(data) => {
                self.view.upsert_indicator(Indicator::Think, &data.message);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::document::{ Document, DISPLAY_AREA_ID };
    use crate::view::DocumentView;
    use async_trait::async_trait;

    #[derive(Default)]
    struct RecordingChannel {
        sent: Vec<String>,
        fail: bool,
    }

    #[async_trait]
    impl Channel for RecordingChannel {
        async fn send_text(&mut self, payload: String) -> Result<(), ClientError> {
            if self.fail {
                return Err(ClientError::ChannelClosed);
            }
            self.sent.push(payload);
            Ok(())
        }
    }

    fn client() -> ChatClient<RecordingChannel, DocumentView> {
        ChatClient::initialize(
            RecordingChannel::default(),
            DocumentView::default(),
            ClientOptions::default()
        ).unwrap()
    }

    fn display_texts(client: &ChatClient<RecordingChannel, DocumentView>) -> Vec<String> {
        client
            .view()
            .display_children()
            .iter()
            .map(|el| el.text.clone())
            .collect()
    }

    #[tokio::test]
    async fn send_trims_transmits_renders_and_clears() {
        let mut client = client();
        client.view_mut().set_input("  hello \n");
        assert!(client.send().await);

        assert_eq!(client.channel().sent, vec![r#"{"input":"hello"}"#.to_string()]);
        let children = client.view().display_children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].text, "hello");
        assert!(children[0].has_class("user-message"));
        assert_eq!(client.view().input_value(), "");
    }

    #[tokio::test]
    async fn send_uses_configured_field() {
        let options = ClientOptions { outbound_field: OutboundField::Text, ..Default::default() };
        let mut client = ChatClient::initialize(
            RecordingChannel::default(),
            DocumentView::default(),
            options
        ).unwrap();
        client.view_mut().set_input("hello");
        client.send().await;
        assert_eq!(client.channel().sent, vec![r#"{"text":"hello"}"#.to_string()]);
    }

    #[tokio::test]
    async fn blank_input_is_a_no_op() {
        for blank in ["", "   ", "\t\n "] {
            let mut client = client();
            client.view_mut().set_input(blank);
            let before = client.view().document().clone();

            assert!(!client.send().await);
            assert!(client.channel().sent.is_empty());
            assert_eq!(client.view().document(), &before);
        }
    }

    #[tokio::test]
    async fn closed_channel_still_renders_locally() {
        let mut client = ChatClient::initialize(
            RecordingChannel { sent: Vec::new(), fail: true },
            DocumentView::default(),
            ClientOptions::default()
        ).unwrap();
        client.view_mut().set_input("hello");
        assert!(client.send().await);
        assert_eq!(display_texts(&client), vec!["hello"]);
        assert_eq!(client.view().input_value(), "");
    }

    #[test]
    fn output_messages_append_without_overwrite() {
        let mut client = client();
        client.receive(r#"{"type":"output","data":{"content":"first"}}"#).unwrap();
        client.receive(r#"{"type":"output","data":{"content":"second"}}"#).unwrap();
        client.receive(r#"{"type":"output","data":{"content":"second"}}"#).unwrap();

        assert_eq!(display_texts(&client), vec!["first", "second", "second"]);
        assert!(
            client
                .view()
                .display_children()
                .iter()
                .all(|el| el.has_class("bot-message"))
        );
    }

    #[test]
    fn status_updates_a_single_element() {
        let mut client = client();
        for i in 0..5 {
            let payload = format!(r#"{{"type":"status","data":{{"message":"step {}"}}}}"#, i);
            client.receive(&payload).unwrap();
        }
        let doc = client.view().document();
        assert_eq!(doc.count_by_id("status-area"), 1);
        assert_eq!(doc.get_element_by_id("status-area").unwrap().text, "step 4");
        assert!(client.view().display_children().is_empty());
    }

    #[test]
    fn think_updates_a_single_element() {
        let mut client = client();
        client.receive(r#"{"type":"think","data":{"message":"thinking..."}}"#).unwrap();
        client.receive(r#"{"type":"think","data":{"message":"done"}}"#).unwrap();

        let doc = client.view().document();
        assert_eq!(doc.count_by_id("think-indicator"), 1);
        assert_eq!(doc.get_element_by_id("think-indicator").unwrap().text, "done");
    }

    #[test]
    fn status_and_think_are_independent() {
        let mut client = client();
        client.receive(r#"{"type":"status","data":{"message":"s"}}"#).unwrap();
        client.receive(r#"{"type":"think","data":{"message":"t"}}"#).unwrap();

        let doc = client.view().document();
        assert_eq!(doc.get_element_by_id("status-area").unwrap().text, "s");
        assert_eq!(doc.get_element_by_id("think-indicator").unwrap().text, "t");
    }

    #[test]
    fn every_error_gets_its_own_element() {
        let mut client = client();
        for _ in 0..3 {
            client.receive(r#"{"type":"error","data":{"message":"boom"}}"#).unwrap();
        }
        let errors = client.view().document().get_elements_by_class_name("error-message");
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|el| el.text == "错误: boom"));
    }

    #[test]
    fn error_label_is_configurable() {
        let options = ClientOptions { error_label: "Error: ".to_string(), ..Default::default() };
        let mut client = ChatClient::initialize(
            RecordingChannel::default(),
            DocumentView::default(),
            options
        ).unwrap();
        client.receive(r#"{"type":"error","data":{"message":"timeout"}}"#).unwrap();
        assert_eq!(display_texts(&client), vec!["Error: timeout"]);
    }

    #[test]
    fn unknown_types_change_nothing() {
        let mut client = client();
        let before = client.view().document().clone();
        client.receive(r#"{"type":"security_alert","data":{"message":"x"}}"#).unwrap();
        assert_eq!(client.view().document(), &before);
    }

    #[test]
    fn malformed_payload_is_reported_and_leaves_display_alone() {
        let mut client = client();
        let before = client.view().document().clone();
        assert!(client.receive("{not json").is_err());
        assert!(client.receive(r#"{"type":"output","data":{}}"#).is_err());
        assert_eq!(client.view().document(), &before);
    }

    #[test]
    fn clear_action_empties_display_area() {
        let mut client = client();
        client.receive(r#"{"type":"output","data":{"content":"old"}}"#).unwrap();
        client.receive(r#"{"type":"output","data":{"action":"clear"}}"#).unwrap();
        client.receive(r#"{"type":"output","data":{"content":"new"}}"#).unwrap();
        assert_eq!(display_texts(&client), vec!["new"]);
    }

    #[test]
    fn initialize_requires_controls() {
        let mut document = Document::page();
        document.body.children.retain(|el| el.id.as_deref() != Some(DISPLAY_AREA_ID));
        let result = ChatClient::initialize(
            RecordingChannel::default(),
            DocumentView::new(document),
            ClientOptions::default()
        );
        assert!(matches!(result, Err(ClientError::MissingElement(id)) if id == DISPLAY_AREA_ID));
    }
}
