use crate::error::ClientError;
use serde::{ Serialize, Deserialize };
use serde_json::{ Map, Value };
use std::fmt;
use std::str::FromStr;

/// Name of the single field that carries the user's text in an outbound message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutboundField {
    #[default]
    Input,
    Text,
}

impl OutboundField {
    pub fn key(&self) -> &'static str {
        match self {
            OutboundField::Input => "input",
            OutboundField::Text => "text",
        }
    }
}

impl fmt::Display for OutboundField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for OutboundField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "input" => Ok(OutboundField::Input),
            "text" => Ok(OutboundField::Text),
            other => Err(format!("Unsupported outbound field '{}' (expected input or text)", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundMessage {
    pub field: OutboundField,
    pub text: String,
}

impl OutboundMessage {
    pub fn new(field: OutboundField, text: impl Into<String>) -> Self {
        Self { field, text: text.into() }
    }

    /// `{"input": "..."}` or `{"text": "..."}`, never both.
    pub fn to_json(&self) -> String {
        let mut body = Map::new();
        body.insert(self.field.key().to_string(), Value::String(self.text.clone()));
        Value::Object(body).to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl OutputData {
    pub fn is_clear(&self) -> bool {
        self.content.is_none() && self.action.as_deref() == Some("clear")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeData {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", content = "data")]
pub enum InboundMessage {
    #[serde(rename = "output")] Output(OutputData),
    #[serde(rename = "status")] Status(NoticeData),
    #[serde(rename = "error")] Error(NoticeData),
    #[serde(rename = "think")] Think(NoticeData),
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: Value,
    #[serde(default)]
    data: Value,
}

impl InboundMessage {
    /// Parses one inbound frame. Unknown discriminants yield `Ok(None)`.
    pub fn decode(payload: &str) -> Result<Option<Self>, ClientError> {
        let envelope: Envelope = serde_json::from_str(payload)?;
        let kind = match envelope.kind.as_str() {
            Some(kind) => kind,
            None => {
                return Ok(None);
            }
        };
        let message = match kind {
            "output" => {
                let data: OutputData = serde_json::from_value(envelope.data)?;
                if data.content.is_none() && !data.is_clear() {
                    return Err(
                        ClientError::MalformedPayload(
                            <serde_json::Error as serde::de::Error>::missing_field("content")
                        )
                    );
                }
                InboundMessage::Output(data)
            }
            "status" => InboundMessage::Status(serde_json::from_value(envelope.data)?),
            "error" => InboundMessage::Error(serde_json::from_value(envelope.data)?),
            "think" => InboundMessage::Think(serde_json::from_value(envelope.data)?),
            _ => {
                return Ok(None);
            }
        };
        Ok(Some(message))
    }
}
