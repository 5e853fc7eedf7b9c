pub mod document;
pub mod terminal;

use crate::error::ClientError;
use log::error;
use document::{ Document, Element, DISPLAY_AREA_ID, FOOTER_TAG, USER_INPUT_ID };

pub use terminal::TerminalView;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    User,
    Bot,
    Error,
}

impl MessageKind {
    pub fn class_name(&self) -> &'static str {
        match self {
            MessageKind::User => "message user-message",
            MessageKind::Bot => "message bot-message",
            MessageKind::Error => "error-message",
        }
    }
}

/// Singleton elements that are created once and then updated in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indicator {
    Status,
    Think,
}

impl Indicator {
    pub fn id(&self) -> &'static str {
        match self {
            Indicator::Status => "status-area",
            Indicator::Think => "think-indicator",
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            Indicator::Status => "status-message",
            Indicator::Think => "think-message",
        }
    }
}

pub trait View {
    fn locate_controls(&self) -> Result<(), ClientError>;

    fn input_value(&self) -> String;

    fn set_input(&mut self, text: &str);

    fn clear_input(&mut self);

    /// Appends a new element; never deduplicates.
    fn render_message(&mut self, text: &str, kind: MessageKind);

    /// Creates the indicator on first use, replaces its text afterwards.
    fn upsert_indicator(&mut self, indicator: Indicator, text: &str);

    fn clear_display(&mut self);
}

/// Headless view that only mutates the element tree.
#[derive(Clone, Debug, Default)]
pub struct DocumentView {
    document: Document,
}

impl DocumentView {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn display_children(&self) -> &[Element] {
        self.document
            .get_element_by_id(DISPLAY_AREA_ID)
            .map(|el| el.children.as_slice())
            .unwrap_or(&[])
    }
}

impl View for DocumentView {
    fn locate_controls(&self) -> Result<(), ClientError> {
        self.document.locate_controls()
    }

    fn input_value(&self) -> String {
        self.document
            .get_element_by_id(USER_INPUT_ID)
            .map(|el| el.value.clone())
            .unwrap_or_default()
    }

    fn set_input(&mut self, text: &str) {
        if let Some(input) = self.document.get_element_by_id_mut(USER_INPUT_ID) {
            input.value = text.to_string();
        }
    }

    fn clear_input(&mut self) {
        self.set_input("");
    }

    fn render_message(&mut self, text: &str, kind: MessageKind) {
        let element = Element::new("div").with_class(kind.class_name()).with_text(text);
        if let Err(e) = self.document.append_child(DISPLAY_AREA_ID, element) {
            error!("Failed to render message: {}", e);
        }
    }

    fn upsert_indicator(&mut self, indicator: Indicator, text: &str) {
        if let Some(existing) = self.document.get_element_by_id_mut(indicator.id()) {
            existing.text = text.to_string();
            return;
        }

        let element = Element::new("div")
            .with_id(indicator.id())
            .with_class(indicator.class_name())
            .with_text(text);
        match indicator {
            Indicator::Status => self.document.insert_before_tag(FOOTER_TAG, element),
            Indicator::Think => {
                if let Err(e) = self.document.append_child(DISPLAY_AREA_ID, element) {
                    error!("Failed to create think indicator: {}", e);
                }
            }
        }
    }

    fn clear_display(&mut self) {
        if let Some(area) = self.document.get_element_by_id_mut(DISPLAY_AREA_ID) {
            area.children.clear();
        }
    }
}
