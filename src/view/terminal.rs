use super::{ DocumentView, Indicator, MessageKind, View };
use super::document::Document;
use crate::error::ClientError;
use log::error;
use std::io::Write;

/// Keeps the element tree current and echoes each mutation as one line.
pub struct TerminalView<W: Write> {
    inner: DocumentView,
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(document: Document, out: W) -> Self {
        Self { inner: DocumentView::new(document), out }
    }

    pub fn document(&self) -> &Document {
        self.inner.document()
    }

    pub fn into_parts(self) -> (Document, W) {
        (self.inner.into_document(), self.out)
    }

    fn echo(&mut self, line: String) {
        let result = writeln!(self.out, "{}", line).and_then(|_| self.out.flush());
        if let Err(e) = result {
            error!("{}", ClientError::Io(e));
        }
    }
}

pub fn format_message(text: &str, kind: MessageKind) -> String {
    match kind {
        MessageKind::User => format!("you> {}", text),
        MessageKind::Bot => format!("bot> {}", text),
        MessageKind::Error => text.to_string(),
    }
}

pub fn format_indicator(indicator: Indicator, text: &str) -> String {
    match indicator {
        Indicator::Status => format!("[status] {}", text),
        Indicator::Think => format!("[think] {}", text),
    }
}

impl<W: Write> View for TerminalView<W> {
    fn locate_controls(&self) -> Result<(), ClientError> {
        self.inner.locate_controls()
    }

    fn input_value(&self) -> String {
        self.inner.input_value()
    }

    fn set_input(&mut self, text: &str) {
        self.inner.set_input(text);
    }

    fn clear_input(&mut self) {
        self.inner.clear_input();
    }

    fn render_message(&mut self, text: &str, kind: MessageKind) {
        self.inner.render_message(text, kind);
        self.echo(format_message(text, kind));
    }

    fn upsert_indicator(&mut self, indicator: Indicator, text: &str) {
        self.inner.upsert_indicator(indicator, text);
        self.echo(format_indicator(indicator, text));
    }

    fn clear_display(&mut self) {
        self.inner.clear_display();
        self.echo("-- display cleared --".to_string());
    }
}
