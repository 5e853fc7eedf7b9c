use crate::error::ClientError;

pub const USER_INPUT_ID: &str = "user-input";
pub const SEND_BUTTON_ID: &str = "send-button";
pub const DISPLAY_AREA_ID: &str = "display-area";
pub const FOOTER_TAG: &str = "footer";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub class_name: String,
    pub text: String,
    /// Only meaningful for form controls such as `input`.
    pub value: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self { tag: tag.to_string(), ..Default::default() }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class_name: &str) -> Self {
        self.class_name = class_name.to_string();
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_name.split_whitespace().any(|c| c == class)
    }

    fn find(&self, id: &str) -> Option<&Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Inserts `child` before the first descendant tagged `tag` in document
    /// order. Hands `child` back when no such descendant exists.
    fn insert_before_tag(&mut self, tag: &str, child: Element) -> Result<(), Element> {
        let mut child = child;
        for idx in 0..self.children.len() {
            if self.children[idx].tag == tag {
                self.children.insert(idx, child);
                return Ok(());
            }
            match self.children[idx].insert_before_tag(tag, child) {
                Ok(()) => return Ok(()),
                Err(returned) => child = returned,
            }
        }
        Err(child)
    }

    fn walk<'a>(&'a self, out: &mut Vec<&'a Element>) {
        out.push(self);
        for child in &self.children {
            child.walk(out);
        }
    }
}

/// A minimal element tree standing in for the host page markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub body: Element,
}

impl Document {
    pub fn new(body: Element) -> Self {
        Self { body }
    }

    /// The standard chat page: display area, input, send button, footer.
    pub fn page() -> Self {
        let mut body = Element::new("body");
        body.children.push(Element::new("div").with_id(DISPLAY_AREA_ID));
        body.children.push(Element::new("input").with_id(USER_INPUT_ID));
        body.children.push(Element::new("button").with_id(SEND_BUTTON_ID).with_text("Send"));
        body.children.push(Element::new(FOOTER_TAG));
        Self { body }
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        self.body.find(id)
    }

    pub fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.body.find_mut(id)
    }

    pub fn elements(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        self.body.walk(&mut out);
        out
    }

    pub fn get_elements_by_class_name(&self, class: &str) -> Vec<&Element> {
        self.elements()
            .into_iter()
            .filter(|el| el.has_class(class))
            .collect()
    }

    pub fn count_by_id(&self, id: &str) -> usize {
        self.elements()
            .into_iter()
            .filter(|el| el.id.as_deref() == Some(id))
            .count()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.elements().into_iter().any(|el| el.tag == tag)
    }

    pub fn append_child(&mut self, parent_id: &str, child: Element) -> Result<(), ClientError> {
        let parent = self
            .get_element_by_id_mut(parent_id)
            .ok_or_else(|| ClientError::MissingElement(parent_id.to_string()))?;
        parent.children.push(child);
        Ok(())
    }

    /// Inserts right before the first element with `tag`, inside that
    /// element's own parent. Appends to `body` when there is none.
    pub fn insert_before_tag(&mut self, tag: &str, child: Element) {
        if let Err(child) = self.body.insert_before_tag(tag, child) {
            self.body.children.push(child);
        }
    }

    /// Checks that the page provides every element the chat client needs.
    pub fn locate_controls(&self) -> Result<(), ClientError> {
        for id in [USER_INPUT_ID, SEND_BUTTON_ID, DISPLAY_AREA_ID] {
            if self.get_element_by_id(id).is_none() {
                return Err(ClientError::MissingElement(id.to_string()));
            }
        }
        if !self.has_tag(FOOTER_TAG) {
            return Err(ClientError::MissingElement(FOOTER_TAG.to_string()));
        }
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::page()
    }
}
