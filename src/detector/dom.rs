//! Minimal DOM-like element tree.
//!
//! Only what detection and response injection need: tag, attributes, own
//! text and children. Tags and attribute names are stored lowercased.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::challenge::FormField;

const FIELD_TAGS: &[&str] = &["input", "textarea", "select"];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_lowercase(),
            ..Default::default()
        }
    }

    /// `<form>` element.
    pub fn form() -> Self {
        Self::new("form")
    }

    /// `<input>` element with name, type and value.
    pub fn input(name: &str, input_type: &str, value: &str) -> Self {
        Self::new("input")
            .with_attr("name", name)
            .with_attr("type", input_type)
            .with_attr("value", value)
    }

    /// `<textarea>` element; its value is its text.
    pub fn textarea(name: &str, value: &str) -> Self {
        Self::new("textarea").with_attr("name", name).with_text(value)
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(&name.to_lowercase())
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_lowercase(), value.to_string());
    }

    pub fn is_form(&self) -> bool {
        self.tag == "form"
    }

    pub fn is_field(&self) -> bool {
        FIELD_TAGS.contains(&self.tag.as_str())
    }

    /// Field name, empty when unset.
    pub fn name(&self) -> &str {
        self.attr("name").unwrap_or("")
    }

    /// Field type; inputs without one are `text`.
    pub fn input_type(&self) -> String {
        match self.attr("type") {
            Some(t) => t.to_lowercase(),
            None if self.tag == "input" => "text".to_string(),
            None => self.tag.clone(),
        }
    }

    /// Field value. Textareas hold theirs as text.
    pub fn value(&self) -> &str {
        match self.attr("value") {
            Some(v) => v,
            None if self.tag == "textarea" => &self.text,
            None => "",
        }
    }

    /// Concatenated text of this element and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// All descendants in document order, excluding `self`.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        for child in &self.children {
            out.push(child);
            out.extend(child.descendants());
        }
        out
    }

    /// Descendant `input`, `textarea` and `select` elements.
    pub fn fields(&self) -> Vec<&Element> {
        self.descendants().into_iter().filter(|e| e.is_field()).collect()
    }

    /// Descendant `<input>` elements only.
    pub fn inputs(&self) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter(|e| e.tag == "input")
            .collect()
    }

    /// Descendant forms.
    pub fn forms(&self) -> Vec<&Element> {
        self.descendants().into_iter().filter(|e| e.is_form()).collect()
    }

    /// Named fields as they would be submitted.
    pub fn form_fields(&self) -> Vec<FormField> {
        self.fields()
            .into_iter()
            .filter(|e| !e.name().is_empty())
            .map(|e| FormField::new(e.name(), e.input_type(), e.value()))
            .collect()
    }

    /// First descendant `<input>` with the given name.
    pub fn find_input_mut(&mut self, name: &str) -> Option<&mut Element> {
        for child in self.children.iter_mut() {
            if child.tag == "input" && child.name() == name {
                return Some(child);
            }
            if let Some(found) = child.find_input_mut(name) {
                return Some(found);
            }
        }
        None
    }
}
