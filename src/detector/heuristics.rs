//! Challenge detection heuristics.

use tracing::{debug, warn};

use super::dom::Element;
use super::patterns::{is_challenge_field, matches_challenge_pattern, CHALLENGE_ATTRIBUTES};
use crate::challenge::{parse_challenge_str, ChallengeDescriptor};

/// Recognises authentication challenges in page elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChallengeDetector;

impl ChallengeDetector {
    pub fn new() -> Self {
        Self
    }

    /// True if any of the three heuristics fires for `element`.
    pub fn is_challenge(&self, element: &Element) -> bool {
        self.check_content(element)
            || self.check_attributes(element)
            || self.check_form_fields(element)
    }

    /// Extract and parse the challenge carried by `element`.
    ///
    /// Tries marker attributes, then text content, then challenge fields.
    pub fn extract_challenge(&self, element: &Element) -> Option<ChallengeDescriptor> {
        self.extract(element).map(|(_, descriptor)| descriptor)
    }

    /// Same as [`extract_challenge`](Self::extract_challenge) but returns the
    /// raw string the descriptor was parsed from, so it can be re-parsed on
    /// the other side of the bridge.
    pub fn extract_raw(&self, element: &Element) -> Option<String> {
        self.extract(element).map(|(raw, _)| raw)
    }

    /// Heuristic used to decide whether a form submission is a login.
    ///
    /// Needs a username-like input (type `text` or name containing `user`)
    /// and a password-like input (type `password` or name containing `pass`).
    pub fn is_auth_form(&self, form: &Element) -> bool {
        let inputs = form.inputs();
        let has_username = inputs
            .iter()
            .any(|i| i.input_type() == "text" || i.name().to_lowercase().contains("user"));
        let has_password = inputs
            .iter()
            .any(|i| i.input_type() == "password" || i.name().to_lowercase().contains("pass"));
        has_username && has_password
    }

    fn extract(&self, element: &Element) -> Option<(String, ChallengeDescriptor)> {
        debug!(tag = %element.tag, "Extracting challenge from element");

        let found = self
            .candidates(element)
            .into_iter()
            .find_map(|raw| parse_challenge_str(&raw).map(|d| (raw, d)));

        if found.is_none() {
            warn!(tag = %element.tag, "Could not extract challenge from element");
        }
        found
    }

    fn candidates(&self, element: &Element) -> Vec<String> {
        let mut out: Vec<String> = CHALLENGE_ATTRIBUTES
            .iter()
            .filter_map(|a| element.attr(a))
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect();

        let text = element.text_content();
        if matches_challenge_pattern(&text) {
            out.push(text);
        }

        if element.is_form() {
            out.extend(
                element
                    .fields()
                    .into_iter()
                    .filter(|f| is_challenge_field(f.name()) && !f.value().is_empty())
                    .map(|f| f.value().to_string()),
            );
        }
        out
    }

    fn check_content(&self, element: &Element) -> bool {
        matches_challenge_pattern(&element.text_content())
    }

    fn check_attributes(&self, element: &Element) -> bool {
        CHALLENGE_ATTRIBUTES
            .iter()
            .filter_map(|a| element.attr(a))
            .any(|v| !v.is_empty() && matches_challenge_pattern(v))
    }

    fn check_form_fields(&self, element: &Element) -> bool {
        element.is_form()
            && element.fields().into_iter().any(|f| {
                is_challenge_field(f.name()) || matches_challenge_pattern(f.value())
            })
    }
}
