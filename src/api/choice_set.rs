//! Purpose: Public wrapper for parsed choice set input elements.
//! Exports: `ChoiceSetInputElement`.
//! Role: Boundary-facing element handle produced by `from_json`.
//! Invariants: A handle always wraps a fully parsed element; no partial state.

use serde_json::Value;

use crate::core::element::{self, CardElement};
use crate::core::error::Error;
use crate::core::inputs::{Choice, ChoiceSetInput, ChoiceSetInputParser, ChoiceSetStyle};
use crate::core::registry::{ActionParserRegistry, ElementParserRegistry};
use crate::core::warnings::ParseWarning;

#[derive(Debug)]
pub struct ChoiceSetInputElement {
    inner: Box<ChoiceSetInput>,
}

impl From<Box<ChoiceSetInput>> for ChoiceSetInputElement {
    fn from(inner: Box<ChoiceSetInput>) -> Self {
        Self { inner }
    }
}

impl ChoiceSetInputElement {
    /// Parse one choice set input element from a JSON node.
    ///
    /// Delegates to the shared parse routine, passing the registries and the
    /// warning sink through unchanged. Warnings appended before a failure stay
    /// in `warnings`; on failure no element is produced.
    pub fn from_json(
        json: &Value,
        elements: &ElementParserRegistry,
        actions: &ActionParserRegistry,
        warnings: &mut Vec<ParseWarning>,
    ) -> Result<Self, Error> {
        element::from_json::<ChoiceSetInput, Self, ChoiceSetInputParser>(
            json, elements, actions, warnings,
        )
    }

    pub fn id(&self) -> &str {
        &self.inner.base.id
    }

    pub fn label(&self) -> &str {
        &self.inner.input.label
    }

    pub fn is_required(&self) -> bool {
        self.inner.input.is_required
    }

    pub fn error_message(&self) -> &str {
        &self.inner.input.error_message
    }

    pub fn choices(&self) -> &[Choice] {
        &self.inner.choices
    }

    pub fn is_multi_select(&self) -> bool {
        self.inner.is_multi_select
    }

    pub fn style(&self) -> ChoiceSetStyle {
        self.inner.style
    }

    pub fn value(&self) -> &str {
        self.inner.value.as_str()
    }

    pub fn selected_values(&self) -> Vec<&str> {
        self.inner.selected_values()
    }

    pub fn wrap(&self) -> bool {
        self.inner.wrap
    }

    pub fn placeholder(&self) -> &str {
        &self.inner.placeholder
    }

    pub fn to_json(&self) -> Value {
        self.inner.to_json()
    }

    pub fn into_element(self) -> Box<dyn CardElement> {
        self.inner
    }
}

impl ChoiceSetInputParser {
    /// Boundary-facing parse operation: forwards all five inputs to the
    /// shared routine unchanged. Equivalent to
    /// [`ChoiceSetInputElement::from_json`]; the receiver carries no state.
    pub fn parse_from_json(
        &self,
        json: &Value,
        elements: &ElementParserRegistry,
        actions: &ActionParserRegistry,
        warnings: &mut Vec<ParseWarning>,
    ) -> Result<ChoiceSetInputElement, Error> {
        ChoiceSetInputElement::from_json(json, elements, actions, warnings)
    }
}
