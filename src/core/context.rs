//! Purpose: Per-parse state shared by element and action parsers.
//! Exports: `ParseContext`.
//! Role: Carries the parser registries and the append-only warning sequence.
//! Invariants: Warnings are append-only; a failing parse never removes them.
//! Invariants: The context never mutates the registries or the input JSON.

use serde_json::Value;

use crate::core::actions::CardAction;
use crate::core::element::CardElement;
use crate::core::error::{Error, ErrorKind};
use crate::core::fields;
use crate::core::registry::{ActionParserRegistry, ElementParserRegistry};
use crate::core::warnings::{ParseWarning, WarningCode};

pub struct ParseContext<'a> {
    elements: &'a ElementParserRegistry,
    actions: &'a ActionParserRegistry,
    warnings: Vec<ParseWarning>,
}

impl<'a> ParseContext<'a> {
    pub fn new(elements: &'a ElementParserRegistry, actions: &'a ActionParserRegistry) -> Self {
        Self {
            elements,
            actions,
            warnings: Vec::new(),
        }
    }

    pub fn elements(&self) -> &ElementParserRegistry {
        self.elements
    }

    pub fn actions(&self) -> &ActionParserRegistry {
        self.actions
    }

    pub fn warn(&mut self, code: WarningCode, message: impl Into<String>) {
        self.warnings.push(ParseWarning::new(code, message));
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    pub(crate) fn take_warnings(&mut self) -> Vec<ParseWarning> {
        std::mem::take(&mut self.warnings)
    }

    /// Dispatch one element node through the element registry.
    pub fn parse_element(&mut self, json: &Value) -> Result<Box<dyn CardElement>, Error> {
        let obj = fields::require_object(json)?;
        let element_type = obj.get("type").and_then(Value::as_str).ok_or_else(|| {
            Error::new(ErrorKind::Schema)
                .with_message("missing type discriminator")
                .with_field("type")
        })?;
        let parser = self.elements.get(element_type).ok_or_else(|| {
            Error::new(ErrorKind::NotFound)
                .with_message(format!("no element parser registered for type {element_type}"))
                .with_element_type(element_type)
        })?;
        tracing::debug!(element_type, "dispatching element parser");
        parser.deserialize(self, json)
    }

    /// Dispatch one action node through the action registry.
    pub fn parse_action(&mut self, json: &Value) -> Result<Box<dyn CardAction>, Error> {
        let obj = fields::require_object(json)?;
        let action_type = obj.get("type").and_then(Value::as_str).ok_or_else(|| {
            Error::new(ErrorKind::Schema)
                .with_message("missing type discriminator")
                .with_field("type")
        })?;
        let parser = self.actions.get(action_type).ok_or_else(|| {
            Error::new(ErrorKind::NotFound)
                .with_message(format!("no action parser registered for type {action_type}"))
                .with_element_type(action_type)
        })?;
        tracing::debug!(action_type, "dispatching action parser");
        parser.deserialize(self, json)
    }
}
