//! Purpose: Parser registries mapping type discriminators to parse capabilities.
//! Exports: `ElementParser`, `ActionParser`, `ElementParserRegistry`, `ActionParserRegistry`.
//! Role: Lookup seam the parse context dispatches through; callers may extend it.
//! Invariants: Built-in registrations cannot be replaced or removed.
//! Invariants: Registries are read-only during a parse.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::core::actions::{CardAction, OpenUrlAction, OpenUrlActionParser};
use crate::core::context::ParseContext;
use crate::core::element::CardElement;
use crate::core::error::{Error, ErrorKind};
use crate::core::inputs::{ChoiceSetInput, ChoiceSetInputParser};

pub trait ElementParser: Send + Sync {
    fn deserialize(
        &self,
        ctx: &mut ParseContext<'_>,
        json: &Value,
    ) -> Result<Box<dyn CardElement>, Error>;
}

pub trait ActionParser: Send + Sync {
    fn deserialize(
        &self,
        ctx: &mut ParseContext<'_>,
        json: &Value,
    ) -> Result<Box<dyn CardAction>, Error>;
}

fn is_built_in_element(element_type: &str) -> bool {
    element_type == ChoiceSetInput::TYPE
}

fn is_built_in_action(action_type: &str) -> bool {
    action_type == OpenUrlAction::TYPE
}

pub struct ElementParserRegistry {
    parsers: HashMap<String, Arc<dyn ElementParser>>,
}

impl ElementParserRegistry {
    pub fn new() -> Self {
        let mut parsers: HashMap<String, Arc<dyn ElementParser>> = HashMap::new();
        parsers.insert(
            ChoiceSetInput::TYPE.to_string(),
            Arc::new(ChoiceSetInputParser),
        );
        Self { parsers }
    }

    pub fn register(
        &mut self,
        element_type: impl Into<String>,
        parser: Arc<dyn ElementParser>,
    ) -> Result<(), Error> {
        let element_type = element_type.into();
        if is_built_in_element(&element_type) {
            return Err(Error::new(ErrorKind::Usage)
                .with_message(format!(
                    "cannot replace built-in parser for {element_type}"
                ))
                .with_element_type(element_type));
        }
        self.parsers.insert(element_type, parser);
        Ok(())
    }

    pub fn remove(&mut self, element_type: &str) -> Result<(), Error> {
        if is_built_in_element(element_type) {
            return Err(Error::new(ErrorKind::Usage)
                .with_message(format!("cannot remove built-in parser for {element_type}"))
                .with_element_type(element_type));
        }
        self.parsers.remove(element_type);
        Ok(())
    }

    pub fn get(&self, element_type: &str) -> Option<Arc<dyn ElementParser>> {
        self.parsers.get(element_type).cloned()
    }
}

impl Default for ElementParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ActionParserRegistry {
    parsers: HashMap<String, Arc<dyn ActionParser>>,
}

impl ActionParserRegistry {
    pub fn new() -> Self {
        let mut parsers: HashMap<String, Arc<dyn ActionParser>> = HashMap::new();
        parsers.insert(
            OpenUrlAction::TYPE.to_string(),
            Arc::new(OpenUrlActionParser),
        );
        Self { parsers }
    }

    pub fn register(
        &mut self,
        action_type: impl Into<String>,
        parser: Arc<dyn ActionParser>,
    ) -> Result<(), Error> {
        let action_type = action_type.into();
        if is_built_in_action(&action_type) {
            return Err(Error::new(ErrorKind::Usage)
                .with_message(format!("cannot replace built-in parser for {action_type}"))
                .with_element_type(action_type));
        }
        self.parsers.insert(action_type, parser);
        Ok(())
    }

    pub fn remove(&mut self, action_type: &str) -> Result<(), Error> {
        if is_built_in_action(action_type) {
            return Err(Error::new(ErrorKind::Usage)
                .with_message(format!("cannot remove built-in parser for {action_type}"))
                .with_element_type(action_type));
        }
        self.parsers.remove(action_type);
        Ok(())
    }

    pub fn get(&self, action_type: &str) -> Option<Arc<dyn ActionParser>> {
        self.parsers.get(action_type).cloned()
    }
}

impl Default for ActionParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct NullElementParser;

    impl ElementParser for NullElementParser {
        fn deserialize(
            &self,
            ctx: &mut ParseContext<'_>,
            json: &Value,
        ) -> Result<Box<dyn CardElement>, Error> {
            ChoiceSetInputParser.deserialize(ctx, json)
        }
    }

    #[test]
    fn default_registry_resolves_built_ins() {
        let elements = ElementParserRegistry::new();
        assert!(elements.get(ChoiceSetInput::TYPE).is_some());
        assert!(elements.get("Mystery.Widget").is_none());

        let actions = ActionParserRegistry::new();
        assert!(actions.get(OpenUrlAction::TYPE).is_some());
    }

    #[test]
    fn built_in_entries_are_protected() {
        let mut elements = ElementParserRegistry::new();
        let err = elements
            .register(ChoiceSetInput::TYPE, Arc::new(NullElementParser))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        let err = elements.remove(ChoiceSetInput::TYPE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert!(elements.get(ChoiceSetInput::TYPE).is_some());
    }

    #[test]
    fn custom_entries_can_be_registered_and_removed() {
        let mut elements = ElementParserRegistry::new();
        elements
            .register("Custom.Widget", Arc::new(NullElementParser))
            .expect("register custom");
        assert!(elements.get("Custom.Widget").is_some());
        elements.remove("Custom.Widget").expect("remove custom");
        assert!(elements.get("Custom.Widget").is_none());
    }

    #[test]
    fn removing_unknown_types_is_a_no_op() {
        let mut elements = ElementParserRegistry::new();
        elements.remove("Never.Registered").expect("no-op remove");
    }
}
