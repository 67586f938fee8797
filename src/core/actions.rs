//! Purpose: Action model and the built-in open-url action.
//! Exports: `CardAction`, `OpenUrlAction`, `OpenUrlActionParser`.
//! Role: Minimal concrete action so the action registry contract is real;
//! further actions follow the same shape.
//! Invariants: Required action fields fail the parse; nothing partial is returned.

use std::any::Any;
use std::fmt;

use serde_json::{Map, Value, json};

use crate::core::context::ParseContext;
use crate::core::error::Error;
use crate::core::fields;
use crate::core::registry::ActionParser;

pub trait CardAction: Any + fmt::Debug + Send + Sync {
    fn action_type(&self) -> &'static str;
    fn title(&self) -> &str;
    fn to_json(&self) -> Value;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OpenUrlAction {
    pub title: String,
    pub url: String,
}

impl OpenUrlAction {
    pub const TYPE: &'static str = "Action.OpenUrl";
}

impl CardAction for OpenUrlAction {
    fn action_type(&self) -> &'static str {
        Self::TYPE
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".to_string(), json!(Self::TYPE));
        if !self.title.is_empty() {
            map.insert("title".to_string(), json!(self.title));
        }
        map.insert("url".to_string(), json!(self.url));
        Value::Object(map)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

#[derive(Debug, Default)]
pub struct OpenUrlActionParser;

impl ActionParser for OpenUrlActionParser {
    fn deserialize(
        &self,
        _ctx: &mut ParseContext<'_>,
        json: &Value,
    ) -> Result<Box<dyn CardAction>, Error> {
        let obj = fields::require_object(json)?;
        fields::require_type(obj, OpenUrlAction::TYPE)?;
        let url = fields::require_string(obj, "url")?;
        let title = fields::get_string(obj, "title")?;
        Ok(Box::new(OpenUrlAction { title, url }))
    }
}
