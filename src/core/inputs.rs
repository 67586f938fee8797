//! Purpose: Input element model: shared input properties and the choice set input.
//! Exports: `InputProps`, `Choice`, `ChoiceSetInput`, `ChoiceSetStyle`,
//! `ChoiceSetInputParser`.
//! Role: The concrete element this crate parses; further inputs follow the same shape.
//! Invariants: Missing required choice fields fail the parse; advisory issues
//! become warnings instead.
//! Invariants: Serialization omits properties left at their defaults.

use std::any::Any;

use serde_json::{Map, Value, json};

use crate::core::context::ParseContext;
use crate::core::element::{BaseElementProps, CardElement};
use crate::core::error::{Error, ErrorKind};
use crate::core::fields;
use crate::core::registry::ElementParser;
use crate::core::warnings::WarningCode;

#[derive(Debug, Default)]
pub struct InputProps {
    pub label: String,
    pub is_required: bool,
    pub error_message: String,
}

impl InputProps {
    pub(crate) fn from_json(
        ctx: &mut ParseContext<'_>,
        obj: &Map<String, Value>,
    ) -> Result<Self, Error> {
        let label = fields::get_string(obj, "label")?;
        let is_required = fields::get_bool(obj, "isRequired", false)?;
        let error_message = fields::get_string(obj, "errorMessage")?;
        if is_required && error_message.is_empty() {
            ctx.warn(
                WarningCode::MissingInputErrorMessage,
                "required input has no errorMessage",
            );
        }
        Ok(Self {
            label,
            is_required,
            error_message,
        })
    }

    pub(crate) fn write_json(&self, map: &mut Map<String, Value>) {
        if !self.label.is_empty() {
            map.insert("label".to_string(), json!(self.label));
        }
        if self.is_required {
            map.insert("isRequired".to_string(), json!(true));
        }
        if !self.error_message.is_empty() {
            map.insert("errorMessage".to_string(), json!(self.error_message));
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChoiceSetStyle {
    Compact,
    Expanded,
    Filtered,
}

impl ChoiceSetStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            ChoiceSetStyle::Compact => "compact",
            ChoiceSetStyle::Expanded => "expanded",
            ChoiceSetStyle::Filtered => "filtered",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        [
            ChoiceSetStyle::Compact,
            ChoiceSetStyle::Expanded,
            ChoiceSetStyle::Filtered,
        ]
        .into_iter()
        .find(|style| style.as_str().eq_ignore_ascii_case(raw))
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Choice {
    pub title: String,
    pub value: String,
}

impl Choice {
    fn from_json(json: &Value) -> Result<Self, Error> {
        let obj = json.as_object().ok_or_else(|| {
            Error::new(ErrorKind::Schema)
                .with_message("choices entries must be objects")
                .with_field("choices")
        })?;
        let title = fields::require_string(obj, "title")?;
        let value = fields::require_string(obj, "value")?;
        Ok(Self { title, value })
    }

    fn to_json(&self) -> Value {
        json!({ "title": self.title, "value": self.value })
    }
}

#[derive(Debug)]
pub struct ChoiceSetInput {
    pub base: BaseElementProps,
    pub input: InputProps,
    pub choices: Vec<Choice>,
    pub is_multi_select: bool,
    pub style: ChoiceSetStyle,
    pub value: String,
    pub wrap: bool,
    pub placeholder: String,
}

impl ChoiceSetInput {
    pub const TYPE: &'static str = "Input.ChoiceSet";

    /// Selections named by `value`: split on commas for multi-select,
    /// the whole string otherwise.
    pub fn selected_values(&self) -> Vec<&str> {
        if self.value.is_empty() {
            return Vec::new();
        }
        if self.is_multi_select {
            self.value
                .split(',')
                .filter(|selection| !selection.is_empty())
                .collect()
        } else {
            vec![self.value.as_str()]
        }
    }
}

impl CardElement for ChoiceSetInput {
    fn element_type(&self) -> &'static str {
        Self::TYPE
    }

    fn base(&self) -> &BaseElementProps {
        &self.base
    }

    fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".to_string(), json!(Self::TYPE));
        self.base.write_json(&mut map);
        self.input.write_json(&mut map);
        map.insert(
            "choices".to_string(),
            Value::Array(self.choices.iter().map(Choice::to_json).collect()),
        );
        if self.is_multi_select {
            map.insert("isMultiSelect".to_string(), json!(true));
        }
        if self.style != ChoiceSetStyle::Compact {
            map.insert("style".to_string(), json!(self.style.as_str()));
        }
        if !self.value.is_empty() {
            map.insert("value".to_string(), json!(self.value));
        }
        if self.wrap {
            map.insert("wrap".to_string(), json!(true));
        }
        if !self.placeholder.is_empty() {
            map.insert("placeholder".to_string(), json!(self.placeholder));
        }
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
pub struct ChoiceSetInputParser;

impl ElementParser for ChoiceSetInputParser {
    fn deserialize(
        &self,
        ctx: &mut ParseContext<'_>,
        json: &Value,
    ) -> Result<Box<dyn CardElement>, Error> {
        let obj = fields::require_object(json)?;
        fields::require_type(obj, ChoiceSetInput::TYPE)?;
        let base = BaseElementProps::from_json(ctx, obj)?;
        let input = InputProps::from_json(ctx, obj)?;
        let choices = match fields::get_array(obj, "choices")? {
            None => Vec::new(),
            Some(items) => items
                .iter()
                .map(Choice::from_json)
                .collect::<Result<Vec<_>, Error>>()?,
        };
        let style = match fields::get_str(obj, "style")? {
            None => ChoiceSetStyle::Compact,
            Some(raw) => ChoiceSetStyle::parse(raw).ok_or_else(|| {
                Error::new(ErrorKind::Schema)
                    .with_message(format!("unknown choice set style {raw}"))
                    .with_field("style")
            })?,
        };
        let is_multi_select = fields::get_bool(obj, "isMultiSelect", false)?;
        let value = fields::get_string(obj, "value")?;
        let wrap = fields::get_bool(obj, "wrap", false)?;
        let placeholder = fields::get_string(obj, "placeholder")?;

        let element = ChoiceSetInput {
            base,
            input,
            choices,
            is_multi_select,
            style,
            value,
            wrap,
            placeholder,
        };
        warn_on_unmatched_selections(ctx, &element);
        Ok(Box::new(element))
    }
}

fn warn_on_unmatched_selections(ctx: &mut ParseContext<'_>, element: &ChoiceSetInput) {
    for selection in element.selected_values() {
        let known = element
            .choices
            .iter()
            .any(|choice| choice.value == selection);
        if !known {
            ctx.warn(
                WarningCode::InvalidValue,
                format!("value {selection} does not match any choice"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChoiceSetInput, ChoiceSetInputParser, ChoiceSetStyle};
    use crate::core::context::ParseContext;
    use crate::core::element::CardElement;
    use crate::core::error::{Error, ErrorKind};
    use crate::core::registry::{ActionParserRegistry, ElementParser, ElementParserRegistry};
    use crate::core::warnings::WarningCode;
    use serde_json::{Value, json};

    fn parse(value: Value) -> (Result<Box<dyn CardElement>, Error>, Vec<String>) {
        let elements = ElementParserRegistry::new();
        let actions = ActionParserRegistry::new();
        let mut ctx = ParseContext::new(&elements, &actions);
        let outcome = ChoiceSetInputParser.deserialize(&mut ctx, &value);
        let codes = ctx
            .warnings()
            .iter()
            .map(|warning| warning.code.label().to_string())
            .collect();
        (outcome, codes)
    }

    fn parse_ok(value: Value) -> Box<ChoiceSetInput> {
        let (outcome, _) = parse(value);
        outcome
            .expect("parse")
            .into_any()
            .downcast::<ChoiceSetInput>()
            .expect("choice set")
    }

    #[test]
    fn full_property_set_parses() {
        let element = parse_ok(json!({
            "type": "Input.ChoiceSet",
            "id": "pick",
            "label": "Pick one",
            "isRequired": true,
            "errorMessage": "Pick something",
            "choices": [
                {"title": "Red", "value": "r"},
                {"title": "Green", "value": "g"}
            ],
            "isMultiSelect": true,
            "style": "expanded",
            "value": "r,g",
            "wrap": true,
            "placeholder": "Colors"
        }));
        assert_eq!(element.base.id, "pick");
        assert_eq!(element.input.label, "Pick one");
        assert!(element.input.is_required);
        assert_eq!(element.choices.len(), 2);
        assert!(element.is_multi_select);
        assert_eq!(element.style, ChoiceSetStyle::Expanded);
        assert_eq!(element.selected_values(), vec!["r", "g"]);
        assert!(element.wrap);
        assert_eq!(element.placeholder, "Colors");
    }

    #[test]
    fn missing_choices_means_empty() {
        let element = parse_ok(json!({"type": "Input.ChoiceSet"}));
        assert!(element.choices.is_empty());
        assert_eq!(element.style, ChoiceSetStyle::Compact);
        assert!(!element.is_multi_select);
    }

    #[test]
    fn choices_must_be_an_array() {
        let (outcome, _) = parse(json!({
            "type": "Input.ChoiceSet",
            "choices": "not-an-array"
        }));
        let err = outcome.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert_eq!(err.field(), Some("choices"));
    }

    #[test]
    fn choice_entries_require_title_and_value() {
        let (outcome, _) = parse(json!({
            "type": "Input.ChoiceSet",
            "choices": [{"title": "Red"}]
        }));
        let err = outcome.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert_eq!(err.field(), Some("value"));

        let (outcome, _) = parse(json!({
            "type": "Input.ChoiceSet",
            "choices": ["red"]
        }));
        assert!(outcome.is_err());
    }

    #[test]
    fn unknown_style_fails() {
        let (outcome, _) = parse(json!({
            "type": "Input.ChoiceSet",
            "style": "fancy"
        }));
        let err = outcome.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert_eq!(err.field(), Some("style"));
    }

    #[test]
    fn required_input_without_error_message_warns() {
        let (outcome, codes) = parse(json!({
            "type": "Input.ChoiceSet",
            "isRequired": true
        }));
        assert!(outcome.is_ok());
        assert_eq!(codes, vec!["missing-input-error-message"]);

        let (outcome, codes) = parse(json!({
            "type": "Input.ChoiceSet",
            "isRequired": true,
            "errorMessage": "Pick something"
        }));
        assert!(outcome.is_ok());
        assert!(codes.is_empty());
    }

    #[test]
    fn unmatched_selection_warns() {
        let (outcome, codes) = parse(json!({
            "type": "Input.ChoiceSet",
            "choices": [{"title": "Red", "value": "r"}],
            "value": "g"
        }));
        assert!(outcome.is_ok());
        assert_eq!(codes, vec!["invalid-value"]);

        // Multi-select checks each comma-separated selection.
        let (outcome, codes) = parse(json!({
            "type": "Input.ChoiceSet",
            "isMultiSelect": true,
            "choices": [{"title": "Red", "value": "r"}],
            "value": "r,g"
        }));
        assert!(outcome.is_ok());
        assert_eq!(codes, vec!["invalid-value"]);
    }

    #[test]
    fn warnings_survive_a_later_failure() {
        let elements = ElementParserRegistry::new();
        let actions = ActionParserRegistry::new();
        let mut ctx = ParseContext::new(&elements, &actions);
        let outcome = ChoiceSetInputParser.deserialize(
            &mut ctx,
            &json!({
                "type": "Input.ChoiceSet",
                "isRequired": true,
                "choices": "not-an-array"
            }),
        );
        assert!(outcome.is_err());
        assert_eq!(ctx.warnings().len(), 1);
        assert_eq!(
            ctx.warnings()[0].code,
            WarningCode::MissingInputErrorMessage
        );
    }

    #[test]
    fn wrong_type_discriminator_fails() {
        let (outcome, _) = parse(json!({"type": "Input.Text"}));
        let err = outcome.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert_eq!(err.element_type(), Some("Input.Text"));
    }

    #[test]
    fn serialization_omits_defaults() {
        let element = parse_ok(json!({
            "type": "Input.ChoiceSet",
            "choices": [{"title": "Red", "value": "r"}]
        }));
        let value = element.to_json();
        assert_eq!(value["type"], "Input.ChoiceSet");
        assert_eq!(value["choices"][0]["value"], "r");
        assert!(value.get("style").is_none());
        assert!(value.get("isMultiSelect").is_none());
        assert!(value.get("wrap").is_none());
    }

    #[test]
    fn serialization_round_trips_set_properties() {
        let input = json!({
            "type": "Input.ChoiceSet",
            "id": "pick",
            "label": "Pick",
            "isRequired": true,
            "errorMessage": "Pick something",
            "choices": [{"title": "Red", "value": "r"}],
            "isMultiSelect": true,
            "style": "filtered",
            "value": "r",
            "wrap": true,
            "placeholder": "Colors"
        });
        let element = parse_ok(input.clone());
        assert_eq!(element.to_json(), input);
    }
}
