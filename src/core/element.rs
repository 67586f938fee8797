//! Purpose: Shared element model: base properties, the element trait, and the
//! generic parse delegation routine.
//! Exports: `CardElement`, `BaseElementProps`, `Spacing`, `HeightType`, `Fallback`,
//! `from_json`.
//! Role: Platform-agnostic core the public wrappers and the ABI delegate to.
//! Invariants: A failed parse returns Err and commits no partial element.
//! Invariants: Warnings collected before a failure survive it (no rollback).

use std::any::Any;
use std::fmt;

use serde_json::{Map, Value, json};

use crate::core::context::ParseContext;
use crate::core::error::{Error, ErrorKind};
use crate::core::fields;
use crate::core::registry::{ActionParserRegistry, ElementParser, ElementParserRegistry};
use crate::core::warnings::{ParseWarning, WarningCode};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Spacing {
    Default,
    None,
    Small,
    Medium,
    Large,
    ExtraLarge,
    Padding,
}

impl Spacing {
    pub fn as_str(self) -> &'static str {
        match self {
            Spacing::Default => "default",
            Spacing::None => "none",
            Spacing::Small => "small",
            Spacing::Medium => "medium",
            Spacing::Large => "large",
            Spacing::ExtraLarge => "extraLarge",
            Spacing::Padding => "padding",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let all = [
            Spacing::Default,
            Spacing::None,
            Spacing::Small,
            Spacing::Medium,
            Spacing::Large,
            Spacing::ExtraLarge,
            Spacing::Padding,
        ];
        all.into_iter()
            .find(|spacing| spacing.as_str().eq_ignore_ascii_case(raw))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HeightType {
    Auto,
    Stretch,
}

impl HeightType {
    pub fn as_str(self) -> &'static str {
        match self {
            HeightType::Auto => "auto",
            HeightType::Stretch => "stretch",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        [HeightType::Auto, HeightType::Stretch]
            .into_iter()
            .find(|height| height.as_str().eq_ignore_ascii_case(raw))
    }
}

/// Degradation target when a host cannot render the element itself.
#[derive(Debug)]
pub enum Fallback {
    None,
    Drop,
    Content(Box<dyn CardElement>),
}

#[derive(Debug)]
pub struct BaseElementProps {
    pub id: String,
    pub spacing: Spacing,
    pub separator: bool,
    pub height: HeightType,
    pub is_visible: bool,
    pub fallback: Fallback,
}

impl BaseElementProps {
    pub(crate) fn from_json(
        ctx: &mut ParseContext<'_>,
        obj: &Map<String, Value>,
    ) -> Result<Self, Error> {
        let id = fields::get_string(obj, "id")?;
        let spacing = match fields::get_str(obj, "spacing")? {
            None => Spacing::Default,
            Some(raw) => Spacing::parse(raw).ok_or_else(|| {
                Error::new(ErrorKind::Schema)
                    .with_message(format!("unknown spacing {raw}"))
                    .with_field("spacing")
            })?,
        };
        let separator = fields::get_bool(obj, "separator", false)?;
        let height = match fields::get_str(obj, "height")? {
            None => HeightType::Auto,
            Some(raw) => HeightType::parse(raw).ok_or_else(|| {
                Error::new(ErrorKind::Schema)
                    .with_message(format!("unknown height {raw}"))
                    .with_field("height")
            })?,
        };
        let is_visible = fields::get_bool(obj, "isVisible", true)?;
        let fallback = parse_fallback(ctx, obj)?;
        Ok(Self {
            id,
            spacing,
            separator,
            height,
            is_visible,
            fallback,
        })
    }

    pub(crate) fn write_json(&self, map: &mut Map<String, Value>) {
        if !self.id.is_empty() {
            map.insert("id".to_string(), json!(self.id));
        }
        if self.spacing != Spacing::Default {
            map.insert("spacing".to_string(), json!(self.spacing.as_str()));
        }
        if self.separator {
            map.insert("separator".to_string(), json!(true));
        }
        if self.height != HeightType::Auto {
            map.insert("height".to_string(), json!(self.height.as_str()));
        }
        if !self.is_visible {
            map.insert("isVisible".to_string(), json!(false));
        }
        match &self.fallback {
            Fallback::None => {}
            Fallback::Drop => {
                map.insert("fallback".to_string(), json!("drop"));
            }
            Fallback::Content(element) => {
                map.insert("fallback".to_string(), element.to_json());
            }
        }
    }
}

fn parse_fallback(ctx: &mut ParseContext<'_>, obj: &Map<String, Value>) -> Result<Fallback, Error> {
    match obj.get("fallback") {
        None | Some(Value::Null) => Ok(Fallback::None),
        Some(Value::String(mode)) if mode.eq_ignore_ascii_case("drop") => Ok(Fallback::Drop),
        Some(Value::String(other)) => Err(Error::new(ErrorKind::Schema)
            .with_message(format!("unknown fallback mode {other}"))
            .with_field("fallback")),
        Some(node @ Value::Object(inner)) => {
            let declared = inner.get("type").and_then(Value::as_str);
            match declared {
                Some(element_type) if ctx.elements().get(element_type).is_none() => {
                    // Fallback exists for graceful degradation, so an
                    // unregistered type degrades to Drop instead of failing.
                    ctx.warn(
                        WarningCode::UnknownElementType,
                        format!("no parser registered for fallback type {element_type}"),
                    );
                    tracing::warn!(element_type, "dropping fallback with unregistered type");
                    Ok(Fallback::Drop)
                }
                _ => Ok(Fallback::Content(ctx.parse_element(node)?)),
            }
        }
        Some(_) => Err(Error::new(ErrorKind::Schema)
            .with_message("fallback must be \"drop\" or an element object")
            .with_field("fallback")),
    }
}

pub trait CardElement: Any + fmt::Debug + Send + Sync {
    fn element_type(&self) -> &'static str;
    fn base(&self) -> &BaseElementProps;
    fn to_json(&self) -> Value;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// Generic parse delegation shared by every boundary-facing wrapper.
///
/// Parameterized by the three cooperating types: the internal model `M`,
/// the public wrapper `W`, and the type-specific parser `P`. All inputs are
/// passed through unchanged; warnings collected by the parse are appended to
/// `warnings` whether or not the parse succeeds.
pub(crate) fn from_json<M, W, P>(
    json: &Value,
    elements: &ElementParserRegistry,
    actions: &ActionParserRegistry,
    warnings: &mut Vec<ParseWarning>,
) -> Result<W, Error>
where
    M: CardElement,
    W: From<Box<M>>,
    P: ElementParser + Default,
{
    let mut ctx = ParseContext::new(elements, actions);
    let outcome = P::default().deserialize(&mut ctx, json);
    warnings.extend(ctx.take_warnings());
    let element = outcome?;
    let model = element.into_any().downcast::<M>().map_err(|_| {
        Error::new(ErrorKind::Internal).with_message("parser produced an unexpected element type")
    })?;
    Ok(W::from(model))
}
