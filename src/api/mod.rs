//! Purpose: Define the stable public Rust API boundary for Placard.
//! Exports: Element model, registries, warnings, errors, and parse entrypoints.
//! Role: Public, additive-only surface; hides internal core modules.
//! Invariants: This module is the only public path to the core element model.
//! Invariants: Internal modules remain private and are not directly exposed.

mod choice_set;

#[doc(hidden)]
pub use crate::core::error::to_exit_code;

pub use crate::core::actions::{CardAction, OpenUrlAction, OpenUrlActionParser};
pub use crate::core::context::ParseContext;
pub use crate::core::element::{BaseElementProps, CardElement, Fallback, HeightType, Spacing};
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::inputs::{
    Choice, ChoiceSetInput, ChoiceSetInputParser, ChoiceSetStyle, InputProps,
};
pub use crate::core::registry::{
    ActionParser, ActionParserRegistry, ElementParser, ElementParserRegistry,
};
pub use crate::core::warnings::{ParseWarning, WarningCode, warning_json, warnings_json};
pub use choice_set::ChoiceSetInputElement;
