//! Purpose: C ABI bridge for bindings (libplacard).
//! Exports: C-callable registry/warnings/parser functions and buffer/error helpers.
//! Role: Stable ABI surface for non-Rust bindings in v0.
//! Invariants: JSON bytes in; opaque handles out; explicit free functions.
//! Invariants: Error kinds map 1:1 with core error kinds.
//! Invariants: Out-pointers are written once on success and untouched on failure.
#![allow(clippy::result_large_err)]
#![allow(non_camel_case_types)]

use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use serde_json::Value;

use crate::api::{
    ActionParserRegistry, CardElement, ChoiceSetInputParser, ElementParserRegistry, Error,
    ErrorKind, ParseWarning, warnings_json,
};

#[repr(C)]
pub struct plcd_element_registry {
    registry: ElementParserRegistry,
}

#[repr(C)]
pub struct plcd_action_registry {
    registry: ActionParserRegistry,
}

#[repr(C)]
pub struct plcd_warnings {
    warnings: Vec<ParseWarning>,
}

#[repr(C)]
pub struct plcd_choice_set_parser {
    parser: ChoiceSetInputParser,
}

#[repr(C)]
pub struct plcd_element {
    element: Box<dyn CardElement>,
}

#[repr(C)]
pub struct plcd_buf {
    pub data: *mut u8,
    pub len: usize,
}

#[repr(C)]
pub struct plcd_error {
    pub kind: i32,
    pub message: *mut c_char,
    pub field: *mut c_char,
    pub element_type: *mut c_char,
}

#[unsafe(no_mangle)]
pub extern "C" fn plcd_element_registry_new(
    out_registry: *mut *mut plcd_element_registry,
    out_err: *mut *mut plcd_error,
) -> i32 {
    if out_registry.is_null() {
        return fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("out_registry is null"),
        );
    }
    let handle = Box::new(plcd_element_registry {
        registry: ElementParserRegistry::new(),
    });
    unsafe {
        *out_registry = Box::into_raw(handle);
    }
    0
}

#[unsafe(no_mangle)]
pub extern "C" fn plcd_element_registry_free(registry: *mut plcd_element_registry) {
    if registry.is_null() {
        return;
    }
    unsafe {
        drop(Box::from_raw(registry));
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn plcd_action_registry_new(
    out_registry: *mut *mut plcd_action_registry,
    out_err: *mut *mut plcd_error,
) -> i32 {
    if out_registry.is_null() {
        return fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("out_registry is null"),
        );
    }
    let handle = Box::new(plcd_action_registry {
        registry: ActionParserRegistry::new(),
    });
    unsafe {
        *out_registry = Box::into_raw(handle);
    }
    0
}

#[unsafe(no_mangle)]
pub extern "C" fn plcd_action_registry_free(registry: *mut plcd_action_registry) {
    if registry.is_null() {
        return;
    }
    unsafe {
        drop(Box::from_raw(registry));
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn plcd_warnings_new(
    out_warnings: *mut *mut plcd_warnings,
    out_err: *mut *mut plcd_error,
) -> i32 {
    if out_warnings.is_null() {
        return fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("out_warnings is null"),
        );
    }
    let handle = Box::new(plcd_warnings {
        warnings: Vec::new(),
    });
    unsafe {
        *out_warnings = Box::into_raw(handle);
    }
    0
}

#[unsafe(no_mangle)]
pub extern "C" fn plcd_warnings_free(warnings: *mut plcd_warnings) {
    if warnings.is_null() {
        return;
    }
    unsafe {
        drop(Box::from_raw(warnings));
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn plcd_warnings_len(warnings: *const plcd_warnings) -> u64 {
    if warnings.is_null() {
        return 0;
    }
    unsafe { (*warnings).warnings.len() as u64 }
}

#[unsafe(no_mangle)]
pub extern "C" fn plcd_warnings_json(
    warnings: *mut plcd_warnings,
    out_buf: *mut plcd_buf,
    out_err: *mut *mut plcd_error,
) -> i32 {
    let warnings = match borrow_warnings(warnings, out_err) {
        Ok(warnings) => warnings,
        Err(code) => return code,
    };
    let value = warnings_json(&warnings.warnings);
    if let Err(err) = write_json_buf(out_buf, &value) {
        return fail(out_err, err);
    }
    0
}

#[unsafe(no_mangle)]
pub extern "C" fn plcd_choice_set_parser_new(
    out_parser: *mut *mut plcd_choice_set_parser,
    out_err: *mut *mut plcd_error,
) -> i32 {
    if out_parser.is_null() {
        return fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("out_parser is null"),
        );
    }
    let handle = Box::new(plcd_choice_set_parser {
        parser: ChoiceSetInputParser,
    });
    unsafe {
        *out_parser = Box::into_raw(handle);
    }
    0
}

#[unsafe(no_mangle)]
pub extern "C" fn plcd_choice_set_parser_free(parser: *mut plcd_choice_set_parser) {
    if parser.is_null() {
        return;
    }
    unsafe {
        drop(Box::from_raw(parser));
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn plcd_choice_set_parse_json(
    parser: *mut plcd_choice_set_parser,
    json_bytes: *const u8,
    json_len: usize,
    elements: *mut plcd_element_registry,
    actions: *mut plcd_action_registry,
    warnings: *mut plcd_warnings,
    out_element: *mut *mut plcd_element,
    out_err: *mut *mut plcd_error,
) -> i32 {
    let parser = match borrow_parser(parser, out_err) {
        Ok(parser) => parser,
        Err(code) => return code,
    };
    let elements = match borrow_element_registry(elements, out_err) {
        Ok(elements) => elements,
        Err(code) => return code,
    };
    let actions = match borrow_action_registry(actions, out_err) {
        Ok(actions) => actions,
        Err(code) => return code,
    };
    let warnings = match borrow_warnings(warnings, out_err) {
        Ok(warnings) => warnings,
        Err(code) => return code,
    };
    if out_element.is_null() {
        return fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("out_element is null"),
        );
    }
    let json = match parse_json_bytes(json_bytes, json_len) {
        Ok(json) => json,
        Err(err) => return fail(out_err, err),
    };
    let element = match parser.parser.parse_from_json(
        &json,
        &elements.registry,
        &actions.registry,
        &mut warnings.warnings,
    ) {
        Ok(element) => element,
        Err(err) => return fail(out_err, err),
    };
    let handle = Box::new(plcd_element {
        element: element.into_element(),
    });
    unsafe {
        *out_element = Box::into_raw(handle);
    }
    0
}

#[unsafe(no_mangle)]
pub extern "C" fn plcd_element_json(
    element: *mut plcd_element,
    out_buf: *mut plcd_buf,
    out_err: *mut *mut plcd_error,
) -> i32 {
    let element = match borrow_element(element, out_err) {
        Ok(element) => element,
        Err(code) => return code,
    };
    let value = element.element.to_json();
    if let Err(err) = write_json_buf(out_buf, &value) {
        return fail(out_err, err);
    }
    0
}

#[unsafe(no_mangle)]
pub extern "C" fn plcd_element_free(element: *mut plcd_element) {
    if element.is_null() {
        return;
    }
    unsafe {
        drop(Box::from_raw(element));
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn plcd_buf_free(buf: *mut plcd_buf) {
    if buf.is_null() {
        return;
    }
    unsafe {
        let buf = &mut *buf;
        if !buf.data.is_null() && buf.len != 0 {
            drop(Vec::from_raw_parts(buf.data, buf.len, buf.len));
        }
        buf.data = ptr::null_mut();
        buf.len = 0;
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn plcd_error_free(err: *mut plcd_error) {
    if err.is_null() {
        return;
    }
    unsafe {
        let err = Box::from_raw(err);
        if !err.message.is_null() {
            drop(CString::from_raw(err.message));
        }
        if !err.field.is_null() {
            drop(CString::from_raw(err.field));
        }
        if !err.element_type.is_null() {
            drop(CString::from_raw(err.element_type));
        }
    }
}

fn borrow_parser<'a>(
    parser: *mut plcd_choice_set_parser,
    out_err: *mut *mut plcd_error,
) -> Result<&'a mut plcd_choice_set_parser, i32> {
    if parser.is_null() {
        return Err(fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("parser is null"),
        ));
    }
    unsafe { Ok(&mut *parser) }
}

fn borrow_element_registry<'a>(
    registry: *mut plcd_element_registry,
    out_err: *mut *mut plcd_error,
) -> Result<&'a mut plcd_element_registry, i32> {
    if registry.is_null() {
        return Err(fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("element registry is null"),
        ));
    }
    unsafe { Ok(&mut *registry) }
}

fn borrow_action_registry<'a>(
    registry: *mut plcd_action_registry,
    out_err: *mut *mut plcd_error,
) -> Result<&'a mut plcd_action_registry, i32> {
    if registry.is_null() {
        return Err(fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("action registry is null"),
        ));
    }
    unsafe { Ok(&mut *registry) }
}

fn borrow_warnings<'a>(
    warnings: *mut plcd_warnings,
    out_err: *mut *mut plcd_error,
) -> Result<&'a mut plcd_warnings, i32> {
    if warnings.is_null() {
        return Err(fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("warnings is null"),
        ));
    }
    unsafe { Ok(&mut *warnings) }
}

fn borrow_element<'a>(
    element: *mut plcd_element,
    out_err: *mut *mut plcd_error,
) -> Result<&'a mut plcd_element, i32> {
    if element.is_null() {
        return Err(fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("element is null"),
        ));
    }
    unsafe { Ok(&mut *element) }
}

fn parse_json_bytes(bytes: *const u8, len: usize) -> Result<Value, Error> {
    if bytes.is_null() {
        return Err(Error::new(ErrorKind::Usage).with_message("json_bytes is null"));
    }
    let slice = unsafe { std::slice::from_raw_parts(bytes, len) };
    let text = std::str::from_utf8(slice).map_err(|err| {
        Error::new(ErrorKind::Json)
            .with_message("invalid json utf-8")
            .with_source(err)
    })?;
    crate::json::parse::from_str(text).map_err(|err| {
        Error::new(ErrorKind::Json)
            .with_message("invalid json")
            .with_source(err)
    })
}

fn write_json_buf(out_buf: *mut plcd_buf, value: &Value) -> Result<(), Error> {
    if out_buf.is_null() {
        return Err(Error::new(ErrorKind::Usage).with_message("out_buf is null"));
    }
    let bytes = serde_json::to_vec(value).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to serialize json")
            .with_source(err)
    })?;
    unsafe {
        let buf = &mut *out_buf;
        let mut data = bytes.into_boxed_slice();
        buf.len = data.len();
        buf.data = data.as_mut_ptr();
        std::mem::forget(data);
    }
    Ok(())
}

fn fail(out_err: *mut *mut plcd_error, err: Error) -> i32 {
    if out_err.is_null() {
        return -1;
    }
    let error = Box::new(plcd_error {
        kind: error_kind_code(err.kind()),
        message: to_c_string(err.message().unwrap_or("")),
        field: err.field().map(to_c_string).unwrap_or(ptr::null_mut()),
        element_type: err
            .element_type()
            .map(to_c_string)
            .unwrap_or(ptr::null_mut()),
    });
    unsafe {
        *out_err = Box::into_raw(error);
    }
    -1
}

fn to_c_string(input: &str) -> *mut c_char {
    CString::new(input)
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}

fn error_kind_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::Json => 3,
        ErrorKind::Schema => 4,
        ErrorKind::NotFound => 5,
        ErrorKind::Io => 6,
    }
}
