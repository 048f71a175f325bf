//! # Error Normalizer
//!
//! Helpers that turn an arbitrary caught value into human-readable strings.
//!
//! A caught value is modelled by [`Thrown`]: either an error-like record
//! ([`ErrorDetails`], or a snapshot of any [`ErrorLike`] type), a panic
//! payload captured with [`std::panic::catch_unwind`], a number, or any other
//! value expressed as a [`serde_json::Value`].
//!
//! None of the `get_error*` functions can fail. Values that are not
//! error-like degrade to their plain string form.
//!
//! ## Example
//!
//! ```rust
//! use loglet_core::error_info::{get_error_message, get_error_name, get_error_stack, ErrorDetails, Thrown};
//!
//! let thrown = Thrown::from(ErrorDetails::new("TypeError", "bad"));
//! assert_eq!(get_error_name(&thrown), "TypeError");
//! assert_eq!(get_error_message(&thrown), "bad");
//! assert_eq!(get_error_stack(&thrown), "bad");
//!
//! let thrown = Thrown::from(42);
//! assert_eq!(get_error_name(&thrown), "42");
//! ```

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::panic::{self, UnwindSafe};

use serde_json::Value;

use crate::format::format_number;

/// Text used for panic payloads that are neither `&str` nor `String`
const OPAQUE_PAYLOAD: &str = "Box<dyn Any>";

/// Capability shared by error-like values: a name, a message and an optional stack
pub trait ErrorLike
{
    /// Short name of the error kind (e.g. `TypeError`, `ParseIntError`)
    fn name(&self) -> String;

    /// Human-readable message
    fn message(&self) -> String;

    /// Rendered stack or cause chain, if one was captured
    fn stack(&self) -> Option<String>
    {
        None
    }
}

/// Owned error-like record
///
/// Displays as `name: message`, or just `name` when the message is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetails
{
    name: String,
    message: String,
    stack: Option<String>,
}

impl ErrorDetails
{
    /// Create a record with no stack
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self
    {
        Self {
            name: name.into(),
            message: message.into(),
            stack: None,
        }
    }

    /// Attach a stack (or any multi-line trace) to the record
    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self
    {
        self.stack = Some(stack.into());
        self
    }

    /// Capture a Rust error
    ///
    /// The name is the short type name of `E`. When the error has a
    /// `source()` chain, the stack holds one `caused by:` line per cause.
    pub fn from_error<E: Error + ?Sized>(err: &E) -> Self
    {
        let name = short_type_name(std::any::type_name::<E>());
        let message = err.to_string();

        let mut source = err.source();
        let stack = if source.is_some() {
            let mut rendered = if message.is_empty() {
                name.clone()
            } else {
                format!("{name}: {message}")
            };
            while let Some(cause) = source {
                rendered.push_str("\n    caused by: ");
                rendered.push_str(&cause.to_string());
                source = cause.source();
            }
            Some(rendered)
        } else {
            None
        };

        Self { name, message, stack }
    }

    /// Snapshot any error-like value
    pub fn from_error_like<T: ErrorLike + ?Sized>(value: &T) -> Self
    {
        Self {
            name: value.name(),
            message: value.message(),
            stack: value.stack(),
        }
    }
}

impl<T: ErrorLike + ?Sized> From<&T> for ErrorDetails
{
    fn from(value: &T) -> Self
    {
        Self::from_error_like(value)
    }
}

impl ErrorLike for ErrorDetails
{
    fn name(&self) -> String
    {
        self.name.clone()
    }

    fn message(&self) -> String
    {
        self.message.clone()
    }

    fn stack(&self) -> Option<String>
    {
        self.stack.clone()
    }
}

impl fmt::Display for ErrorDetails
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        if self.message.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}: {}", self.name, self.message)
        }
    }
}

impl Error for ErrorDetails {}

/// A caught value of unknown shape
#[derive(Debug)]
pub enum Thrown
{
    /// An error-like value
    Error(ErrorDetails),
    /// A panic payload, as returned by [`std::panic::catch_unwind`]
    Panic(Box<dyn Any + Send>),
    /// A number, kept as `f64` so `NaN` and the infinities survive
    Number(f64),
    /// Any other value
    Value(Value),
}

impl Thrown
{
    /// Wrap a Rust error
    pub fn error<E: Error + ?Sized>(err: &E) -> Self
    {
        Thrown::Error(ErrorDetails::from_error(err))
    }

    /// Wrap a value of any type implementing [`ErrorLike`]
    pub fn error_like<T: ErrorLike + ?Sized>(value: &T) -> Self
    {
        Thrown::Error(ErrorDetails::from_error_like(value))
    }

    /// Wrap a panic payload
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self
    {
        Thrown::Panic(payload)
    }

    /// Run `f`, turning a panic into a [`Thrown::Panic`]
    ///
    /// The process panic hook still runs, so the panic message is printed as usual.
    ///
    /// ## Errors
    ///
    /// Returns the panic payload if `f` panics.
    pub fn catch<F, T>(f: F) -> Result<T, Thrown>
    where
        F: FnOnce() -> T + UnwindSafe,
    {
        panic::catch_unwind(f).map_err(Thrown::Panic)
    }

    /// The error-like view of this value, if it has one
    pub fn as_error_like(&self) -> Option<&dyn ErrorLike>
    {
        match self {
            Thrown::Error(details) => Some(details as &dyn ErrorLike),
            Thrown::Panic(_) | Thrown::Number(_) | Thrown::Value(_) => None,
        }
    }

    /// Plain string conversion, ignoring any error-like structure
    fn stringify(&self) -> String
    {
        match self {
            Thrown::Error(details) => details.to_string(),
            Thrown::Panic(payload) => panic_payload_text(payload.as_ref()),
            Thrown::Number(value) => format_number(*value),
            Thrown::Value(value) => stringify_value(value),
        }
    }
}

impl fmt::Display for Thrown
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(&self.stringify())
    }
}

impl From<ErrorDetails> for Thrown
{
    fn from(details: ErrorDetails) -> Self
    {
        Thrown::Error(details)
    }
}

impl From<Value> for Thrown
{
    fn from(value: Value) -> Self
    {
        Thrown::Value(value)
    }
}

/// The unit value stands in for an absent value and renders as `null`,
/// like the JSON it maps to.
impl From<()> for Thrown
{
    fn from((): ()) -> Self
    {
        Thrown::Value(Value::Null)
    }
}

macro_rules! thrown_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Thrown
            {
                fn from(value: $ty) -> Self
                {
                    Thrown::Value(Value::from(value))
                }
            }
        )*
    };
}

thrown_from_value!(&str, String, bool, i32, i64, u32, u64);

impl From<f64> for Thrown
{
    fn from(value: f64) -> Self
    {
        Thrown::Number(value)
    }
}

impl From<f32> for Thrown
{
    fn from(value: f32) -> Self
    {
        Thrown::Number(f64::from(value))
    }
}

/// String form of any caught value
///
/// Error-like values render as `name: message`; everything else falls back
/// to plain string conversion.
pub fn get_error(value: &Thrown) -> String
{
    value.stringify()
}

/// Name of an error-like value, or the plain string form of anything else
pub fn get_error_name(value: &Thrown) -> String
{
    match value.as_error_like() {
        Some(error) => error.name(),
        None => value.stringify(),
    }
}

/// Message of an error-like value, or the plain string form of anything else
pub fn get_error_message(value: &Thrown) -> String
{
    match value.as_error_like() {
        Some(error) => error.message(),
        None => value.stringify(),
    }
}

/// Stack of an error-like value
///
/// Falls back to the message when the stack is missing or blank, and to the
/// plain string form for values that are not error-like.
pub fn get_error_stack(value: &Thrown) -> String
{
    match value.as_error_like() {
        Some(error) => error
            .stack()
            .filter(|stack| !stack.trim().is_empty())
            .unwrap_or_else(|| error.message()),
        None => value.stringify(),
    }
}

/// Display text of a plain Rust error
pub fn error_message(err: &dyn Error) -> String
{
    err.to_string()
}

/// Messages of an error and each of its causes, outermost first
pub fn error_chain(err: &dyn Error) -> Vec<String>
{
    let mut chain = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }
    chain
}

/// Plain string conversion of a JSON value
///
/// Strings are returned without quotes, arrays join their elements with `,`
/// (nulls become empty), objects render as compact JSON.
fn stringify_value(value: &Value) -> String
{
    match value {
        Value::Null => "null".to_string(),
        Value::String(text) => text.clone(),
        Value::Number(number) if number.is_f64() => number.as_f64().map_or_else(|| number.to_string(), format_number),
        Value::Bool(_) | Value::Number(_) | Value::Object(_) => value.to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => stringify_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
    }
}

fn panic_payload_text(payload: &(dyn Any + Send)) -> String
{
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        OPAQUE_PAYLOAD.to_string()
    }
}

/// `core::num::error::ParseIntError` -> `ParseIntError`
fn short_type_name(full: &str) -> String
{
    let base = full.split('<').next().unwrap_or(full);
    let base = base.trim_start_matches('&').trim_start_matches("dyn ");
    let base = base.split(" + ").next().unwrap_or(base);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
        {
            f.write_str("config load failed")
        }
    }

    impl Error for Outer
    {
        fn source(&self) -> Option<&(dyn Error + 'static)>
        {
            Some(&self.0)
        }
    }

    #[test]
    fn test_short_type_name()
    {
        assert_eq!(short_type_name("core::num::error::ParseIntError"), "ParseIntError");
        assert_eq!(short_type_name("alloc::vec::Vec<u8>"), "Vec");
        assert_eq!(short_type_name("dyn core::error::Error"), "Error");
        assert_eq!(
            short_type_name("dyn core::error::Error + core::marker::Send + core::marker::Sync"),
            "Error"
        );
        assert_eq!(short_type_name("Plain"), "Plain");
    }

    #[test]
    fn test_from_error_without_source_has_no_stack()
    {
        let err = "abc".parse::<i32>().unwrap_err();
        let details = ErrorDetails::from_error(&err);
        assert_eq!(details.name(), "ParseIntError");
        assert_eq!(details.message(), "invalid digit found in string");
        assert_eq!(details.stack(), None);
    }

    #[test]
    fn test_from_error_renders_cause_chain()
    {
        let err = Outer(std::io::Error::new(std::io::ErrorKind::NotFound, "missing file"));
        let details = ErrorDetails::from_error(&err);
        assert_eq!(details.name(), "Outer");
        assert_eq!(
            details.stack().as_deref(),
            Some("Outer: config load failed\n    caused by: missing file")
        );
    }

    #[test]
    fn test_error_chain_lists_causes()
    {
        let err = Outer(std::io::Error::new(std::io::ErrorKind::NotFound, "missing file"));
        assert_eq!(error_chain(&err), vec!["config load failed", "missing file"]);
        assert_eq!(error_message(&err), "config load failed");
    }

    #[test]
    fn test_stringify_value()
    {
        assert_eq!(stringify_value(&Value::Null), "null");
        assert_eq!(stringify_value(&Value::from("plain")), "plain");
        assert_eq!(stringify_value(&Value::from(1.5)), "1.5");
        assert_eq!(stringify_value(&Value::from(2.0)), "2");
        assert_eq!(stringify_value(&serde_json::json!([1, null, "a"])), "1,,a");
        assert_eq!(stringify_value(&serde_json::json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_panic_payload_text()
    {
        assert_eq!(panic_payload_text(&"boom"), "boom");
        assert_eq!(panic_payload_text(&String::from("owned boom")), "owned boom");
        assert_eq!(panic_payload_text(&17_u8), OPAQUE_PAYLOAD);
    }

    #[test]
    fn test_numbers_stringify_like_format()
    {
        assert_eq!(Thrown::from(f64::NAN).to_string(), "NaN");
        assert_eq!(Thrown::from(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Thrown::from(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Thrown::from(1.0).to_string(), "1");
        assert_eq!(Thrown::from(-0.0).to_string(), "0");
        assert_eq!(Thrown::from(0.25_f32).to_string(), "0.25");
        assert_eq!(Thrown::from(1.0).to_string(), format_number(1.0));
    }

    #[test]
    fn test_display_without_message()
    {
        assert_eq!(ErrorDetails::new("AbortError", "").to_string(), "AbortError");
        assert_eq!(ErrorDetails::new("TypeError", "bad").to_string(), "TypeError: bad");
    }
}
