//! # Message Interpolation
//!
//! printf-style substitution of [`Param`] values into a message.
//!
//! ## Conversion specifiers
//!
//! | Specifier   | Output                                                   |
//! |-------------|----------------------------------------------------------|
//! | `%s`        | plain string form                                        |
//! | `%d`        | numeric value (`NaN` for non-numeric input)              |
//! | `%i`        | leading integer of the string form (`NaN` if none)       |
//! | `%f`        | leading float of the string form (`NaN` if none)         |
//! | `%j`        | JSON                                                     |
//! | `%o` / `%O` | JSON                                                     |
//! | `%c`        | consumes a parameter, emits nothing                      |
//! | `%%`        | a single `%`                                             |
//!
//! Parameters left over once the specifiers run out are appended, each
//! preceded by a single space. Specifiers without a matching parameter are
//! kept literally, and so are unknown ones (`%x`). When there are no
//! parameters at all the message is returned untouched, `%%` included.
//!
//! ```rust
//! use loglet_core::format::interpolate;
//! use loglet_core::params;
//!
//! assert_eq!(interpolate("hello %s", &params!["world"]), "hello world");
//! assert_eq!(interpolate("%d items", &params![3, "extra"]), "3 items extra");
//! assert_eq!(interpolate("%s and %s", &params!["one"]), "one and %s");
//! ```

use serde_json::Value;

/// A single interpolation argument
#[derive(Debug, Clone, PartialEq)]
pub enum Param
{
    /// Text
    Str(String),
    /// Signed integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Boolean
    Bool(bool),
    /// Absent value
    Null,
    /// Arbitrary structured value
    Json(Value),
}

impl Param
{
    /// Plain string form, used by `%s` and for surplus parameters
    pub fn to_display(&self) -> String
    {
        match self {
            Param::Str(text) => text.clone(),
            Param::Int(value) => value.to_string(),
            Param::Float(value) => format_number(*value),
            Param::Bool(value) => value.to_string(),
            Param::Null => "null".to_string(),
            Param::Json(Value::String(text)) => text.clone(),
            Param::Json(value) => value.to_string(),
        }
    }

    /// JSON form, used by `%j`, `%o` and `%O`
    pub fn to_json(&self) -> String
    {
        match self {
            Param::Str(text) => Value::String(text.clone()).to_string(),
            Param::Int(value) => value.to_string(),
            Param::Float(value) => Value::from(*value).to_string(),
            Param::Bool(value) => value.to_string(),
            Param::Null => "null".to_string(),
            Param::Json(value) => value.to_string(),
        }
    }

    /// Numeric conversion used by `%d`
    fn to_number(&self) -> f64
    {
        match self {
            Param::Str(text) => number_from_str(text),
            #[allow(clippy::cast_precision_loss)]
            Param::Int(value) => *value as f64,
            Param::Float(value) => *value,
            Param::Bool(value) => f64::from(u8::from(*value)),
            Param::Null => 0.0,
            Param::Json(value) => match value {
                Value::Null => 0.0,
                Value::Bool(flag) => f64::from(u8::from(*flag)),
                Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
                Value::String(text) => number_from_str(text),
                Value::Array(_) | Value::Object(_) => f64::NAN,
            },
        }
    }

    fn render(&self, specifier: char) -> String
    {
        match specifier {
            's' => self.to_display(),
            'd' => match self {
                Param::Int(value) => value.to_string(),
                other => format_number(other.to_number()),
            },
            'i' => match self {
                Param::Int(value) => value.to_string(),
                Param::Float(value) => format_number(value.trunc()),
                other => format_number(parse_int_prefix(&other.to_display()).unwrap_or(f64::NAN)),
            },
            'f' => match self {
                Param::Float(value) => format_number(*value),
                other => format_number(parse_float_prefix(&other.to_display()).unwrap_or(f64::NAN)),
            },
            'j' | 'o' | 'O' => self.to_json(),
            // %c
            _ => String::new(),
        }
    }
}

impl From<&str> for Param
{
    fn from(value: &str) -> Self
    {
        Param::Str(value.to_string())
    }
}

impl From<String> for Param
{
    fn from(value: String) -> Self
    {
        Param::Str(value)
    }
}

impl From<&String> for Param
{
    fn from(value: &String) -> Self
    {
        Param::Str(value.clone())
    }
}

impl From<bool> for Param
{
    fn from(value: bool) -> Self
    {
        Param::Bool(value)
    }
}

impl From<f32> for Param
{
    fn from(value: f32) -> Self
    {
        Param::Float(f64::from(value))
    }
}

impl From<f64> for Param
{
    fn from(value: f64) -> Self
    {
        Param::Float(value)
    }
}

impl From<Value> for Param
{
    fn from(value: Value) -> Self
    {
        Param::Json(value)
    }
}

impl From<()> for Param
{
    fn from((): ()) -> Self
    {
        Param::Null
    }
}

impl<T: Into<Param>> From<Option<T>> for Param
{
    fn from(value: Option<T>) -> Self
    {
        value.map_or(Param::Null, Into::into)
    }
}

macro_rules! param_from_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Param
            {
                fn from(value: $ty) -> Self
                {
                    Param::Int(i64::from(value))
                }
            }
        )*
    };
}

param_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! param_from_wide_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Param
            {
                fn from(value: $ty) -> Self
                {
                    i64::try_from(value).map_or_else(|_| Param::Json(Value::from(value)), Param::Int)
                }
            }
        )*
    };
}

param_from_wide_int!(u64, usize, isize);

/// Build a `Vec<Param>` from heterogeneous values
///
/// ```rust
/// use loglet_core::format::Param;
/// use loglet_core::params;
///
/// let params = params!["id", 7, 2.5, true];
/// assert_eq!(params[1], Param::Int(7));
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::format::Param>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::format::Param::from($value)),+]
    };
}

/// Substitute `params` into `message`
///
/// See the [module documentation](self) for the supported specifiers.
pub fn interpolate(message: &str, params: &[Param]) -> String
{
    if params.is_empty() {
        return message.to_string();
    }

    let mut out = String::with_capacity(message.len() + params.len() * 8);
    let mut remaining = params.iter();
    let mut chars = message.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }

        let Some(&specifier) = chars.peek() else {
            out.push('%');
            break;
        };

        if specifier == '%' {
            chars.next();
            out.push('%');
            continue;
        }

        if !is_specifier(specifier) {
            out.push('%');
            continue;
        }

        chars.next();
        if let Some(param) = remaining.next() {
            out.push_str(&param.render(specifier));
        } else {
            out.push('%');
            out.push(specifier);
        }
    }

    for param in remaining {
        out.push(' ');
        out.push_str(&param.to_display());
    }

    out
}

const fn is_specifier(ch: char) -> bool
{
    matches!(ch, 's' | 'd' | 'i' | 'f' | 'j' | 'o' | 'O' | 'c')
}

/// Render a number the way a JavaScript console would
pub(crate) fn format_number(value: f64) -> String
{
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let text = if value.is_sign_positive() { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Whole-string numeric conversion; blank text is zero
fn number_from_str(text: &str) -> f64
{
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if !trimmed.chars().all(|ch| ch.is_ascii_digit() || matches!(ch, '+' | '-' | '.' | 'e' | 'E')) {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Optional sign followed by digits, at the start of `text`
fn parse_int_prefix(text: &str) -> Option<f64>
{
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    text[..end].parse::<f64>().ok()
}

/// Longest decimal literal at the start of `text`
fn parse_float_prefix(text: &str) -> Option<f64>
{
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    if text[end..].starts_with("Infinity") {
        return Some(if bytes.first() == Some(&b'-') { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let fraction_start = end + 1;
        let mut cursor = fraction_start;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        mantissa_digits += cursor - fraction_start;
        if mantissa_digits > 0 {
            end = cursor;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut cursor = end + 1;
        if cursor < bytes.len() && matches!(bytes[cursor], b'+' | b'-') {
            cursor += 1;
        }
        let exponent_start = cursor;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        if cursor > exponent_start {
            end = cursor;
        }
    }

    text[..end].parse::<f64>().ok()
}
