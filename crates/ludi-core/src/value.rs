//! Keyword-argument values and the closed literal vocabulary.

use crate::color::Color;
use crate::geom::Orientation;
use std::fmt;

/// A keyword value from a description line.
///
/// The vocabulary is closed: booleans, numbers, named colors, and named
/// directions are recognized; any other token is kept as a literal string
/// (which is how `stype=bomb` cross references between sprite types work).
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// `True` or `False`.
    Bool(bool),
    /// Any token that parses as a number.
    Num(f64),
    /// A named color such as `RED` or `DARKGRAY`.
    Color(Color),
    /// A named direction: `UP`, `DOWN`, `LEFT`, `RIGHT`.
    Dir(Orientation),
    /// Anything else, kept verbatim.
    Str(String),
}

impl Value {
    /// Resolve a raw token against the literal vocabulary.
    ///
    /// Never fails: unrecognized tokens become [`Value::Str`].
    pub fn from_token(token: &str) -> Value {
        match token {
            "True" => return Value::Bool(true),
            "False" => return Value::Bool(false),
            _ => {}
        }
        if let Ok(n) = token.parse::<f64>() {
            return Value::Num(n);
        }
        if let Some(c) = Color::from_name(token) {
            return Value::Color(c);
        }
        if let Some(o) = Orientation::from_name(token) {
            return Value::Dir(o);
        }
        Value::Str(token.to_string())
    }

    /// The boolean payload, if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The numeric payload, if this is a [`Value::Num`].
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// The numeric payload truncated to an integer.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_f64().map(|n| n as i64)
    }

    /// The string payload, if this is a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The color payload, if this is a [`Value::Color`].
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Value::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// The direction payload, if this is a [`Value::Dir`].
    pub fn as_dir(&self) -> Option<Orientation> {
        match self {
            Value::Dir(o) => Some(*o),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Num(n) => write!(f, "{n}"),
            Value::Color(c) => write!(f, "{c}"),
            Value::Dir(o) => write!(f, "({}, {})", o.dx, o.dy),
            Value::Str(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;

    #[test]
    fn booleans_are_case_sensitive() {
        assert_eq!(Value::from_token("True"), Value::Bool(true));
        assert_eq!(Value::from_token("False"), Value::Bool(false));
        assert_eq!(Value::from_token("true"), Value::Str("true".into()));
    }

    #[test]
    fn numbers_parse_as_f64() {
        assert_eq!(Value::from_token("3"), Value::Num(3.0));
        assert_eq!(Value::from_token("0.5"), Value::Num(0.5));
        assert_eq!(Value::from_token("-1"), Value::Num(-1.0));
    }

    #[test]
    fn colors_and_directions_resolve() {
        assert_eq!(Value::from_token("RED"), Value::Color(color::RED));
        assert_eq!(Value::from_token("UP"), Value::Dir(Orientation::UP));
    }

    #[test]
    fn unknown_tokens_stay_literal() {
        let v = Value::from_token("bomb");
        assert_eq!(v.as_str(), Some("bomb"));
        assert_eq!(v.as_f64(), None);
        assert_eq!(v.as_bool(), None);
    }

    #[test]
    fn as_i64_truncates() {
        assert_eq!(Value::Num(2.9).as_i64(), Some(2));
        assert_eq!(Value::Num(-1.5).as_i64(), Some(-1));
    }
}
