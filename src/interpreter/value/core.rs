use std::fmt;

use crate::{
    ast::ValueType,
    error::Fault,
    util::num::{f64_to_i64_truncated, i64_to_char_checked, i64_to_f64_checked},
};

/// Represents a runtime value in the interpreter.
///
/// Objects are plain values: they are cloned into bindings, arguments and
/// return slots, and never shared. `Error` is not a usable value; it is a
/// fault travelling through expression evaluation until the interpreter
/// raises it.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// `true` or `false`.
    Bool(bool),
    /// An owned string.
    Str(String),
    /// A single character.
    Char(char),
    /// The empty object; held by declared-but-unset variables and returned
    /// by void calls.
    Void,
    /// A propagating fault.
    Error(Fault),
}

impl From<i64> for Object {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Object {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Object {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<char> for Object {
    fn from(v: char) -> Self {
        Self::Char(v)
    }
}

impl From<&str> for Object {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<Fault> for Object {
    fn from(fault: Fault) -> Self {
        Self::Error(fault)
    }
}

impl From<Result<Self, Fault>> for Object {
    fn from(result: Result<Self, Fault>) -> Self {
        result.unwrap_or_else(Self::Error)
    }
}

impl Object {
    /// The type tag of the object, or `None` for an error.
    #[must_use]
    pub const fn value_type(&self) -> Option<ValueType> {
        match self {
            Self::Int(_) => Some(ValueType::Int),
            Self::Float(_) => Some(ValueType::Float),
            Self::Bool(_) => Some(ValueType::Bool),
            Self::Str(_) => Some(ValueType::Str),
            Self::Char(_) => Some(ValueType::Char),
            Self::Void => Some(ValueType::Void),
            Self::Error(_) => None,
        }
    }

    /// Whether the object carries a fault.
    ///
    /// This is the one check callers should use before consuming an object.
    #[must_use]
    pub const fn found_errors(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The carried fault, if any.
    #[must_use]
    pub const fn fault(&self) -> Option<Fault> {
        match self {
            Self::Error(fault) => Some(*fault),
            _ => None,
        }
    }

    /// Moves the fault channel into a `Result`.
    ///
    /// # Errors
    /// Returns the carried fault when the object is an `Error`.
    pub fn into_result(self) -> Result<Self, Fault> {
        match self {
            Self::Error(fault) => Err(fault),
            other => Ok(other),
        }
    }

    /// Whether the object is the zero of its type, as checked by `/` and `%`.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Int(v) => *v == 0,
            Self::Float(v) => *v == 0.0,
            Self::Bool(v) => !*v,
            Self::Char(v) => *v == '\0',
            Self::Str(_) | Self::Void | Self::Error(_) => false,
        }
    }

    /// Converts the object to `target`, backing the `cast<T>(expr)` form.
    ///
    /// Supported conversions are the identity, `int` and `float` in both
    /// directions, `int` and `char` in both directions and `bool` to `int`.
    /// Floats truncate toward zero. Anything lossy or unsupported yields
    /// `Error(ConvertFailed)`; an incoming error is forwarded.
    #[must_use]
    pub fn convert(&self, target: ValueType) -> Self {
        if self.found_errors() || self.value_type() == Some(target) {
            return self.clone();
        }
        let converted = match (self, target) {
            (Self::Int(v), ValueType::Float) => {
                i64_to_f64_checked(*v, Fault::ConvertFailed).map(Self::Float)
            },
            (Self::Float(v), ValueType::Int) => {
                f64_to_i64_truncated(*v, Fault::ConvertFailed).map(Self::Int)
            },
            (Self::Int(v), ValueType::Char) => {
                i64_to_char_checked(*v, Fault::ConvertFailed).map(Self::Char)
            },
            (Self::Char(c), ValueType::Int) => Ok(Self::Int(i64::from(u32::from(*c)))),
            (Self::Bool(b), ValueType::Int) => Ok(Self::Int(i64::from(*b))),
            _ => Err(Fault::ConvertFailed),
        };
        converted.into()
    }
}

/// The textual form written by `print`.
impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::Void => write!(f, "void"),
            Self::Error(fault) => write!(f, "<error: {fault}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn print_formatting() {
        assert_eq!(Object::Int(6).to_string(), "6");
        assert_eq!(Object::Float(2.0).to_string(), "2.0");
        assert_eq!(Object::Float(0.5).to_string(), "0.5");
        assert_eq!(Object::Bool(true).to_string(), "true");
        assert_eq!(Object::from("hi").to_string(), "hi");
        assert_eq!(Object::Char('x').to_string(), "x");
        assert_eq!(Object::Void.to_string(), "void");
    }

    #[test]
    fn only_errors_report_faults() {
        assert!(Object::Error(Fault::DivideByZero).found_errors());
        assert!(!Object::Void.found_errors());
        assert_eq!(Object::Error(Fault::Negate).value_type(), None);
        assert_eq!(Object::Int(1).into_result(), Ok(Object::Int(1)));
    }

    #[test]
    fn conversions() {
        assert_eq!(Object::Float(-3.7).convert(ValueType::Int), Object::Int(-3));
        assert_eq!(Object::Int(3).convert(ValueType::Float), Object::Float(3.0));
        assert_eq!(Object::Int(65).convert(ValueType::Char), Object::Char('A'));
        assert_eq!(Object::Char('a').convert(ValueType::Int), Object::Int(97));
        assert_eq!(Object::Bool(true).convert(ValueType::Int), Object::Int(1));
        assert_eq!(Object::from("1").convert(ValueType::Int),
                   Object::Error(Fault::ConvertFailed));
        assert_eq!(Object::Float(f64::INFINITY).convert(ValueType::Int),
                   Object::Error(Fault::ConvertFailed));
    }

    #[test]
    fn conversion_forwards_errors() {
        assert_eq!(Object::Error(Fault::Overflow).convert(ValueType::Float),
                   Object::Error(Fault::Overflow));
    }
}
