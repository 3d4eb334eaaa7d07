//! Constants and the closed sets of built-in functions and types.

use num_bigint::BigInt;
use std::fmt;

/// A literal constant, tagged with its built-in type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constant {
    Integer(BigInt),
    Char(char),
    String(String),
    Unit,
    Bool(bool),
}

impl Constant {
    pub fn builtin_type(&self) -> BuiltinType {
        match self {
            Constant::Integer(_) => BuiltinType::Integer,
            Constant::Char(_) => BuiltinType::Char,
            Constant::String(_) => BuiltinType::String,
            Constant::Unit => BuiltinType::Unit,
            Constant::Bool(_) => BuiltinType::Bool,
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Integer(n) => write!(f, "{n}"),
            Constant::Char(c) => write!(f, "'{}'", c.escape_default()),
            Constant::String(s) => write!(f, "\"{}\"", s.escape_default()),
            Constant::Unit => f.write_str("unit"),
            Constant::Bool(true) => f.write_str("True"),
            Constant::Bool(false) => f.write_str("False"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuiltinType {
    Integer,
    Char,
    String,
    Unit,
    Bool,
}

impl BuiltinType {
    pub const ALL: [BuiltinType; 5] = [
        BuiltinType::Integer,
        BuiltinType::Char,
        BuiltinType::String,
        BuiltinType::Unit,
        BuiltinType::Bool,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BuiltinType::Integer => "integer",
            BuiltinType::Char => "char",
            BuiltinType::String => "string",
            BuiltinType::Unit => "unit",
            BuiltinType::Bool => "bool",
        }
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in functions. The grammar tries [`BuiltinName::ALL`] in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuiltinName {
    AddInteger,
    SubtractInteger,
    MultiplyInteger,
    DivideInteger,
    QuotientInteger,
    RemainderInteger,
    ModInteger,
    LessThanInteger,
    LessThanEqualsInteger,
    GreaterThanInteger,
    GreaterThanEqualsInteger,
    EqualsInteger,
    AppendString,
    EqualsString,
    EqualsChar,
    CharToString,
    IfThenElse,
    Trace,
}

impl BuiltinName {
    pub const ALL: [BuiltinName; 18] = [
        BuiltinName::AddInteger,
        BuiltinName::SubtractInteger,
        BuiltinName::MultiplyInteger,
        BuiltinName::DivideInteger,
        BuiltinName::QuotientInteger,
        BuiltinName::RemainderInteger,
        BuiltinName::ModInteger,
        BuiltinName::LessThanInteger,
        BuiltinName::LessThanEqualsInteger,
        BuiltinName::GreaterThanInteger,
        BuiltinName::GreaterThanEqualsInteger,
        BuiltinName::EqualsInteger,
        BuiltinName::AppendString,
        BuiltinName::EqualsString,
        BuiltinName::EqualsChar,
        BuiltinName::CharToString,
        BuiltinName::IfThenElse,
        BuiltinName::Trace,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BuiltinName::AddInteger => "addInteger",
            BuiltinName::SubtractInteger => "subtractInteger",
            BuiltinName::MultiplyInteger => "multiplyInteger",
            BuiltinName::DivideInteger => "divideInteger",
            BuiltinName::QuotientInteger => "quotientInteger",
            BuiltinName::RemainderInteger => "remainderInteger",
            BuiltinName::ModInteger => "modInteger",
            BuiltinName::LessThanInteger => "lessThanInteger",
            BuiltinName::LessThanEqualsInteger => "lessThanEqualsInteger",
            BuiltinName::GreaterThanInteger => "greaterThanInteger",
            BuiltinName::GreaterThanEqualsInteger => "greaterThanEqualsInteger",
            BuiltinName::EqualsInteger => "equalsInteger",
            BuiltinName::AppendString => "appendString",
            BuiltinName::EqualsString => "equalsString",
            BuiltinName::EqualsChar => "equalsChar",
            BuiltinName::CharToString => "charToString",
            BuiltinName::IfThenElse => "ifThenElse",
            BuiltinName::Trace => "trace",
        }
    }
}

impl fmt::Display for BuiltinName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
