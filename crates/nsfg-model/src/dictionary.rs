//! Stata dictionary layout for fixed-width survey files.
//!
//! A dictionary lists one variable per `_column(n)` entry. Column positions
//! are 1-based, matching the Stata `infile` convention.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage type declared for a dictionary variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableType {
    Byte,
    Int,
    Long,
    Float,
    Double,
    Numeric,
    /// Fixed-length string (`strN`).
    Str(u32),
}

impl VariableType {
    /// Integer storage types (`byte`, `int`, `long`).
    pub fn is_integer(self) -> bool {
        matches!(self, Self::Byte | Self::Int | Self::Long)
    }

    /// Floating-point storage types (`float`, `double`, `numeric`).
    pub fn is_float(self) -> bool {
        matches!(self, Self::Float | Self::Double | Self::Numeric)
    }
}

impl FromStr for VariableType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "byte" => Ok(Self::Byte),
            "int" => Ok(Self::Int),
            "long" => Ok(Self::Long),
            "float" => Ok(Self::Float),
            "double" => Ok(Self::Double),
            "numeric" => Ok(Self::Numeric),
            other => match other.strip_prefix("str") {
                // `str` with no length behaves like an unbounded string column.
                Some("") => Ok(Self::Str(0)),
                Some(len) => len.parse().map(Self::Str).map_err(|_| s.to_string()),
                None => Err(s.to_string()),
            },
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte => f.write_str("byte"),
            Self::Int => f.write_str("int"),
            Self::Long => f.write_str("long"),
            Self::Float => f.write_str("float"),
            Self::Double => f.write_str("double"),
            Self::Numeric => f.write_str("numeric"),
            Self::Str(len) => write!(f, "str{len}"),
        }
    }
}

/// A single dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// 1-based start column.
    pub start: usize,
    /// 1-based exclusive end column; `None` reads to the end of the line.
    pub end: Option<usize>,
    pub kind: VariableType,
    /// Lowercased variable name.
    pub name: String,
    /// Stata display format, e.g. `%12s` or `%8.2f`.
    pub format: String,
    pub description: String,
}

impl Variable {
    /// 0-based byte range `[start, end)` for slicing a line of `line_len` bytes.
    pub fn byte_range(&self, line_len: usize) -> (usize, usize) {
        let start = self.start.saturating_sub(1).min(line_len);
        let end = self
            .end
            .map_or(line_len, |end| end.saturating_sub(1).min(line_len));
        (start, end.max(start))
    }
}

/// Ordered list of variables parsed from a `.dct` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dictionary {
    pub variables: Vec<Variable>,
}

impl Dictionary {
    pub fn new(variables: Vec<Variable>) -> Self {
        Self { variables }
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables
            .iter()
            .find(|variable| variable.name.eq_ignore_ascii_case(name))
    }
}
