use indexmap::IndexMap;
use std::fmt;

/// The IEC 61499 elementary types a GNU Radio parameter can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IecType {
    Int,
    Real,
    Bool,
    Complex,
    String,
}

impl IecType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IecType::Int => "INT",
            IecType::Real => "REAL",
            IecType::Bool => "BOOL",
            IecType::Complex => "COMPLEX",
            IecType::String => "STRING",
        }
    }

    /// The type name as written in a declaration. `COMPLEX` is a structured type and
    /// lives in the generated package.
    pub fn qualified_name(&self, package: &str) -> String {
        match self {
            IecType::Complex => format!("{}::{}", package, self.as_str()),
            other => other.as_str().to_string(),
        }
    }

    /// Whether a value of this type is written unquoted in a network parameter.
    pub fn is_literal(&self) -> bool {
        matches!(self, IecType::Int | IecType::Real | IecType::Bool)
    }
}

impl fmt::Display for IecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value carried by a classified parameter. Only REAL values are coerced.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Text(String),
    Real(f64),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Text(text) => f.write_str(text),
            ParameterValue::Real(n) => write!(f, "{:?}", n),
        }
    }
}

/// A block parameter after type inference.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedParameter {
    pub name: String,
    pub value: ParameterValue,
    pub kind: IecType,
}

/// Classifies a raw parameter value. The first matching rule wins:
///
/// 1. digits only -> `INT` (so `-5` and `1,000` are not integers)
/// 2. parses as a float -> `REAL`, value coerced
/// 3. `True` / `False` -> `BOOL`
/// 4. `COMPLEX` -> `COMPLEX`
/// 5. anything else -> `STRING`
pub fn classify(raw: &str) -> (IecType, ParameterValue) {
    if is_digits(raw) {
        return (IecType::Int, ParameterValue::Text(raw.to_string()));
    }
    if let Some(number) = parse_real(raw) {
        return (IecType::Real, ParameterValue::Real(number));
    }
    let kind = match raw {
        "True" | "False" => IecType::Bool,
        "COMPLEX" => IecType::Complex,
        _ => IecType::String,
    };
    (kind, ParameterValue::Text(raw.to_string()))
}

/// Classifies every parameter of a block, keeping the parameter order.
pub fn infer_types(parameters: &IndexMap<String, String>) -> Vec<TypedParameter> {
    parameters
        .iter()
        .map(|(name, raw)| {
            let (kind, value) = classify(raw);
            TypedParameter {
                name: name.clone(),
                value,
                kind,
            }
        })
        .collect()
}

fn is_digits(raw: &str) -> bool {
    !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit())
}

/// Float parsing as GNU Radio's expression fields accept it: surrounding whitespace is
/// tolerated and `_` may group digits (`1_000.5`).
pub fn parse_real(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if !trimmed.contains('_') {
        return trimmed.parse::<f64>().ok();
    }

    let bytes = trimmed.as_bytes();
    let grouped = bytes.iter().enumerate().filter(|(_, b)| **b == b'_').all(|(i, _)| {
        i > 0 && i + 1 < bytes.len() && bytes[i - 1].is_ascii_digit() && bytes[i + 1].is_ascii_digit()
    });
    if grouped {
        trimmed.replace('_', "").parse::<f64>().ok()
    } else {
        None
    }
}

/// The item type flowing through a block's adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PayloadKind {
    Real,
    Complex,
}

impl PayloadKind {
    /// `complex` blocks carry COMPLEX samples; every other item type is carried as REAL.
    pub fn from_block_type(block_type: Option<&str>) -> Self {
        match block_type {
            Some("complex") => PayloadKind::Complex,
            _ => PayloadKind::Real,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadKind::Real => "REAL",
            PayloadKind::Complex => "COMPLEX",
        }
    }

    pub fn iec_type(&self) -> IecType {
        match self {
            PayloadKind::Real => IecType::Real,
            PayloadKind::Complex => IecType::Complex,
        }
    }

    pub fn adapter_name(&self) -> String {
        format!("GenericAdapter_{}", self.as_str())
    }
}
