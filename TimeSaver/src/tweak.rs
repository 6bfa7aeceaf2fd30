//! Planned attribute changes

use std::fmt;

use serde::Serialize;
use wldata::bvc::round6;

/// New value for an attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TweakValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for TweakValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One attribute of one object, and what to set it to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeTweak {
    pub object: String,
    pub attribute: String,
    pub value: TweakValue,
}

impl AttributeTweak {
    /// Numeric tweak, rounded to 6 decimal places
    pub fn number(object: impl Into<String>, attribute: impl Into<String>, value: f64) -> Self {
        Self {
            object: object.into(),
            attribute: attribute.into(),
            value: TweakValue::Number(round6(value)),
        }
    }

    pub fn text(object: impl Into<String>, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            attribute: attribute.into(),
            value: TweakValue::Text(value.into()),
        }
    }

    /// The numeric value, if this is a numeric tweak
    pub fn as_f64(&self) -> Option<f64> {
        match self.value {
            TweakValue::Number(n) => Some(n),
            TweakValue::Text(_) => None,
        }
    }
}

/// `object<TAB>attribute<TAB>value`
impl fmt::Display for AttributeTweak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.object, self.attribute, self.value)
    }
}
