// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed built-in parameters attached to elements.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// The built-in parameters the pushbuttons read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltInParameter {
    WallBaseOffset,
    SillHeight,
    HeightOffsetFromLevel,
    RoomName,
    RoomNumber,
    DoorNumber,
    Mark,
}

impl BuiltInParameter {
    /// Label shown in the host's properties palette.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltInParameter::WallBaseOffset => "Base Offset",
            BuiltInParameter::SillHeight => "Sill Height",
            BuiltInParameter::HeightOffsetFromLevel => "Height Offset From Level",
            BuiltInParameter::RoomName => "Name",
            BuiltInParameter::RoomNumber => "Number",
            BuiltInParameter::DoorNumber => "Door Number",
            BuiltInParameter::Mark => "Mark",
        }
    }
}

impl std::fmt::Display for BuiltInParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Double(f64),
    Int(i64),
    Text(String),
}

impl ParamValue {
    /// Numeric view of the value. Integers widen to `f64`; text is `None`.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            ParamValue::Double(v) => Some(*v),
            ParamValue::Int(v) => Some(*v as f64),
            ParamValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Double(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

/// Parameter table of a single element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(FxHashMap<BuiltInParameter, ParamValue>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, param: BuiltInParameter) -> Option<&ParamValue> {
        self.0.get(&param)
    }

    /// Sets a value, returning the previous one.
    pub fn set(&mut self, param: BuiltInParameter, value: impl Into<ParamValue>) -> Option<ParamValue> {
        self.0.insert(param, value.into())
    }

    pub fn remove(&mut self, param: BuiltInParameter) -> Option<ParamValue> {
        self.0.remove(&param)
    }

    pub fn contains(&self, param: BuiltInParameter) -> bool {
        self.0.contains_key(&param)
    }

    pub fn double(&self, param: BuiltInParameter) -> Option<f64> {
        self.get(param).and_then(ParamValue::as_double)
    }

    pub fn text(&self, param: BuiltInParameter) -> Option<&str> {
        self.get(param).and_then(ParamValue::as_text)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BuiltInParameter, &ParamValue)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }
}
