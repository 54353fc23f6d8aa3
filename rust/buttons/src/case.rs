// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Letter-case transforms for names.

use std::fmt;
use std::str::FromStr;

use crate::error::ButtonError;

/// Characters the host refuses in view and sheet names.
pub const PROHIBITED_NAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|', '{', '}'];

/// A case transform applied to a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseTransform {
    /// `basement storage`
    Lower,
    /// `BASEMENT STORAGE`
    Upper,
    /// `Basement storage`
    Sentence,
    /// `Basement Storage`
    Title,
    /// `BasementStorage`
    CamelJoin,
}

impl CaseTransform {
    pub const ALL: &'static [CaseTransform] = &[
        CaseTransform::Lower,
        CaseTransform::Upper,
        CaseTransform::Sentence,
        CaseTransform::Title,
        CaseTransform::CamelJoin,
    ];

    /// Transforms `name`.
    ///
    /// # Example
    ///
    /// ```
    /// use archforge_buttons::CaseTransform;
    ///
    /// assert_eq!(CaseTransform::Title.apply("level 1  PLAN"), "Level 1 Plan");
    /// assert_eq!(CaseTransform::CamelJoin.apply("level 1 plan"), "Level1Plan");
    /// ```
    pub fn apply(&self, name: &str) -> String {
        match self {
            CaseTransform::Lower => name.to_lowercase(),
            CaseTransform::Upper => name.to_uppercase(),
            CaseTransform::Sentence => capitalize(name),
            CaseTransform::Title => name.split_whitespace().map(capitalize).collect::<Vec<_>>().join(" "),
            CaseTransform::CamelJoin => name.split_whitespace().map(capitalize).collect(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseTransform::Lower => "lower",
            CaseTransform::Upper => "upper",
            CaseTransform::Sentence => "sentence",
            CaseTransform::Title => "title",
            CaseTransform::CamelJoin => "camel",
        }
    }
}

impl fmt::Display for CaseTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseTransform {
    type Err = ButtonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lower" | "lowercase" => Ok(CaseTransform::Lower),
            "upper" | "uppercase" => Ok(CaseTransform::Upper),
            "sentence" => Ok(CaseTransform::Sentence),
            "title" | "pascal" => Ok(CaseTransform::Title),
            "camel" | "camel-join" => Ok(CaseTransform::CamelJoin),
            other => Err(ButtonError::InvalidInput(format!("unknown case transform {other:?}"))),
        }
    }
}

/// First character upper case, the rest lower case.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// True if the host accepts `name` for a view or sheet.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(PROHIBITED_NAME_CHARS)
}
