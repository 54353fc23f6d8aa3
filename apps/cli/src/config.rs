// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI configuration loaded from environment variables.

use archforge_model::Color;

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Tracing filter directive.
    pub log_filter: String,
    /// Color used by the checker buttons for flagged elements.
    pub highlight: Color,
    /// Answer Yes to every confirmation unless `--no` is given.
    pub assume_yes: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            log_filter: std::env::var("ARCHFORGE_LOG")
                .or_else(|_| std::env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".into()),
            highlight: std::env::var("ARCHFORGE_HIGHLIGHT")
                .ok()
                .and_then(|value| parse_color(&value))
                .unwrap_or(Color::RED),
            assume_yes: std::env::var("ARCHFORGE_ASSUME_YES")
                .unwrap_or_else(|_| "false".into())
                .parse()
                .unwrap_or(false),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Parses `r,g,b` with components in `0..=255`.
pub fn parse_color(value: &str) -> Option<Color> {
    let mut parts = value.split(',').map(|part| part.trim().parse::<u8>());
    let (r, g, b) = (parts.next()?.ok()?, parts.next()?.ok()?, parts.next()?.ok()?);
    if parts.next().is_some() {
        return None;
    }
    Some(Color::new(r, g, b))
}
