//! View mode types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the current page is rendered.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One card per user.
    #[default]
    Grid,
    /// One row per user, with column headers.
    Table,
}

impl ViewMode {
    /// Flip between grid and table.
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::Table,
            ViewMode::Table => ViewMode::Grid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::Table => "table",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "grid" => Ok(ViewMode::Grid),
            "table" => Ok(ViewMode::Table),
            other => Err(format!("unknown view mode '{}'", other)),
        }
    }
}
