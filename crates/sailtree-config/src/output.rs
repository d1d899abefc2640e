//! Output formatting configuration.

use serde::{Deserialize, Serialize};

/// Output configuration for the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputConfig {
    /// Default tree output format: "sexp", "json", or "ranges".
    /// Default: "sexp"
    #[serde(default = "default_format")]
    pub format: String,

    /// Whether range listings include byte offsets.
    /// Default: true
    #[serde(default = "default_true")]
    pub spans: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            spans: true,
        }
    }
}

impl OutputConfig {
    /// Merge another OutputConfig into this one.
    ///
    /// TOML doesn't distinguish "not set" from "set to default", so all
    /// values are copied from `other`; override files should carry only
    /// the sections the user wants to change.
    pub fn merge(&mut self, other: &OutputConfig) {
        self.format = other.format.clone();
        self.spans = other.spans;
    }
}

fn default_format() -> String {
    "sexp".to_string()
}

fn default_true() -> bool {
    true
}
