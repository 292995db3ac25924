//! Version information reported by the server.
use serde::{Deserialize, Serialize};

/// Response of the `/version` endpoint
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    /// Major version, e.g. `1`
    #[serde(default)]
    pub major: String,
    /// Minor version, possibly suffixed, e.g. `29+`
    #[serde(default)]
    pub minor: String,
    /// Full version string, e.g. `v1.29.3`
    #[serde(default)]
    pub git_version: String,
    /// Commit the server was built from
    #[serde(default)]
    pub git_commit: String,
    /// `clean` or `dirty`
    #[serde(default)]
    pub git_tree_state: String,
    /// Build timestamp as reported
    #[serde(default)]
    pub build_date: String,
    /// Go toolchain version
    #[serde(default)]
    pub go_version: String,
    /// Compiler
    #[serde(default)]
    pub compiler: String,
    /// Target platform, e.g. `linux/amd64`
    #[serde(default)]
    pub platform: String,
}

impl Info {
    /// Numeric major and minor versions, ignoring vendor suffixes like `+`
    pub fn semantic(&self) -> Option<(u32, u32)> {
        fn leading_digits(s: &str) -> Option<u32> {
            let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
            s[..end].parse().ok()
        }
        Some((leading_digits(&self.major)?, leading_digits(&self.minor)?))
    }
}
