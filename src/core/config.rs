//! Configuration settings for publish-packages
//!
//! Settings come from a flat `name=value` file. Values are kept raw and parsed
//! on access; anything missing or unparseable falls back to its default.

use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::fmt;

/// Path to the NuGet CLI executable
pub const NUGET_CLI_PATH: &str = "NuGetCLIPath";
/// Staging directory holding the packages to push
pub const PACKAGES_DIR_PATH: &str = "PackagesDirPath";
pub const API_KEY: &str = "ApiKey";
pub const SOURCE: &str = "Source";
pub const SKIP_DUPLICATE: &str = "SkipDuplicate";
pub const NON_INTERACTIVE: &str = "NonInteractive";
pub const VERBOSITY: &str = "Verbosity";

/// Publish tool verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    Minimal,
    #[default]
    Normal,
    Detailed,
}

impl Verbosity {
    /// Parse a configured value: the variant name (case-sensitive) or its
    /// ordinal `0`-`3`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Quiet" | "0" => Some(Self::Quiet),
            "Minimal" | "1" => Some(Self::Minimal),
            "Normal" | "2" => Some(Self::Normal),
            "Detailed" | "3" => Some(Self::Detailed),
            _ => None,
        }
    }

    /// Token passed to `-Verbosity`
    pub fn as_arg(&self) -> &'static str {
        match self {
            Self::Quiet => "quiet",
            Self::Minimal => "minimal",
            Self::Normal => "normal",
            Self::Detailed => "detailed",
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

/// Loaded configuration settings, immutable once parsed
///
/// `ApiKey` is held only as a [`SecretString`], never in the plain value map.
#[derive(Clone, Default)]
pub struct ConfigSettings {
    values: HashMap<String, String>,
    api_key: Option<SecretString>,
}

impl ConfigSettings {
    /// Parse config file content.
    ///
    /// Blank lines and lines starting with `;` or `[` are ignored, as are lines
    /// without `=`. The first `=` splits name from value, both trimmed. The
    /// first definition of a name wins.
    pub fn parse(content: &str) -> Self {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut values = HashMap::new();
        let mut api_key = None;

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with(';') || line.starts_with('[') {
                continue;
            }

            let Some((name, value)) = line.split_once('=') else {
                continue;
            };

            let (name, value) = (name.trim(), value.trim());
            if name == API_KEY {
                api_key.get_or_insert_with(|| SecretString::new(value.into()));
                continue;
            }

            values
                .entry(name.to_string())
                .or_insert_with(|| value.to_string());
        }

        Self { values, api_key }
    }

    /// Raw value of a setting. `ApiKey` is not available here; use
    /// [`ConfigSettings::api_key`].
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn nuget_cli_path(&self) -> &str {
        self.get(NUGET_CLI_PATH).unwrap_or_default()
    }

    pub fn packages_dir_path(&self) -> &str {
        self.get(PACKAGES_DIR_PATH).unwrap_or_default()
    }

    pub fn api_key(&self) -> SecretString {
        self.api_key.clone().unwrap_or_default()
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty())
    }

    pub fn source(&self) -> &str {
        self.get(SOURCE).unwrap_or_default()
    }

    pub fn skip_duplicate(&self) -> bool {
        self.bool_or(SKIP_DUPLICATE, true)
    }

    pub fn non_interactive(&self) -> bool {
        self.bool_or(NON_INTERACTIVE, true)
    }

    pub fn verbosity(&self) -> Verbosity {
        self.get(VERBOSITY)
            .and_then(Verbosity::parse)
            .unwrap_or_default()
    }

    fn bool_or(&self, name: &str, default: bool) -> bool {
        match self.get(name) {
            Some(value) if value.eq_ignore_ascii_case("true") => true,
            Some(value) if value.eq_ignore_ascii_case("false") => false,
            _ => default,
        }
    }
}

impl PartialEq for ConfigSettings {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
            && self.api_key.as_ref().map(ExposeSecret::expose_secret)
                == other.api_key.as_ref().map(ExposeSecret::expose_secret)
    }
}

impl Eq for ConfigSettings {}

impl fmt::Debug for ConfigSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.values.keys().collect();
        names.sort();

        let mut map = f.debug_map();
        if self.api_key.is_some() {
            map.entry(&API_KEY, &"[REDACTED]");
        }
        for name in names {
            map.entry(name, &self.values[name]);
        }
        map.finish()
    }
}
