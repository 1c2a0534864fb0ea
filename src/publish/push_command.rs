//! `nuget push` command line
//!
//! The argument grammar is fixed by the NuGet CLI:
//!
//! ```text
//! push "<dir>/*.nupkg" -ApiKey "<key>" -Source "<source>" [-SkipDuplicate] [-NonInteractive] -Verbosity <level>
//! ```

use crate::core::config::{ConfigSettings, Verbosity};
use crate::staging::PACKAGE_EXTENSION;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::path::Path;

/// A `push` invocation built from configuration
#[derive(Debug)]
pub struct PushCommand {
    pub package_pattern: String,
    api_key: SecretString,
    pub source: String,
    pub skip_duplicate: bool,
    pub non_interactive: bool,
    pub verbosity: Verbosity,
}

impl PushCommand {
    /// Build the push of every artifact directly inside `staging_dir`
    pub fn new(staging_dir: &str, settings: &ConfigSettings) -> Self {
        let package_pattern = Path::new(staging_dir.trim())
            .join(format!("*.{}", PACKAGE_EXTENSION))
            .to_string_lossy()
            .into_owned();

        Self {
            package_pattern,
            api_key: settings.api_key(),
            source: settings.source().to_string(),
            skip_duplicate: settings.skip_duplicate(),
            non_interactive: settings.non_interactive(),
            verbosity: settings.verbosity(),
        }
    }

    /// Arguments for the tool, API key included. No shell is involved, so the
    /// package pattern reaches the tool unexpanded.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "push".to_string(),
            self.package_pattern.clone(),
            "-ApiKey".to_string(),
            self.api_key.expose_secret().to_string(),
            "-Source".to_string(),
            self.source.clone(),
        ];

        if self.skip_duplicate {
            args.push("-SkipDuplicate".to_string());
        }
        if self.non_interactive {
            args.push("-NonInteractive".to_string());
        }

        args.push("-Verbosity".to_string());
        args.push(self.verbosity.as_arg().to_string());

        args
    }
}

/// Quoted command line with the API key masked
impl fmt::Display for PushCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "push \"{}\" -ApiKey \"{}\" -Source \"{}\"",
            self.package_pattern,
            mask_secret(self.api_key.expose_secret()),
            self.source
        )?;
        if self.skip_duplicate {
            f.write_str(" -SkipDuplicate")?;
        }
        if self.non_interactive {
            f.write_str(" -NonInteractive")?;
        }
        write!(f, " -Verbosity {}", self.verbosity)
    }
}

/// Masks a secret for safe logging
///
/// Shows only the first 3 and last 3 characters. Secrets shorter than 10
/// characters are fully masked as "****".
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() < 10 {
        return "****".to_string();
    }

    let prefix: String = chars[..3].iter().collect();
    let suffix: String = chars[chars.len() - 3..].iter().collect();
    format!("{}...{}", prefix, suffix)
}
