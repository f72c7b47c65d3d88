use crate::error::{Result, XtringError};
use regex::{Regex, RegexBuilder};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const RC_FILE_NAME: &str = ".xtringrc";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RcConfig {
    pub ignore_case: bool,
    /// `^` and `$` match at line boundaries.
    pub multi_line: bool,
    /// `.` also matches `\n`.
    pub dot_all: bool,
    /// Whitespace and `#` comments in patterns are ignored.
    pub verbose: bool,
}

impl RcConfig {
    /// Compiles `pattern` with these settings.
    pub fn compile(&self, pattern: &str) -> Result<Regex> {
        RegexBuilder::new(pattern)
            .case_insensitive(self.ignore_case)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_all)
            .ignore_whitespace(self.verbose)
            .build()
            .map_err(|e| XtringError::invalid_pattern(pattern, e))
    }
}

pub struct RcLoader;

impl RcLoader {
    /// Get the path to the RC file
    /// Looks for .xtringrc in:
    /// 1. Current directory
    /// 2. Home directory (~/.xtringrc)
    pub fn get_rc_path() -> Option<PathBuf> {
        let current_rc = Path::new(RC_FILE_NAME);
        if current_rc.exists() {
            return Some(current_rc.to_path_buf());
        }

        if let Ok(home) = env::var("HOME") {
            let home_rc = Path::new(&home).join(RC_FILE_NAME);
            if home_rc.exists() {
                return Some(home_rc);
            }
        }

        None
    }

    pub fn load_config() -> RcConfig {
        match Self::get_rc_path() {
            Some(rc_path) => Self::load_from(&rc_path),
            None => RcConfig::default(),
        }
    }

    /// Load settings from a specific file, falling back to defaults if it
    /// cannot be read.
    pub fn load_from(rc_path: &Path) -> RcConfig {
        let mut config = RcConfig::default();

        match fs::read_to_string(rc_path) {
            Ok(content) => {
                log::debug!("loading settings from {}", rc_path.display());
                Self::parse_config_content(&content, &mut config);
            }
            Err(e) => {
                log::warn!("could not read {}: {e}", rc_path.display());
            }
        }

        config
    }

    fn parse_config_content(content: &str, config: &mut RcConfig) {
        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') || line.starts_with('"') {
                continue;
            }

            Self::parse_config_line(line, config);
        }
    }

    fn parse_config_line(line: &str, config: &mut RcConfig) {
        // Remove inline comments
        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        }
        .trim();

        if let Some(stripped) = line.strip_prefix("set ") {
            let setting = stripped.trim();
            let (name, enabled) = match setting.strip_prefix("no") {
                Some(name) => (name, false),
                None => (setting, true),
            };

            match name {
                "ignorecase" | "ic" => config.ignore_case = enabled,
                "multiline" | "ml" => config.multi_line = enabled,
                "dotall" | "dot" => config.dot_all = enabled,
                "verbose" | "x" => config.verbose = enabled,
                _ => log::debug!("ignoring unknown setting `{setting}`"),
            }
        } else if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let Some(enabled) = Self::parse_flag(value.trim()) else {
                log::debug!("ignoring invalid value for `{key}`");
                return;
            };

            match key {
                "ignorecase" | "ignore_case" => config.ignore_case = enabled,
                "multiline" | "multi_line" => config.multi_line = enabled,
                "dotall" | "dot_all" => config.dot_all = enabled,
                "verbose" => config.verbose = enabled,
                _ => log::debug!("ignoring unknown setting `{key}`"),
            }
        }
    }

    fn parse_flag(value: &str) -> Option<bool> {
        match value {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        }
    }

    pub fn generate_sample_rc() -> String {
        r#"# xtring configuration file (.xtringrc)
# Lines starting with # or " are comments

# Pattern matching
set ignorecase         # Case-insensitive patterns (or set noignorecase)
set nomultiline        # ^ and $ match only at the ends of the text
set nodotall           # . does not match newlines
set noverbose          # Whitespace in patterns is significant

# Alternative key=value syntax:
# ignore_case=true
# multi_line=false
# dot_all=false
# verbose=false
"#
        .to_string()
    }
}
