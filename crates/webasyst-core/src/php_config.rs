//! Reader for Webasyst PHP configuration files.
//!
//! Configuration files such as `lib/config/app.php` end in a
//! `return array(...);` or `return [...];` statement. This module extracts
//! flat `'key' => value` pairs from that statement with pattern matching; it
//! is not a PHP parser.
//!
//! Three value shapes are recognized and scanned in this order: single-quoted
//! strings, booleans (case-insensitive), and non-negative integers. A key
//! matched by a later scan overwrites the earlier value. Anything else
//! (nested arrays, floats, escaped quotes, wrapped values such as
//! `/*_w*/('Name')`) is left out.
//!
//! # Examples
//!
//! ```
//! use webasyst_core::php_config::{parse_php_config, ConfigValue};
//!
//! let config = parse_php_config(
//!     "<?php return array('name' => 'Foo', 'enabled' => true, 'count' => 3);",
//! );
//! assert_eq!(config.get("name"), Some(&ConfigValue::String("Foo".into())));
//! assert_eq!(config.get("enabled"), Some(&ConfigValue::Bool(true)));
//! assert_eq!(config.get("count"), Some(&ConfigValue::Integer(3)));
//! ```

use crate::{Result, fs};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

static RETURN_BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)return\s+(array\s*\(.*?\)|\[.*?\]);").expect("valid return-body pattern")
});

static STRING_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"'([^']+)'\s*=>\s*'([^']*)'").expect("valid string-pair pattern")
});

static BOOL_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)'([^']+)'\s*=>\s*(true|false)").expect("valid bool-pair pattern")
});

static INT_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"'([^']+)'\s*=>\s*(\d+)").expect("valid int-pair pattern")
});

/// A scalar configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Single-quoted string literal
    String(String),
    /// `true` / `false` in any letter case
    Bool(bool),
    /// Run of decimal digits
    Integer(i64),
}

impl ConfigValue {
    /// Returns the string payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
        }
    }
}

/// Flat key to value mapping read from a PHP config file.
pub type ConfigMap = BTreeMap<String, ConfigValue>;

/// Extracts flat key/value pairs from PHP source text.
///
/// Returns an empty map when no `return` statement is found.
#[must_use]
pub fn parse_php_config(source: &str) -> ConfigMap {
    let mut config = ConfigMap::new();

    let Some(body) = RETURN_BODY.captures(source).and_then(|c| c.get(1)) else {
        return config;
    };
    let body = body.as_str();

    for caps in STRING_PAIR.captures_iter(body) {
        config.insert(
            caps[1].to_string(),
            ConfigValue::String(caps[2].to_string()),
        );
    }

    for caps in BOOL_PAIR.captures_iter(body) {
        let value = caps[2].eq_ignore_ascii_case("true");
        config.insert(caps[1].to_string(), ConfigValue::Bool(value));
    }

    for caps in INT_PAIR.captures_iter(body) {
        // digit runs beyond i64 are dropped
        if let Ok(value) = caps[2].parse::<i64>() {
            config.insert(caps[1].to_string(), ConfigValue::Integer(value));
        }
    }

    config
}

/// Reads and parses a PHP config file.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] if the file cannot be read.
pub fn read_php_config(path: &Path) -> Result<ConfigMap> {
    let source = fs::read_file(path)?;
    Ok(parse_php_config(&source))
}
