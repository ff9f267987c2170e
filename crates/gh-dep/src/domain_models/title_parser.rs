//! Extracts `package@version` group keys from PR titles

use crate::error::{Error, Result};
use regex::Regex;

/// Group key for titles no pattern understands
pub const UNKNOWN_GROUP: &str = "unknown@unknown";

const BUILTIN_PATTERNS: [&str; 3] = [
    // "Bump serde from 1.0.1 to 1.0.2", "chore(deps): update: foo from 1 to 2.0"
    r"(?i)(?:bump|update)[:\s]+([^\s]+)\s+from\s+[^\s]+\s+to\s+v?(\d+\.\d+(?:\.\d+)?)",
    // "Update dependency foo to v2.1"
    r"(?i)update\s+(?:dependency\s+)?([^\s]+)\s+to\s+v?(\d+\.\d+(?:\.\d+)?)",
    // "foo to 2.1.0"
    r"(?i)([^\s:]+)\s+to\s+v?(\d+\.\d+(?:\.\d+)?)",
];

/// Ordered list of title patterns, custom ones first
#[derive(Debug, Clone)]
pub struct TitleParser {
    patterns: Vec<Regex>,
}

impl TitleParser {
    /// Build a parser trying `custom` patterns before the built-in ones
    pub fn new(custom: &[String]) -> Result<Self> {
        let mut patterns = Vec::with_capacity(custom.len() + BUILTIN_PATTERNS.len());
        for pattern in custom {
            let re = Regex::new(pattern)?;
            // captures_len counts the implicit whole-match group
            let groups = re.captures_len() - 1;
            if groups != 2 {
                return Err(Error::PatternGroups {
                    pattern: pattern.clone(),
                    groups,
                });
            }
            patterns.push(re);
        }
        for pattern in BUILTIN_PATTERNS {
            patterns.push(Regex::new(pattern)?);
        }
        Ok(Self { patterns })
    }

    /// Returns `(package, version)` or `None` if no pattern matches
    pub fn parse(&self, title: &str) -> Option<(String, String)> {
        self.patterns.iter().find_map(|re| {
            let caps = re.captures(title)?;
            let package = caps.get(1)?.as_str();
            let version = caps.get(2)?.as_str();
            Some((package.to_string(), version.to_string()))
        })
    }

    /// Group key for a title, `unknown@unknown` when unparseable
    pub fn group_key(&self, title: &str) -> String {
        match self.parse(title) {
            Some((package, version)) => format!("{}@{}", package, version),
            None => UNKNOWN_GROUP.to_string(),
        }
    }
}

impl Default for TitleParser {
    fn default() -> Self {
        Self {
            patterns: BUILTIN_PATTERNS
                .iter()
                .filter_map(|p| Regex::new(p).ok())
                .collect(),
        }
    }
}
