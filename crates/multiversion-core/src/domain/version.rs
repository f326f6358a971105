//! Version ordering for version-like selection values.
//!
//! Two schemes are supported:
//! - **Loose**: any string; runs of digits become numeric components, runs of
//!   letters become text components, everything else separates. `6.7 < 6.7.0`.
//! - **Strict**: `major.minor[.patch][a|bN]`; patch defaults to 0 and a
//!   pre-release sorts before its release. `6.7 == 6.7.0`, `1.0a1 < 1.0`.
//!   Strings that are not strict versions fall back to the loose parse.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DispatchError;

/// One piece of a version. Numbers order before text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Component {
    Number(u64),
    Text(String),
}

/// Which parser a version normalizer applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionScheme {
    #[default]
    #[serde(alias = "version", alias = "looseversion", alias = "loose_version")]
    Loose,
    #[serde(alias = "strictversion", alias = "strict_version")]
    Strict,
}

impl VersionScheme {
    pub fn parse_version(self, raw: &str) -> Version {
        match self {
            VersionScheme::Loose => Version::loose(raw),
            VersionScheme::Strict => Version::strict(raw),
        }
    }
}

impl FromStr for VersionScheme {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "version" | "looseversion" | "loose_version" | "loose" => Ok(VersionScheme::Loose),
            "strictversion" | "strict_version" | "strict" => Ok(VersionScheme::Strict),
            other => Err(DispatchError::UnknownNormalizer(other.to_string())),
        }
    }
}

/// A parsed version. Equality and ordering ignore the raw text.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    components: Vec<Component>,
    pre_release: Option<(char, u64)>,
}

impl Version {
    pub fn loose(raw: &str) -> Self {
        let mut components = Vec::new();
        let mut chars = raw.chars().peekable();
        while let Some(&c) = chars.peek() {
            if c.is_ascii_digit() {
                let mut digits = String::new();
                while let Some(&d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                    digits.push(d);
                    chars.next();
                }
                components.push(number_or_text(digits));
            } else if c.is_alphabetic() {
                let mut text = String::new();
                while let Some(&a) = chars.peek().filter(|a| a.is_alphabetic()) {
                    text.push(a);
                    chars.next();
                }
                components.push(Component::Text(text));
            } else {
                chars.next();
            }
        }
        Self {
            raw: raw.to_string(),
            components,
            pre_release: None,
        }
    }

    pub fn strict(raw: &str) -> Self {
        match parse_strict(raw) {
            Some((release, pre_release)) => Self {
                raw: raw.to_string(),
                components: release.into_iter().map(Component::Number).collect(),
                pre_release,
            },
            None => Self::loose(raw),
        }
    }

    /// The whole string as one text component: plain string ordering.
    pub fn literal(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            components: vec![Component::Text(raw.to_string())],
            pre_release: None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }
}

// Out-of-range digit runs stay comparable as text.
fn number_or_text(digits: String) -> Component {
    match digits.parse::<u64>() {
        Ok(n) => Component::Number(n),
        Err(_) => Component::Text(digits),
    }
}

fn parse_strict(raw: &str) -> Option<([u64; 3], Option<(char, u64)>)> {
    let (release, pre_release) = match raw.find(['a', 'b']) {
        Some(idx) => {
            let marker = raw[idx..].chars().next()?;
            let number = &raw[idx + 1..];
            if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            (&raw[..idx], Some((marker, number.parse().ok()?)))
        }
        None => (raw, None),
    };

    let parts: Vec<&str> = release.split('.').collect();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }
    let mut numbers = [0u64; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *slot = part.parse().ok()?;
    }
    Some((numbers, pre_release))
}

impl FromStr for Version {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Version::loose(s))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.components.hash(state);
        self.pre_release.hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.components
            .cmp(&other.components)
            .then_with(|| match (&self.pre_release, &other.pre_release) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}
