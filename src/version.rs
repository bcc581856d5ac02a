//! Stack version normalization and comparison.

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

/// A normalized stack version such as `2.2.0.0`.
///
/// Components are unbounded non-negative integers kept as digit strings
/// without leading zeros. Ordering ignores trailing zero components, so
/// `2.2.0.0 == 2.2`.
#[derive(Debug, Clone, Eq)]
pub struct StackVersion {
    parts: Vec<String>,
}

impl StackVersion {
    /// The platform version at which the `/usr/hdp/current` layout begins.
    pub fn threshold() -> Self {
        Self {
            parts: ["2", "2", "0", "0"].map(String::from).to_vec(),
        }
    }

    /// Normalizes a raw version string from the host.
    ///
    /// Anything after the first `-` is dropped, then leading and trailing
    /// non-digits and surrounding dots. The rest must be digits and dots.
    /// Two- and three-component versions are zero-padded to four; other
    /// lengths are kept as they are. Returns `None` for anything else.
    pub fn format(raw: &str) -> Option<Self> {
        let head = raw.split('-').next().unwrap_or_default();
        let trimmed = head
            .trim_start_matches(|c: char| !c.is_ascii_digit())
            .trim_end_matches(|c: char| !c.is_ascii_digit())
            .trim_matches('.');
        if trimmed.is_empty() {
            return None;
        }

        let mut parts = trimmed
            .split('.')
            .map(normalize_component)
            .collect::<Option<Vec<_>>>()?;
        if matches!(parts.len(), 2 | 3) {
            parts.resize(4, "0".to_string());
        }
        Some(Self { parts })
    }

    /// Whether this version selects the current (versioned) layout.
    pub fn at_or_above_threshold(&self) -> bool {
        *self >= Self::threshold()
    }

    fn significant(&self) -> &[String] {
        let len = self
            .parts
            .iter()
            .rposition(|p| p != "0")
            .map_or(0, |i| i + 1);
        &self.parts[..len]
    }
}

/// Strips leading zeros from an all-digit component.
fn normalize_component(part: &str) -> Option<String> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let stripped = part.trim_start_matches('0');
    Some(if stripped.is_empty() { "0" } else { stripped }.to_string())
}

impl PartialEq for StackVersion {
    fn eq(&self, other: &Self) -> bool {
        self.significant() == other.significant()
    }
}

impl Ord for StackVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        // Without leading zeros, a longer digit string is the larger number.
        let key = |p: &String| (p.len(), p.clone());
        self.significant()
            .iter()
            .map(key)
            .cmp(other.significant().iter().map(key))
    }
}

impl PartialOrd for StackVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for StackVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

impl Serialize for StackVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
