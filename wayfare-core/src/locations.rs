use serde::{Deserialize, Serialize};

/// Enumerated set of cities a form offers in its pickers.
/// Membership and identity are case-insensitive and ignore surrounding whitespace.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct LocationSet {
    names: Vec<String>,
}

impl LocationSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        names.sort_by_key(|n| normalize(n));
        names.dedup_by(|a, b| normalize(a) == normalize(b));
        Self { names }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.canonical(name).is_some()
    }

    /// The spelling stored in the set for `name`, if it is a member
    pub fn canonical(&self, name: &str) -> Option<&str> {
        let wanted = normalize(name);
        self.names
            .iter()
            .find(|n| normalize(n) == wanted)
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Whether two user-entered locations name the same place
pub fn same_location(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
