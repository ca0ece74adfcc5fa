use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Number of trailing characters left readable when a value is masked.
const VISIBLE_TAIL: usize = 2;

/// Wrapper for customer contact data. Debug and Display hide all but the last
/// two characters so the value can be passed to `tracing` macros safely.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T: fmt::Display> Masked<T> {
    fn masked(&self) -> String {
        let raw = self.0.to_string();
        let count = raw.chars().count();
        let tail: String = raw.chars().skip(count.saturating_sub(VISIBLE_TAIL)).collect();
        format!("********{}", tail)
    }
}

impl<T: fmt::Display> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl<T: fmt::Display> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // The hand-off payload needs the real number; only formatting is masked.
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl From<&str> for Masked<String> {
    fn from(value: &str) -> Self {
        Masked(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_contact_number() {
        let contact = Masked("9876543210".to_string());
        assert_eq!(format!("{:?}", contact), "********10");
        assert_eq!(contact.to_string(), "********10");
        assert_eq!(contact.expose(), "9876543210");
    }

    #[test]
    fn test_short_values_are_still_masked() {
        let contact = Masked("7".to_string());
        assert_eq!(format!("{:?}", contact), "********7");
    }

    #[test]
    fn test_serialization_keeps_value() {
        let contact = Masked::from("9876543210");
        assert_eq!(serde_json::to_string(&contact).unwrap(), "\"9876543210\"");

        let parsed: Masked<String> = serde_json::from_str("\"0123456789\"").unwrap();
        assert_eq!(parsed.into_inner(), "0123456789");
    }
}
