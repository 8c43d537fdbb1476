//! The single-row feature table handed to a model.

use core::fmt;

/// A single feature value.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Number(f64),
    Category(String),
}

impl FeatureValue {
    /// Returns the numeric value, if this is a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Category(_) => None,
        }
    }

    /// Returns the category token, if this is a category.
    #[must_use]
    pub fn as_category(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Category(c) => Some(c),
        }
    }

    /// Parses a value read back from a flat file when its column kind is
    /// unknown: finite numbers stay numbers, everything else (including
    /// `inf` and `NaN`) is a category.
    #[must_use]
    pub fn parse_lossy(raw: &str) -> Self {
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => Self::Number(n),
            _ => Self::Category(raw.to_string()),
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Category(c) => f.write_str(c),
        }
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for FeatureValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        Self::Category(value.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        Self::Category(value)
    }
}

/// Ordered mapping from feature name to value.
///
/// Order matters: it must match the order the model was trained with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRecord {
    fields: Vec<(String, FeatureValue)>,
}

impl FeatureRecord {
    /// Creates an empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Appends a field, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FeatureValue>) -> Self {
        self.push(name, value);
        self
    }

    /// Appends a field.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<FeatureValue>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Field names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Fields in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the number of fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if there are no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_order() {
        let record = FeatureRecord::new()
            .with("b", 1.0)
            .with("a", "Dog")
            .with("c", 3_u32);

        assert_eq!(record.names().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(record.len(), 3);
        assert_eq!(record.get("a").and_then(FeatureValue::as_category), Some("Dog"));
        assert_eq!(record.get("c").and_then(FeatureValue::as_number), Some(3.0));
        assert!(record.get("missing").is_none());
    }

    #[test]
    fn test_parse_lossy() {
        assert_eq!(FeatureValue::parse_lossy("365"), FeatureValue::Number(365.0));
        assert_eq!(
            FeatureValue::parse_lossy("Pit Bull Mix"),
            FeatureValue::Category("Pit Bull Mix".to_string())
        );
        assert_eq!(FeatureValue::Number(365.0).to_string(), "365");
    }

    #[test]
    fn test_parse_lossy_keeps_non_finite_text() {
        for raw in ["inf", "-inf", "NaN", "infinity"] {
            assert_eq!(
                FeatureValue::parse_lossy(raw),
                FeatureValue::Category(raw.to_string()),
                "{raw}"
            );
        }
    }
}
