//! Validated primitive text types shared across the MedView crates.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// Wraps a `String` and ensures it contains at least one non-whitespace
/// character. The input is trimmed of leading and trailing whitespace during
/// construction, so the invariant holds for the stored value as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, `TextError::Empty` is returned.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A diagnosis code such as `M24.2` or `Z57.1`.
///
/// Codes are opaque keys into the diagnosis directory: they are trimmed and
/// must be non-empty, but no terminology-specific syntax is enforced. An
/// entry may carry a code the directory does not know; display degrades to a
/// placeholder in that case rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiagnosisCode(String);

impl DiagnosisCode {
    /// Creates a new `DiagnosisCode`, trimming surrounding whitespace.
    ///
    /// Returns `TextError::Empty` if nothing remains after trimming.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DiagnosisCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DiagnosisCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for DiagnosisCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for DiagnosisCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DiagnosisCode::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_and_keeps_content() {
        let text = NonEmptyText::new("  annual check  ").expect("valid text");
        assert_eq!(text.as_str(), "annual check");
    }

    #[test]
    fn non_empty_text_rejects_whitespace_only() {
        assert!(matches!(NonEmptyText::new("   "), Err(TextError::Empty)));
        assert!(matches!(NonEmptyText::new(""), Err(TextError::Empty)));
    }

    #[test]
    fn non_empty_text_serde_round_trip() {
        let text = NonEmptyText::new("Dr House").expect("valid text");
        let json = serde_json::to_string(&text).expect("serialize");
        assert_eq!(json, "\"Dr House\"");
        let back: NonEmptyText = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, text);
    }

    #[test]
    fn non_empty_text_deserialize_rejects_empty() {
        let result: Result<NonEmptyText, _> = serde_json::from_str("\"  \"");
        assert!(result.is_err());
    }

    #[test]
    fn diagnosis_code_trims_input() {
        let code = DiagnosisCode::new(" M24.2 ").expect("valid code");
        assert_eq!(code.as_str(), "M24.2");
        assert_eq!(code.to_string(), "M24.2");
    }

    #[test]
    fn diagnosis_code_rejects_empty() {
        assert!(matches!(DiagnosisCode::new(""), Err(TextError::Empty)));
    }
}
