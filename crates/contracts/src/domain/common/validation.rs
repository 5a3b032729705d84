use std::collections::BTreeMap;
use std::fmt;

/// Ошибки валидации формы: поле -> первое сообщение об ошибке.
///
/// Only the first failure per field is kept, so later checks on an already
/// invalid field never overwrite the message the user sees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error unless the field already has one.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// First error in field order, used where only one message fits (HTTP 400 body).
    pub fn first(&self) -> Option<(&str, &str)> {
        self.0
            .iter()
            .next()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    /// Ok when nothing was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_first_error_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("mnemonic", "Mnemonic is required");
        errors.add("mnemonic", "Mnemonic must not contain spaces");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("mnemonic"), Some("Mnemonic is required"));
    }

    #[test]
    fn test_into_result() {
        assert!(FieldErrors::new().into_result().is_ok());

        let mut errors = FieldErrors::new();
        errors.add("namespace", "Namespace is required");
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.first(), Some(("namespace", "Namespace is required")));
        assert_eq!(err.to_string(), "namespace: Namespace is required");
    }
}
