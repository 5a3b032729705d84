use serde::{Deserialize, Serialize};

use crate::domain::common::FieldErrors;
use crate::guid_type;

/// Namespace used for ISO currencies and any other cash-like commodity.
pub const CURRENCY_NAMESPACE: &str = "CURRENCY";

/// Upper bound on mnemonic length (ticker symbols and ISO codes fit easily).
pub const MNEMONIC_MAX_LEN: usize = 10;

/// Currencies offered by the currency form before the user types their own.
pub const DEFAULT_CURRENCIES: [&str; 3] = ["EUR", "USD", "SGD"];

// ============================================================================
// ID Type
// ============================================================================

guid_type!(
    /// Уникальный идентификатор товара/валюты
    CommodityId
);

// ============================================================================
// Aggregate Root
// ============================================================================

/// Commodity: a currency, stock or fund the book can hold amounts of.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commodity {
    pub guid: CommodityId,
    pub namespace: String,
    pub mnemonic: String,
}

impl Commodity {
    /// Build a commodity for insertion from an already validated DTO.
    pub fn new_for_insert(dto: &CommodityDto) -> Self {
        Self {
            guid: CommodityId::new_v4(),
            namespace: dto.namespace.trim().to_string(),
            mnemonic: dto.normalized_mnemonic().unwrap_or_default(),
        }
    }

    pub fn is_currency(&self) -> bool {
        self.namespace == CURRENCY_NAMESPACE
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.guid.to_string()
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания commodity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommodityDto {
    pub namespace: String,
    pub mnemonic: Option<String>,
}

impl Default for CommodityDto {
    fn default() -> Self {
        Self::currency()
    }
}

impl CommodityDto {
    /// Empty currency form: namespace fixed, mnemonic not chosen yet.
    pub fn currency() -> Self {
        Self {
            namespace: CURRENCY_NAMESPACE.to_string(),
            mnemonic: None,
        }
    }

    pub fn with_mnemonic(mut self, mnemonic: impl Into<String>) -> Self {
        self.mnemonic = Some(mnemonic.into());
        self
    }

    /// Mnemonic as it will be stored: trimmed, upper-cased for currencies.
    pub fn normalized_mnemonic(&self) -> Option<String> {
        let trimmed = self.mnemonic.as_deref()?.trim();
        if trimmed.is_empty() {
            return None;
        }
        if self.namespace.trim() == CURRENCY_NAMESPACE {
            Some(trimmed.to_uppercase())
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Валидация: по одной (первой) ошибке на поле.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.namespace.trim().is_empty() {
            errors.add("namespace", "Namespace is required");
        }

        match self.mnemonic.as_deref().map(str::trim) {
            None | Some("") => errors.add("mnemonic", "Mnemonic is required"),
            Some(m) => {
                if m.chars().any(char::is_whitespace) {
                    errors.add("mnemonic", "Mnemonic must not contain spaces");
                }
                if m.chars().count() > MNEMONIC_MAX_LEN {
                    errors.add(
                        "mnemonic",
                        format!("Mnemonic must be at most {} characters", MNEMONIC_MAX_LEN),
                    );
                }
            }
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_dto_requires_mnemonic() {
        let errors = CommodityDto::currency().validate().unwrap_err();
        assert_eq!(errors.get("mnemonic"), Some("Mnemonic is required"));
        assert_eq!(errors.get("namespace"), None);

        let blank = CommodityDto::currency().with_mnemonic("   ");
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_mnemonic_rules_stop_at_first_error() {
        let dto = CommodityDto::currency().with_mnemonic("A VERY LONG CODE");
        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("mnemonic"), Some("Mnemonic must not contain spaces"));

        let dto = CommodityDto::currency().with_mnemonic("ABCDEFGHIJK");
        let errors = dto.validate().unwrap_err();
        assert_eq!(
            errors.get("mnemonic"),
            Some("Mnemonic must be at most 10 characters")
        );
    }

    #[test]
    fn test_namespace_required() {
        let dto = CommodityDto {
            namespace: " ".into(),
            mnemonic: Some("AAPL".into()),
        };
        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.get("namespace"), Some("Namespace is required"));
    }

    #[test]
    fn test_new_for_insert_normalizes_currency_code() {
        let dto = CommodityDto::currency().with_mnemonic(" eur ");
        assert!(dto.validate().is_ok());

        let commodity = Commodity::new_for_insert(&dto);
        assert_eq!(commodity.mnemonic, "EUR");
        assert_eq!(commodity.namespace, CURRENCY_NAMESPACE);
        assert!(commodity.is_currency());
    }

    #[test]
    fn test_non_currency_keeps_case() {
        let dto = CommodityDto {
            namespace: "STOCK".into(),
            mnemonic: Some("Brk.b".into()),
        };
        let commodity = Commodity::new_for_insert(&dto);
        assert_eq!(commodity.mnemonic, "Brk.b");
        assert!(!commodity.is_currency());
    }

    #[test]
    fn test_guid_serializes_as_plain_string() {
        let commodity = Commodity::new_for_insert(&CommodityDto::currency().with_mnemonic("USD"));
        let json = serde_json::to_value(&commodity).unwrap();
        assert_eq!(json["guid"], serde_json::json!(commodity.to_string_id()));
        assert_eq!(json["mnemonic"], "USD");
    }
}
