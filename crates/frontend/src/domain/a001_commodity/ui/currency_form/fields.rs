//! Описание полей формы.
//!
//! Each variant of [`FieldKind`] owns how a raw input becomes the form value
//! and which choices it offers; `view.rs` matches on it to render.

use contracts::domain::a001_commodity::aggregate::{
    CommodityDto, CURRENCY_NAMESPACE, DEFAULT_CURRENCIES,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Fixed value, never shown.
    Hidden { value: &'static str },
    /// Pick one of `options` or type a new code (upper-cased).
    CreatableSelect {
        options: &'static [&'static str],
        placeholder: &'static str,
    },
}

impl FieldKind {
    pub fn is_visible(&self) -> bool {
        !matches!(self, FieldKind::Hidden { .. })
    }

    /// Value the form starts with; `None` means "not chosen".
    pub fn initial_value(&self) -> Option<String> {
        match self {
            FieldKind::Hidden { value } => Some(value.to_string()),
            FieldKind::CreatableSelect { .. } => None,
        }
    }

    /// Turn what the user typed into the form value. Empty input clears the field.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        match self {
            FieldKind::Hidden { value } => Some(value.to_string()),
            FieldKind::CreatableSelect { .. } => {
                let trimmed = raw.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_uppercase())
            }
        }
    }

    /// Choices to offer while `typed` is in the input: the defaults, plus
    /// the typed value when it is new.
    pub fn choices(&self, typed: &str) -> Vec<String> {
        let FieldKind::CreatableSelect { options, .. } = self else {
            return Vec::new();
        };
        let mut choices: Vec<String> = options.iter().map(|o| o.to_string()).collect();
        if let Some(created) = self.normalize(typed) {
            if !choices.contains(&created) {
                choices.push(created);
            }
        }
        choices
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FieldKind::Hidden { .. } => "",
            FieldKind::CreatableSelect { placeholder, .. } => *placeholder,
        }
    }
}

/// Fields of the commodity DTO the form can edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldName {
    Namespace,
    Mnemonic,
}

impl FieldName {
    /// Key used by validation errors.
    pub fn key(self) -> &'static str {
        match self {
            FieldName::Namespace => "namespace",
            FieldName::Mnemonic => "mnemonic",
        }
    }

    pub fn read(self, dto: &CommodityDto) -> Option<String> {
        match self {
            FieldName::Namespace => Some(dto.namespace.clone()),
            FieldName::Mnemonic => dto.mnemonic.clone(),
        }
    }

    pub fn write(self, dto: &mut CommodityDto, value: Option<String>) {
        match self {
            FieldName::Namespace => dto.namespace = value.unwrap_or_default(),
            FieldName::Mnemonic => dto.mnemonic = value,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: FieldName,
    pub label: &'static str,
    pub kind: FieldKind,
}

/// The currency form: namespace fixed to CURRENCY, code chosen or typed.
pub const CURRENCY_FIELDS: [FieldDescriptor; 2] = [
    FieldDescriptor {
        name: FieldName::Namespace,
        label: "Namespace",
        kind: FieldKind::Hidden {
            value: CURRENCY_NAMESPACE,
        },
    },
    FieldDescriptor {
        name: FieldName::Mnemonic,
        label: "Currency",
        kind: FieldKind::CreatableSelect {
            options: &DEFAULT_CURRENCIES,
            placeholder: "Choose or type your currency",
        },
    },
];

/// Form value built from the descriptors' initial values.
pub fn initial_dto(fields: &[FieldDescriptor]) -> CommodityDto {
    let mut dto = CommodityDto::currency();
    for field in fields {
        field.name.write(&mut dto, field.kind.initial_value());
    }
    dto
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mnemonic_kind() -> FieldKind {
        CURRENCY_FIELDS[1].kind
    }

    #[test]
    fn test_initial_dto_has_currency_namespace_only() {
        let dto = initial_dto(&CURRENCY_FIELDS);
        assert_eq!(dto.namespace, "CURRENCY");
        assert_eq!(dto.mnemonic, None);
    }

    #[test]
    fn test_only_namespace_is_hidden() {
        let visible: Vec<_> = CURRENCY_FIELDS
            .iter()
            .filter(|f| f.kind.is_visible())
            .map(|f| f.name)
            .collect();
        assert_eq!(visible, vec![FieldName::Mnemonic]);
    }

    #[test]
    fn test_creatable_select_normalizes() {
        let kind = mnemonic_kind();
        assert_eq!(kind.normalize(" gbp "), Some("GBP".to_string()));
        assert_eq!(kind.normalize("   "), None);
        assert_eq!(
            FieldKind::Hidden { value: "CURRENCY" }.normalize("anything"),
            Some("CURRENCY".to_string())
        );
    }

    #[test]
    fn test_choices_offer_defaults_and_created_value() {
        let kind = mnemonic_kind();
        assert_eq!(kind.choices(""), vec!["EUR", "USD", "SGD"]);
        assert_eq!(kind.choices("usd"), vec!["EUR", "USD", "SGD"]);
        assert_eq!(kind.choices("chf"), vec!["EUR", "USD", "SGD", "CHF"]);
        assert!(CURRENCY_FIELDS[0].kind.choices("x").is_empty());
    }

    #[test]
    fn test_write_then_validate() {
        let mut dto = initial_dto(&CURRENCY_FIELDS);
        let field = CURRENCY_FIELDS[1];
        field.name.write(&mut dto, field.kind.normalize("eur"));
        assert_eq!(field.name.read(&dto).as_deref(), Some("EUR"));
        assert!(dto.validate().is_ok());

        field.name.write(&mut dto, field.kind.normalize("TOO LONG CODE"));
        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.get(field.name.key()), Some("Mnemonic must not contain spaces"));
    }
}
