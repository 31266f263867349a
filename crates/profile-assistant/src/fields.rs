use std::collections::HashMap;

use crate::types::FieldPayload;
use crate::validate::{self, ValidationResult};

/// Identifier of an editable profile field. Serialized with the same
/// camelCase names the profile service uses as JSON keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Email,
    Address,
    FirstName,
    LastName,
    Birthday,
}

impl FieldKey {
    pub const ALL: [FieldKey; 5] = [
        FieldKey::Email,
        FieldKey::Address,
        FieldKey::FirstName,
        FieldKey::LastName,
        FieldKey::Birthday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Address => "address",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Birthday => "birthday",
        }
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FieldKey {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| crate::Error::UnknownField(s.to_string()))
    }
}

pub type Validator = fn(&str) -> ValidationResult;

#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub key: FieldKey,
    pub label: &'static str,
    pub prompt: &'static str,
    validator: Validator,
}

impl FieldSpec {
    pub const fn new(
        key: FieldKey,
        label: &'static str,
        prompt: &'static str,
        validator: Validator,
    ) -> Self {
        Self {
            key,
            label,
            prompt,
            validator,
        }
    }

    pub fn validate(&self, raw: &str) -> ValidationResult {
        (self.validator)(raw)
    }

    pub fn build_payload(&self, value: impl Into<String>) -> FieldPayload {
        FieldPayload {
            field: self.key,
            value: value.into(),
        }
    }
}

const DEFAULT_FIELDS: [FieldSpec; 5] = [
    FieldSpec::new(
        FieldKey::Email,
        "email",
        "Sure, what is your new email?",
        validate::email,
    ),
    FieldSpec::new(
        FieldKey::Address,
        "address",
        "Please enter your new address.",
        validate::non_empty,
    ),
    FieldSpec::new(
        FieldKey::FirstName,
        "first name",
        "Sure, what is your new first name?",
        validate::non_empty,
    ),
    FieldSpec::new(
        FieldKey::LastName,
        "last name",
        "Sure, what is your new last name?",
        validate::non_empty,
    ),
    FieldSpec::new(
        FieldKey::Birthday,
        "birthday",
        "Sure, what is your birthday? Use YYYY-MM-DD.",
        validate::birthday,
    ),
];

/// Fixed table of the editable fields, built once at startup.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    specs: HashMap<FieldKey, FieldSpec>,
}

impl FieldRegistry {
    pub fn new(specs: impl IntoIterator<Item = FieldSpec>) -> Self {
        Self {
            specs: specs.into_iter().map(|spec| (spec.key, spec)).collect(),
        }
    }

    pub fn lookup(&self, key: FieldKey) -> Option<&FieldSpec> {
        self.specs.get(&key)
    }

    pub fn lookup_name(&self, name: &str) -> Option<&FieldSpec> {
        name.parse::<FieldKey>()
            .ok()
            .and_then(|key| self.lookup(key))
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_FIELDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_covers_every_key() {
        let registry = FieldRegistry::default();
        assert_eq!(registry.len(), FieldKey::ALL.len());
        for key in FieldKey::ALL {
            assert_eq!(registry.lookup(key).unwrap().key, key);
        }
    }

    #[test]
    fn lookup_by_serialized_name() {
        let registry = FieldRegistry::default();
        assert_eq!(registry.lookup_name("lastName").unwrap().label, "last name");
        assert!(registry.lookup_name("last_name").is_none());
        assert!(registry.lookup_name("phone").is_none());
    }

    #[test]
    fn key_names_round_trip_through_serde() {
        for key in FieldKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }

    #[test]
    fn payload_uses_field_key() {
        let registry = FieldRegistry::default();
        let payload = registry
            .lookup(FieldKey::Address)
            .unwrap()
            .build_payload("1 Main Street");
        assert_eq!(payload.field, FieldKey::Address);
        assert_eq!(payload.value, "1 Main Street");
    }
}
