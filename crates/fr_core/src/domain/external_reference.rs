//! External references
//!
//! A record as known to one external data source (`{provider, ref}`).
//! Supported providers live in the [`PROVIDERS`] table: adding a source is a
//! new row there, nothing else branches on provider names.
//!
//! Construction has two deliberately different strictness levels:
//! - [`ExternalReferenceFactory::get_reference`] rejects unknown providers and
//!   ill-typed refs
//! - [`ExternalReferenceFactory::from_dto`] drops them silently, because
//!   scraped payloads routinely mix supported and unsupported providers

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// `provider → ref` map as found in request and scraper payloads.
pub type ExternalReferencesDto = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
    Numeric,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Provider {
    name: &'static str,
    kind: RefKind,
}

impl Provider {
    pub const SOFASCORE: Provider = Provider { name: "sofascore", kind: RefKind::Numeric };
    pub const WIKIPEDIA: Provider = Provider { name: "wikipedia", kind: RefKind::Text };
    pub const TRANSFERMARKT: Provider = Provider { name: "transfermarkt", kind: RefKind::Numeric };
    pub const FBREF: Provider = Provider { name: "fbref", kind: RefKind::Text };

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> RefKind {
        self.kind
    }

    pub fn lookup(name: &str) -> Option<Provider> {
        PROVIDERS.iter().copied().find(|provider| provider.name == name)
    }
}

/// Every provider the registry accepts.
pub const PROVIDERS: &[Provider] =
    &[Provider::SOFASCORE, Provider::WIKIPEDIA, Provider::TRANSFERMARKT, Provider::FBREF];

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl Serialize for Provider {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

impl<'de> Deserialize<'de> for Provider {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Provider::lookup(&name)
            .ok_or_else(|| de::Error::custom(format!("unsupported provider: {name}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefValue {
    Number(i64),
    Text(String),
}

impl RefValue {
    fn from_json(value: &serde_json::Value) -> Option<RefValue> {
        match value {
            serde_json::Value::Number(n) => n.as_i64().map(RefValue::Number),
            serde_json::Value::String(s) => Some(RefValue::Text(s.clone())),
            _ => None,
        }
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            RefValue::Number(n) => serde_json::Value::from(*n),
            RefValue::Text(s) => serde_json::Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for RefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefValue::Number(n) => write!(f, "{n}"),
            RefValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExternalReferenceError {
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("Invalid {provider} reference: {value}")]
    InvalidReference { provider: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalReference {
    provider: Provider,
    #[serde(rename = "ref")]
    reference: RefValue,
}

impl ExternalReference {
    /// Numeric providers also accept numeric strings, normalised to numbers.
    pub fn new(provider: Provider, value: RefValue) -> Result<Self, ExternalReferenceError> {
        let invalid = |value: &RefValue| ExternalReferenceError::InvalidReference {
            provider: provider.name,
            value: value.to_string(),
        };

        let reference = match (provider.kind, value) {
            (RefKind::Numeric, RefValue::Number(n)) => RefValue::Number(n),
            (RefKind::Numeric, RefValue::Text(s)) => match s.trim().parse::<i64>() {
                Ok(n) => RefValue::Number(n),
                Err(_) => return Err(invalid(&RefValue::Text(s))),
            },
            (RefKind::Text, RefValue::Text(s)) if !s.trim().is_empty() => RefValue::Text(s),
            (RefKind::Text, other) => return Err(invalid(&other)),
        };

        Ok(Self { provider, reference })
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn reference(&self) -> &RefValue {
        &self.reference
    }

    pub fn to_dto(&self) -> ExternalReferenceDto {
        ExternalReferenceDto {
            provider: self.provider.name.to_string(),
            reference: self.reference.clone(),
        }
    }
}

impl fmt::Display for ExternalReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.provider, self.reference)
    }
}

/// Serialized single reference (`{"provider": "sofascore", "ref": 123}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalReferenceDto {
    pub provider: String,
    #[serde(rename = "ref")]
    pub reference: RefValue,
}

pub struct ExternalReferenceFactory;

impl ExternalReferenceFactory {
    /// Strict construction of one reference.
    pub fn get_reference(
        provider: &str,
        value: RefValue,
    ) -> Result<ExternalReference, ExternalReferenceError> {
        let provider = Provider::lookup(provider)
            .ok_or_else(|| ExternalReferenceError::UnsupportedProvider(provider.to_string()))?;
        ExternalReference::new(provider, value)
    }

    /// Permissive bulk parse: unsupported providers and unusable values are dropped.
    pub fn from_dto(dto: &ExternalReferencesDto) -> Vec<ExternalReference> {
        dto.iter()
            .filter_map(|(provider, raw)| {
                let parsed = RefValue::from_json(raw)
                    .ok_or_else(|| ExternalReferenceError::InvalidReference {
                        provider: "unknown",
                        value: raw.to_string(),
                    })
                    .and_then(|value| Self::get_reference(provider, value));

                match parsed {
                    Ok(reference) => Some(reference),
                    Err(err) => {
                        debug!("Dropping external reference {provider}={raw}: {err}");
                        None
                    }
                }
            })
            .collect()
    }

    pub fn to_dto(references: &[ExternalReference]) -> Vec<ExternalReferenceDto> {
        references.iter().map(ExternalReference::to_dto).collect()
    }

    pub fn to_map(references: &[ExternalReference]) -> ExternalReferencesDto {
        references
            .iter()
            .map(|r| (r.provider.name.to_string(), r.reference.to_json()))
            .collect()
    }
}

/// At most one reference per provider; later values replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalReferences(Vec<ExternalReference>);

impl ExternalReferences {
    pub fn new(references: impl IntoIterator<Item = ExternalReference>) -> Self {
        references.into_iter().fold(Self::default(), |acc, r| acc.upsert(r))
    }

    pub fn from_dto(dto: &ExternalReferencesDto) -> Self {
        Self::new(ExternalReferenceFactory::from_dto(dto))
    }

    pub fn upsert(mut self, reference: ExternalReference) -> Self {
        match self.0.iter_mut().find(|r| r.provider == reference.provider) {
            Some(existing) => *existing = reference,
            None => self.0.push(reference),
        }
        self
    }

    pub fn merge(self, other: &ExternalReferences) -> Self {
        other.0.iter().cloned().fold(self, |acc, r| acc.upsert(r))
    }

    pub fn by_provider(&self, provider: Provider) -> Option<&ExternalReference> {
        self.0.iter().find(|r| r.provider == provider)
    }

    pub fn contains(&self, reference: &ExternalReference) -> bool {
        self.0.contains(reference)
    }

    pub fn intersects(&self, references: &[ExternalReference]) -> bool {
        references.iter().any(|r| self.contains(r))
    }

    pub fn as_slice(&self) -> &[ExternalReference] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_map(&self) -> ExternalReferencesDto {
        ExternalReferenceFactory::to_map(&self.0)
    }
}
