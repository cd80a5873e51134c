//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Maximum SKU length accepted by the catalog.
pub const SKU_MAX_LEN: usize = 64;

/// Unique string key naming a catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sku(String);

/// Code of an inventory source (stock location).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SourceCode(String);

/// Stable name of an installation data patch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PatchName(String);

/// Identifier of a catalog category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(u32);

/// Identifier of an attribute set.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSetId(u32);

/// Store-assigned numeric identifier of a persisted product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductEntityId(u64);

impl Sku {
    /// Build a SKU, trimming surrounding whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(DomainError::invalid_id("Sku: cannot be empty"));
        }
        if value.chars().count() > SKU_MAX_LEN {
            return Err(DomainError::invalid_id(format!(
                "Sku: longer than {SKU_MAX_LEN} characters"
            )));
        }
        Ok(Self(value))
    }

    /// SKU from a literal.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not a valid SKU.
    pub fn from_static(value: &'static str) -> Self {
        match Self::new(value) {
            Ok(sku) => sku,
            Err(e) => panic!("invalid static sku {value:?}: {e}"),
        }
    }
}

macro_rules! impl_string_newtype {
    ($t:ty) => {
        impl $t {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                <$t>::new(value)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$t>::new(s)
            }
        }
    };
}

macro_rules! impl_non_empty_ctor {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(DomainError::invalid_id(concat!($name, ": cannot be empty")));
                }
                Ok(Self(value))
            }

            /// Value from a literal.
            ///
            /// # Panics
            ///
            /// Panics if `value` is blank.
            pub fn from_static(value: &'static str) -> Self {
                match Self::new(value) {
                    Ok(v) => v,
                    Err(e) => panic!("invalid static {}: {e}", $name),
                }
            }
        }
    };
}

macro_rules! impl_numeric_newtype {
    ($t:ty, $inner:ty, $name:literal) => {
        impl $t {
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            pub const fn get(self) -> $inner {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$inner> for $t {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$t> for $inner {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<$inner>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(value))
            }
        }
    };
}

impl_non_empty_ctor!(SourceCode, "SourceCode");
impl_non_empty_ctor!(PatchName, "PatchName");

impl_string_newtype!(Sku);
impl_string_newtype!(SourceCode);
impl_string_newtype!(PatchName);

impl_numeric_newtype!(CategoryId, u32, "CategoryId");
impl_numeric_newtype!(AttributeSetId, u32, "AttributeSetId");
impl_numeric_newtype!(ProductEntityId, u64, "ProductEntityId");
