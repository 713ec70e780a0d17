// ABOUTME: Closed union of the two provider payload shapes plus food search summaries
// ABOUTME: Flat Nutritionix fields and nested FatSecret servings, discriminated by the servings key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Provider Payloads
//!
//! Two payload shapes exist in the wild:
//!
//! - **Flat** (Nutritionix): nutrients as top-level `nf_*` fields with
//!   `serving_qty` / `serving_unit`.
//! - **Nested** (FatSecret): nutrients inside `servings.serving`, which is a
//!   single object or an array with one entry flagged `is_default`.
//!
//! `ProviderPayload::from_value` dispatches on the presence of the
//! `servings` key. Every numeric field is decoded leniently.

use std::fmt;
use std::iter;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::errors::PipelineError;
use crate::models::lenient;

/// Food data provider a payload or summary came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Nutritionix (flat payloads, API-key auth)
    Nutritionix,
    /// FatSecret (nested payloads, OAuth2 client credentials)
    FatSecret,
}

impl ProviderKind {
    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nutritionix => "nutritionix",
            Self::FatSecret => "fatsecret",
        }
    }

    /// Infer the provider from a raw payload by its shape
    #[must_use]
    pub fn detect(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(if object.contains_key("servings") {
            Self::FatSecret
        } else {
            Self::Nutritionix
        })
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nutritionix" => Ok(Self::Nutritionix),
            "fatsecret" | "fat_secret" => Ok(Self::FatSecret),
            other => Err(format!("unknown food data provider: {other}")),
        }
    }
}

/// Lightweight search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodSummary {
    /// Provider identifier; for Nutritionix common foods this is the food name
    pub id: String,
    /// Display name
    pub name: String,
    /// Brand for packaged foods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Provider description (FatSecret includes a per-serving nutrient line)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether this is a branded item rather than a generic food
    #[serde(default)]
    pub branded: bool,
    /// Source provider
    pub provider: ProviderKind,
}

/// Flat-field payload as returned by Nutritionix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatNutrientPayload {
    /// Food name
    #[serde(default, deserialize_with = "lenient::text")]
    pub food_name: Option<String>,
    /// Brand for branded items
    #[serde(default, deserialize_with = "lenient::text")]
    pub brand_name: Option<String>,
    /// Nutritionix item id (branded foods only)
    #[serde(default, deserialize_with = "lenient::text")]
    pub nix_item_id: Option<String>,
    /// Energy (kcal)
    #[serde(default, deserialize_with = "lenient::amount")]
    pub nf_calories: f64,
    /// Protein (g)
    #[serde(default, deserialize_with = "lenient::amount")]
    pub nf_protein: f64,
    /// Carbohydrates (g)
    #[serde(default, deserialize_with = "lenient::amount")]
    pub nf_total_carbohydrate: f64,
    /// Fat (g)
    #[serde(default, deserialize_with = "lenient::amount")]
    pub nf_total_fat: f64,
    /// Fiber (g)
    #[serde(default, deserialize_with = "lenient::amount")]
    pub nf_dietary_fiber: f64,
    /// Serving magnitude
    #[serde(default, deserialize_with = "lenient::positive_quantity")]
    pub serving_qty: Option<f64>,
    /// Serving unit
    #[serde(default, deserialize_with = "lenient::text")]
    pub serving_unit: Option<String>,
}

/// One serving entry of a FatSecret food
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FatSecretServing {
    /// Serving identifier
    #[serde(default, deserialize_with = "lenient::text")]
    pub serving_id: Option<String>,
    /// Human description, e.g. "1 medium (3\" dia)"
    #[serde(default, deserialize_with = "lenient::text")]
    pub serving_description: Option<String>,
    /// Whether this is the provider's default serving
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_default: bool,
    /// Energy (kcal)
    #[serde(default, deserialize_with = "lenient::amount")]
    pub calories: f64,
    /// Protein (g)
    #[serde(default, deserialize_with = "lenient::amount")]
    pub protein: f64,
    /// Carbohydrates (g)
    #[serde(default, deserialize_with = "lenient::amount")]
    pub carbohydrate: f64,
    /// Fat (g)
    #[serde(default, deserialize_with = "lenient::amount")]
    pub fat: f64,
    /// Fiber (g)
    #[serde(default, deserialize_with = "lenient::amount")]
    pub fiber: f64,
    /// Serving magnitude
    #[serde(default, deserialize_with = "lenient::positive_quantity")]
    pub number_of_units: Option<f64>,
    /// Serving unit, e.g. "medium" or "g"
    #[serde(default, deserialize_with = "lenient::text")]
    pub measurement_description: Option<String>,
}

/// Ordered servings of a food, never empty.
///
/// FatSecret sends `servings.serving` as an object when there is one serving
/// and as an array otherwise. Both decode into this list; a payload with no
/// usable serving holds a single zeroed serving.
#[derive(Debug, Clone, PartialEq)]
pub struct ServingList {
    first: FatSecretServing,
    rest: Vec<FatSecretServing>,
}

impl ServingList {
    /// Build from decoded servings, substituting a zeroed serving when empty
    #[must_use]
    pub fn from_servings(servings: Vec<FatSecretServing>) -> Self {
        let mut servings = servings.into_iter();
        let first = servings.next().unwrap_or_default();
        Self {
            first,
            rest: servings.collect(),
        }
    }

    /// Servings in provider order
    pub fn iter(&self) -> impl Iterator<Item = &FatSecretServing> {
        iter::once(&self.first).chain(self.rest.iter())
    }

    /// Number of servings (at least one)
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    /// Always false; kept for API symmetry with collections
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// The serving flagged as default, else the first one
    #[must_use]
    pub fn preferred(&self) -> &FatSecretServing {
        self.iter()
            .find(|serving| serving.is_default)
            .unwrap_or(&self.first)
    }
}

impl Default for ServingList {
    fn default() -> Self {
        Self::from_servings(Vec::new())
    }
}

impl<'de> Deserialize<'de> for ServingList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let servings = match value.get("serving") {
            Some(Value::Array(items)) => items
                .iter()
                .map(FatSecretServing::deserialize)
                .collect::<Result<Vec<_>, _>>()
                .map_err(D::Error::custom)?,
            Some(item @ Value::Object(_)) => {
                vec![FatSecretServing::deserialize(item).map_err(D::Error::custom)?]
            }
            _ => Vec::new(),
        };
        Ok(Self::from_servings(servings))
    }
}

impl Serialize for ServingList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct Envelope<'a> {
            serving: Vec<&'a FatSecretServing>,
        }

        Envelope {
            serving: self.iter().collect(),
        }
        .serialize(serializer)
    }
}

/// Nested-serving payload as returned by FatSecret `food.get.v2`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NestedServingPayload {
    /// FatSecret food id
    #[serde(default, deserialize_with = "lenient::text")]
    pub food_id: Option<String>,
    /// Food name
    #[serde(default, deserialize_with = "lenient::text")]
    pub food_name: Option<String>,
    /// Brand for branded items
    #[serde(default, deserialize_with = "lenient::text")]
    pub brand_name: Option<String>,
    /// Available servings
    #[serde(default)]
    pub servings: ServingList,
}

/// A provider payload of either known shape
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProviderPayload {
    /// Flat `nf_*` fields (Nutritionix)
    Flat(FlatNutrientPayload),
    /// Nested `servings.serving` (FatSecret)
    Nested(NestedServingPayload),
}

impl ProviderPayload {
    /// Decode a raw JSON payload, choosing the variant by the `servings` key
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::UnrecognizedPayload` if the value is not an
    /// object or a nested serving entry is not an object
    pub fn from_value(value: Value) -> Result<Self, PipelineError> {
        let kind = ProviderKind::detect(&value).ok_or_else(|| PipelineError::UnrecognizedPayload {
            reason: "expected a JSON object".to_owned(),
        })?;
        let decoded = match kind {
            ProviderKind::FatSecret => serde_json::from_value(value).map(Self::Nested),
            ProviderKind::Nutritionix => serde_json::from_value(value).map(Self::Flat),
        };
        decoded.map_err(|e| PipelineError::UnrecognizedPayload {
            reason: e.to_string(),
        })
    }

    /// Provider whose shape this payload has
    #[must_use]
    pub const fn kind(&self) -> ProviderKind {
        match self {
            Self::Flat(_) => ProviderKind::Nutritionix,
            Self::Nested(_) => ProviderKind::FatSecret,
        }
    }
}

impl<'de> Deserialize<'de> for ProviderPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(D::Error::custom)
    }
}
