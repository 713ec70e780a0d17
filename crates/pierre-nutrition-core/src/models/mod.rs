// ABOUTME: Core data models for the nutrition pipeline
// ABOUTME: Re-exports canonical records, log entries, goals and provider payload shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Permissive deserializers for provider numbers, names and timestamps
pub mod lenient;
/// Canonical nutrition records, log entries, goals and quick-add items
pub mod nutrition;
/// Provider payload union and food search summaries
pub mod payload;

pub use nutrition::{
    FoodLogEntry, MealType, NutrientRecord, NutrientTotals, QuickAddItem, ScaledNutrients,
    UserGoal,
};
pub use payload::{
    FatSecretServing, FlatNutrientPayload, FoodSummary, NestedServingPayload, ProviderKind,
    ProviderPayload, ServingList,
};
