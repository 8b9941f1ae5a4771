//! Output entity types for an assembled recipe tree.
//!
//! Entities carry domain data only; the identity bookkeeping used while
//! assembling lives in [`crate::assemble`] and is discarded once a tree is
//! built. Empty child sequences and absent references are omitted from the
//! serialized form, absent scalars serialize as `null`.

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Recipe {
    pub id: i64,
    pub title: Option<String>,
    pub created_at_ms: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub step_ingredients: Vec<StepIngredient>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepIngredient {
    pub id: i64,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub created_at_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<Ingredient>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ingredient {
    pub id: i64,
    pub name: Option<String>,
    pub created_at_ms: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Step {
    pub id: i64,
    pub data: Option<String>,
    pub step_number: Option<i64>,
    pub created_at_ms: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trigger_groups: Vec<TriggerGroup>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub utensils: Vec<Utensil>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TriggerGroup {
    pub id: i64,
    pub action_params: Option<String>,
    pub action_key: Option<String>,
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<Trigger>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trigger {
    pub id: i64,
    pub action: Option<String>,
    pub action_params: Option<String>,
    pub trigger_params: Option<String>,
    pub service: Option<String>,
    pub created_at_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_type: Option<TriggerType>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TriggerType {
    pub id: i64,
    pub key: Option<String>,
    pub sensor_type: Option<String>,
    pub created_at_ms: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Utensil {
    pub id: i64,
    pub name: Option<String>,
    pub created_at_ms: Option<i64>,
}
