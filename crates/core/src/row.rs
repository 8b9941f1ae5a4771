//! Decoded join-row scratch values.
//!
//! One flat row of the recipe join carries a column block per entity kind,
//! in the order listed below. Ids are `Option<i64>`: `None` means the join
//! produced no entity of that kind for this row, and nothing may be
//! materialized at that level.

use crate::model::{Ingredient, StepIngredient, Trigger, TriggerType, Utensil};

/// Number of columns in one join row, in [`JoinRow`] field order.
pub const COLUMN_COUNT: usize = 31;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecipeRow {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub created_at_ms: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepIngredientRow {
    pub id: Option<i64>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub created_at_ms: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct IngredientRow {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub created_at_ms: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepRow {
    pub id: Option<i64>,
    pub data: Option<String>,
    pub step_number: Option<i64>,
    pub created_at_ms: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriggerGroupRow {
    pub id: Option<i64>,
    pub action_params: Option<String>,
    pub action_key: Option<String>,
    pub service: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriggerRow {
    pub id: Option<i64>,
    pub action_params: Option<String>,
    pub action: Option<String>,
    pub service: Option<String>,
    pub trigger_params: Option<String>,
    pub created_at_ms: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriggerTypeRow {
    pub id: Option<i64>,
    pub created_at_ms: Option<i64>,
    pub key: Option<String>,
    pub sensor_type: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UtensilRow {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub created_at_ms: Option<i64>,
}

/// One fully decoded join row: a scratch value per entity kind, in column
/// order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JoinRow {
    pub recipe: RecipeRow,
    pub step_ingredient: StepIngredientRow,
    pub ingredient: IngredientRow,
    pub step: StepRow,
    pub trigger_group: TriggerGroupRow,
    pub trigger: TriggerRow,
    pub trigger_type: TriggerTypeRow,
    pub utensil: UtensilRow,
}

impl IngredientRow {
    pub fn materialize(self) -> Option<Ingredient> {
        let id = self.id?;
        Some(Ingredient {
            id,
            name: self.name,
            created_at_ms: self.created_at_ms,
        })
    }
}

impl StepIngredientRow {
    /// Materialize with the row-local ingredient snapshot attached. The
    /// ingredient reference stays `None` when its own id is absent.
    pub fn materialize(self, ingredient: IngredientRow) -> Option<StepIngredient> {
        let id = self.id?;
        Some(StepIngredient {
            id,
            quantity: self.quantity,
            unit: self.unit,
            created_at_ms: self.created_at_ms,
            ingredient: ingredient.materialize(),
        })
    }
}

impl TriggerTypeRow {
    pub fn materialize(self) -> Option<TriggerType> {
        let id = self.id?;
        Some(TriggerType {
            id,
            key: self.key,
            sensor_type: self.sensor_type,
            created_at_ms: self.created_at_ms,
        })
    }
}

impl TriggerRow {
    /// Materialize with the row-local trigger-type snapshot attached.
    pub fn materialize(self, trigger_type: TriggerTypeRow) -> Option<Trigger> {
        let id = self.id?;
        Some(Trigger {
            id,
            action: self.action,
            action_params: self.action_params,
            trigger_params: self.trigger_params,
            service: self.service,
            created_at_ms: self.created_at_ms,
            trigger_type: trigger_type.materialize(),
        })
    }
}

impl UtensilRow {
    pub fn materialize(self) -> Option<Utensil> {
        let id = self.id?;
        Some(Utensil {
            id,
            name: self.name,
            created_at_ms: self.created_at_ms,
        })
    }
}
