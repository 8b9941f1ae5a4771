//! Single-pass reconstruction of recipe trees from flat join rows.
//!
//! A join repeats parent columns once per child combination; the assembler
//! folds the stream back into distinct entities keyed by id, preserving
//! first-seen order at every level. Identity bookkeeping lives in private
//! builders (`IndexMap` per parent scope) that are drained by `finish`;
//! finished entities carry no index state.

use indexmap::IndexMap;

use crate::model::{Recipe, Step, StepIngredient, Trigger, TriggerGroup, Utensil};
use crate::row::{JoinRow, RecipeRow, StepRow, TriggerGroupRow};

#[derive(Debug, PartialEq)]
pub enum AssembleError {
    NotFound { id: i64 },
    Ambiguous { id: i64, found: usize },
}

impl std::fmt::Display for AssembleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "no recipe found (id={id})"),
            Self::Ambiguous { id, found } => {
                write!(f, "more than one recipe assembled (id={id}, found={found})")
            }
        }
    }
}

impl std::error::Error for AssembleError {}

/// Incremental assembler: feed decoded rows with [`push`](Self::push), then
/// take the trees with [`finish`](Self::finish). Each assembler owns its own
/// identity index; one assembler must consume its rows strictly in order.
#[derive(Debug, Default)]
pub struct RecipeAssembler {
    recipes: IndexMap<i64, RecipeBuilder>,
}

impl RecipeAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one row into the tree under construction. A row whose recipe id
    /// is absent contributes nothing; an absent id at any deeper level skips
    /// that branch only, sibling branches still apply.
    pub fn push(&mut self, row: JoinRow) {
        let JoinRow {
            recipe,
            step_ingredient,
            ingredient,
            step,
            trigger_group,
            trigger,
            trigger_type,
            utensil,
        } = row;

        let Some(recipe_id) = recipe.id else {
            return;
        };
        let builder = self
            .recipes
            .entry(recipe_id)
            .or_insert_with(|| RecipeBuilder::new(recipe_id, recipe));

        if let Some(si) = step_ingredient.materialize(ingredient) {
            builder.step_ingredients.entry(si.id).or_insert(si);
        }

        let Some(step_id) = step.id else {
            return;
        };
        let step_builder = builder
            .steps
            .entry(step_id)
            .or_insert_with(|| StepBuilder::new(step_id, step));

        if let Some(group_id) = trigger_group.id {
            let group_builder = step_builder
                .trigger_groups
                .entry(group_id)
                .or_insert_with(|| TriggerGroupBuilder::new(group_id, trigger_group));
            if let Some(t) = trigger.materialize(trigger_type) {
                group_builder.triggers.entry(t.id).or_insert(t);
            }
        }

        if let Some(u) = utensil.materialize() {
            step_builder.utensils.entry(u.id).or_insert(u);
        }
    }

    /// Drain the builders into recipes, first-seen order throughout.
    pub fn finish(self) -> Vec<Recipe> {
        self.recipes
            .into_values()
            .map(RecipeBuilder::finish)
            .collect()
    }

    /// Require exactly one assembled recipe. More than one distinct recipe id
    /// means the caller's by-id row filter is defective.
    pub fn finish_one(self, id: i64) -> Result<Recipe, AssembleError> {
        let mut recipes = self.finish();
        match recipes.len() {
            0 => Err(AssembleError::NotFound { id }),
            1 => Ok(recipes.remove(0)),
            found => Err(AssembleError::Ambiguous { id, found }),
        }
    }
}

/// Assemble every distinct recipe in the row stream, first-seen order.
pub fn assemble_all(rows: impl IntoIterator<Item = JoinRow>) -> Vec<Recipe> {
    let mut assembler = RecipeAssembler::new();
    for row in rows {
        assembler.push(row);
    }
    assembler.finish()
}

/// Assemble a stream expected to cover exactly one recipe id.
pub fn assemble_one(
    rows: impl IntoIterator<Item = JoinRow>,
    id: i64,
) -> Result<Recipe, AssembleError> {
    let mut assembler = RecipeAssembler::new();
    for row in rows {
        assembler.push(row);
    }
    assembler.finish_one(id)
}

#[derive(Debug)]
struct RecipeBuilder {
    id: i64,
    title: Option<String>,
    created_at_ms: Option<i64>,
    step_ingredients: IndexMap<i64, StepIngredient>,
    steps: IndexMap<i64, StepBuilder>,
}

impl RecipeBuilder {
    fn new(id: i64, row: RecipeRow) -> Self {
        Self {
            id,
            title: row.title,
            created_at_ms: row.created_at_ms,
            step_ingredients: IndexMap::new(),
            steps: IndexMap::new(),
        }
    }

    fn finish(self) -> Recipe {
        Recipe {
            id: self.id,
            title: self.title,
            created_at_ms: self.created_at_ms,
            step_ingredients: self.step_ingredients.into_values().collect(),
            steps: self.steps.into_values().map(StepBuilder::finish).collect(),
        }
    }
}

#[derive(Debug)]
struct StepBuilder {
    id: i64,
    data: Option<String>,
    step_number: Option<i64>,
    created_at_ms: Option<i64>,
    trigger_groups: IndexMap<i64, TriggerGroupBuilder>,
    utensils: IndexMap<i64, Utensil>,
}

impl StepBuilder {
    fn new(id: i64, row: StepRow) -> Self {
        Self {
            id,
            data: row.data,
            step_number: row.step_number,
            created_at_ms: row.created_at_ms,
            trigger_groups: IndexMap::new(),
            utensils: IndexMap::new(),
        }
    }

    fn finish(self) -> Step {
        Step {
            id: self.id,
            data: self.data,
            step_number: self.step_number,
            created_at_ms: self.created_at_ms,
            trigger_groups: self
                .trigger_groups
                .into_values()
                .map(TriggerGroupBuilder::finish)
                .collect(),
            utensils: self.utensils.into_values().collect(),
        }
    }
}

#[derive(Debug)]
struct TriggerGroupBuilder {
    id: i64,
    action_params: Option<String>,
    action_key: Option<String>,
    service: Option<String>,
    triggers: IndexMap<i64, Trigger>,
}

impl TriggerGroupBuilder {
    fn new(id: i64, row: TriggerGroupRow) -> Self {
        Self {
            id,
            action_params: row.action_params,
            action_key: row.action_key,
            service: row.service,
            triggers: IndexMap::new(),
        }
    }

    fn finish(self) -> TriggerGroup {
        TriggerGroup {
            id: self.id,
            action_params: self.action_params,
            action_key: self.action_key,
            service: self.service,
            triggers: self.triggers.into_values().collect(),
        }
    }
}
