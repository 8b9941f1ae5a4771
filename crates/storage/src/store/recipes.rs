#![forbid(unsafe_code)]

use galley_core::assemble::{AssembleError, RecipeAssembler};
use galley_core::model::Recipe;
use galley_core::row::{
    COLUMN_COUNT, IngredientRow, JoinRow, RecipeRow, StepIngredientRow, StepRow, TriggerGroupRow,
    TriggerRow, TriggerTypeRow, UtensilRow,
};
use rusqlite::ToSql;

use super::{RecipeStore, StoreError};

// Column order is the decode contract: entity blocks in the order recipe,
// step_ingredient, ingredient, step, trigger_group, trigger, trigger_type,
// utensil.
const RECIPE_TREE_SELECT: &str = r#"
    SELECT
      r.id, r.title, r.created_at_ms,
      si.id, si.quantity, si.unit, si.created_at_ms,
      i.id, i.name, i.created_at_ms,
      s.id, s.data, s.step_number, s.created_at_ms,
      tg.id, tg.action_params, tg.action_key, tg.service,
      t.id, t.action_params, t.action, t.service, t.trigger_params, t.created_at_ms,
      tt.id, tt.created_at_ms, tt.key, tt.sensor_type,
      u.id, u.name, u.created_at_ms
    FROM recipes r
    LEFT JOIN step_ingredients si ON si.recipe_id = r.id
    LEFT JOIN ingredients i ON i.id = si.ingredient_id
    LEFT JOIN steps s ON s.recipe_id = r.id
    LEFT JOIN trigger_groups tg ON tg.step_id = s.id
    LEFT JOIN triggers t ON t.trigger_group_id = tg.id
    LEFT JOIN trigger_types tt ON tt.id = t.trigger_type_id
    LEFT JOIN step_utensils su ON su.step_id = s.id
    LEFT JOIN utensils u ON u.id = su.utensil_id
"#;

impl RecipeStore {
    /// All recipes with their full trees, in first-seen order of recipe id.
    pub fn recipes_all(&self) -> Result<Vec<Recipe>, StoreError> {
        // ORDER BY keeps rows for one recipe contiguous; first-seen order
        // within a recipe comes from the assembler, not from the query.
        let sql = format!("{RECIPE_TREE_SELECT} ORDER BY r.id ASC, s.step_number ASC, si.id ASC");
        let assembler = self.load_assembler(&sql, &[])?;
        Ok(assembler.finish())
    }

    /// One recipe and its full tree. `RecipeNotFound` if the id matches no
    /// recipe; `AmbiguousRecipe` if the filtered query somehow produced more
    /// than one distinct recipe id (a defect upstream, checked defensively).
    pub fn recipe_by_id(&self, id: i64) -> Result<Recipe, StoreError> {
        let sql = format!("{RECIPE_TREE_SELECT} WHERE r.id = ?1 ORDER BY s.step_number ASC, si.id ASC");
        let assembler = self.load_assembler(&sql, &[&id])?;
        assembler.finish_one(id).map_err(|err| match err {
            AssembleError::NotFound { id } => StoreError::RecipeNotFound { id },
            AssembleError::Ambiguous { id, found } => StoreError::AmbiguousRecipe { id, found },
        })
    }

    /// Run one join query and fold every row into a fresh assembler. A decode
    /// failure aborts immediately; the statement and cursor are released on
    /// every path by drop.
    fn load_assembler(
        &self,
        sql: &str,
        params: &[&dyn ToSql],
    ) -> Result<RecipeAssembler, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let actual = stmt.column_count();
        if actual != COLUMN_COUNT {
            return Err(StoreError::ColumnContract {
                expected: COLUMN_COUNT,
                actual,
            });
        }

        let mut rows = stmt.query(params)?;
        let mut assembler = RecipeAssembler::new();
        let mut index = 0usize;
        while let Some(row) = rows.next()? {
            let decoded = decode_join_row(row)
                .map_err(|source| StoreError::RowDecode { row: index, source })?;
            assembler.push(decoded);
            index += 1;
        }
        Ok(assembler)
    }
}

fn decode_join_row(row: &rusqlite::Row<'_>) -> Result<JoinRow, rusqlite::Error> {
    Ok(JoinRow {
        recipe: RecipeRow {
            id: row.get(0)?,
            title: row.get(1)?,
            created_at_ms: row.get(2)?,
        },
        step_ingredient: StepIngredientRow {
            id: row.get(3)?,
            quantity: row.get(4)?,
            unit: row.get(5)?,
            created_at_ms: row.get(6)?,
        },
        ingredient: IngredientRow {
            id: row.get(7)?,
            name: row.get(8)?,
            created_at_ms: row.get(9)?,
        },
        step: StepRow {
            id: row.get(10)?,
            data: row.get(11)?,
            step_number: row.get(12)?,
            created_at_ms: row.get(13)?,
        },
        trigger_group: TriggerGroupRow {
            id: row.get(14)?,
            action_params: row.get(15)?,
            action_key: row.get(16)?,
            service: row.get(17)?,
        },
        trigger: TriggerRow {
            id: row.get(18)?,
            action_params: row.get(19)?,
            action: row.get(20)?,
            service: row.get(21)?,
            trigger_params: row.get(22)?,
            created_at_ms: row.get(23)?,
        },
        trigger_type: TriggerTypeRow {
            id: row.get(24)?,
            created_at_ms: row.get(25)?,
            key: row.get(26)?,
            sensor_type: row.get(27)?,
        },
        utensil: UtensilRow {
            id: row.get(28)?,
            name: row.get(29)?,
            created_at_ms: row.get(30)?,
        },
    })
}
