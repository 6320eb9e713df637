use std::path::Path;

use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::{CoreError, Result};
use crate::models::{
    DayOfWeek, MealPlanEntry, MealType, NewMealPlanEntry, NewRecipe, Recipe, RecipeStub,
    UpdateMealPlanEntry, validate_new_recipe, validate_recipe_stub,
};

// (id, user_id, recipe_id, day_of_week, meal_type, created_at, recipe_name)
type MealPlanRow = (i64, i64, i64, i64, String, String, Option<String>);

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        // The bundled SQLite is compiled with SQLITE_DEFAULT_FOREIGN_KEYS=1;
        // restore stock SQLite behavior so the REFERENCES clauses stay
        // declarative (the users table is populated by the auth layer, not
        // this crate).
        self.conn.pragma_update(None, "foreign_keys", false)?;

        let version: i64 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version < 1 {
            // The users table is owned by the auth layer; it exists here only
            // so the user_id references have a target.
            self.conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS users (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    username TEXT NOT NULL UNIQUE,
                    password TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS recipes (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    user_id INTEGER NOT NULL REFERENCES users(id),
                    name TEXT NOT NULL,
                    ingredients TEXT,
                    calories INTEGER,
                    category TEXT,
                    vegetarian INTEGER NOT NULL DEFAULT 0,
                    external_id TEXT,
                    image_url TEXT,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS meal_plans (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    user_id INTEGER NOT NULL REFERENCES users(id),
                    recipe_id INTEGER NOT NULL REFERENCES recipes(id),
                    day_of_week INTEGER NOT NULL CHECK (day_of_week BETWEEN 0 AND 6),
                    meal_type TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_recipes_user ON recipes(user_id);
                CREATE INDEX IF NOT EXISTS idx_meal_plans_user ON meal_plans(user_id);
                CREATE INDEX IF NOT EXISTS idx_meal_plans_recipe ON meal_plans(recipe_id);

                PRAGMA user_version = 1;",
            )?;
        }

        Ok(())
    }

    // --- Row mapping helpers ---

    fn recipe_from_row(row: &rusqlite::Row) -> rusqlite::Result<Recipe> {
        let vegetarian: i64 = row.get(6)?;
        Ok(Recipe {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            ingredients: row.get(3)?,
            calories: row.get(4)?,
            category: row.get(5)?,
            vegetarian: vegetarian != 0,
            external_id: row.get(7)?,
            image_url: row.get(8)?,
            created_at: row.get(9)?,
        })
    }

    // Expects columns:
    // 0: mp.id, 1: mp.user_id, 2: mp.recipe_id, 3: mp.day_of_week,
    // 4: mp.meal_type, 5: mp.created_at, 6: r.name
    fn meal_plan_from_row(row: &rusqlite::Row) -> rusqlite::Result<MealPlanRow> {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
            row.get(6)?,
        ))
    }

    fn meal_plan_from_parts(parts: MealPlanRow) -> Result<MealPlanEntry> {
        let (id, user_id, recipe_id, day, meal, created_at, recipe_name) = parts;
        Ok(MealPlanEntry {
            id,
            user_id,
            recipe_id,
            day_of_week: DayOfWeek::from_i64(day)?,
            meal_type: meal.parse::<MealType>()?,
            created_at,
            recipe_name,
        })
    }

    // --- Recipes ---

    /// The shared "view all" feed. Deliberately unscoped; owner-scoped reads
    /// use [`Database::list_recipes_owned`].
    pub fn list_recipes_all(&self) -> Result<Vec<Recipe>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM recipes ORDER BY created_at DESC, id DESC")?;
        let recipes = stmt
            .query_map([], Self::recipe_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(recipes)
    }

    pub fn list_recipes_owned(&self, owner: i64) -> Result<Vec<Recipe>> {
        let mut stmt = self.conn.prepare(
            "SELECT * FROM recipes WHERE user_id = ?1 ORDER BY created_at DESC, id DESC",
        )?;
        let recipes = stmt
            .query_map(params![owner], Self::recipe_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(recipes)
    }

    pub fn insert_recipe(&self, owner: i64, recipe: &NewRecipe) -> Result<Recipe> {
        validate_new_recipe(recipe)?;
        let now = Local::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO recipes (user_id, name, ingredients, calories, category, vegetarian, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                owner,
                recipe.name,
                recipe.ingredients,
                recipe.calories,
                recipe.category,
                i64::from(recipe.vegetarian),
                now,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_recipe(id, owner)
    }

    /// Save an imported catalog recipe with only title/image/external id set.
    /// Ingredients and calories stay null until enrichment.
    pub fn insert_recipe_stub(&self, owner: i64, stub: &RecipeStub) -> Result<Recipe> {
        validate_recipe_stub(stub)?;
        let now = Local::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO recipes (user_id, name, external_id, image_url, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![owner, stub.title, stub.external_id, stub.image_url, now],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_recipe(id, owner)
    }

    pub fn get_recipe(&self, id: i64, owner: i64) -> Result<Recipe> {
        self.conn
            .query_row(
                "SELECT * FROM recipes WHERE id = ?1 AND user_id = ?2",
                params![id, owner],
                Self::recipe_from_row,
            )
            .optional()?
            .ok_or_else(|| CoreError::not_found("recipe", id))
    }

    /// Full edit: validates the same rules as manual creation.
    pub fn update_recipe(&self, id: i64, owner: i64, recipe: &NewRecipe) -> Result<Recipe> {
        validate_new_recipe(recipe)?;
        let changed = self.conn.execute(
            "UPDATE recipes SET name = ?1, ingredients = ?2, calories = ?3, category = ?4, vegetarian = ?5
             WHERE id = ?6 AND user_id = ?7",
            params![
                recipe.name,
                recipe.ingredients,
                recipe.calories,
                recipe.category,
                i64::from(recipe.vegetarian),
                id,
                owner,
            ],
        )?;
        if changed == 0 {
            return Err(CoreError::not_found("recipe", id));
        }
        self.get_recipe(id, owner)
    }

    /// Enrichment patch: sets only ingredients and calories, both allowed to
    /// be absent when the catalog had nothing usable. Scoped to the owner so
    /// an enrichment call can never write another user's recipe.
    pub fn apply_enrichment(
        &self,
        id: i64,
        owner: i64,
        ingredients: Option<&str>,
        calories: Option<i64>,
    ) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE recipes SET ingredients = ?1, calories = ?2 WHERE id = ?3 AND user_id = ?4",
            params![ingredients, calories, id, owner],
        )?;
        if changed == 0 {
            return Err(CoreError::not_found("recipe", id));
        }
        Ok(())
    }

    /// Idempotent: deleting an absent or non-owned id is a no-op.
    /// Returns whether a row was removed.
    pub fn delete_recipe(&self, id: i64, owner: i64) -> Result<bool> {
        let changed = self.conn.execute(
            "DELETE FROM recipes WHERE id = ?1 AND user_id = ?2",
            params![id, owner],
        )?;
        Ok(changed > 0)
    }

    // --- Meal plans ---

    fn recipe_owned_by(&self, recipe_id: i64, owner: i64) -> Result<bool> {
        let owned: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM recipes WHERE id = ?1 AND user_id = ?2)",
            params![recipe_id, owner],
            |row| row.get(0),
        )?;
        Ok(owned)
    }

    /// All plan entries for one user, joined with recipe names and ordered
    /// chronologically: Monday through Sunday, breakfast through snack.
    pub fn list_meal_plans(&self, owner: i64) -> Result<Vec<MealPlanEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT mp.id, mp.user_id, mp.recipe_id, mp.day_of_week, mp.meal_type, mp.created_at,
                    r.name AS recipe_name
             FROM meal_plans mp
             JOIN recipes r ON mp.recipe_id = r.id
             WHERE mp.user_id = ?1
             ORDER BY mp.day_of_week,
                      CASE mp.meal_type
                          WHEN 'breakfast' THEN 0
                          WHEN 'lunch' THEN 1
                          WHEN 'dinner' THEN 2
                          ELSE 3
                      END,
                      mp.id",
        )?;
        let rows = stmt
            .query_map(params![owner], Self::meal_plan_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.into_iter().map(Self::meal_plan_from_parts).collect()
    }

    /// Rejects a recipe_id that does not belong to the owner. The check is
    /// explicit rather than trusted from caller input.
    pub fn insert_meal_plan(&self, owner: i64, entry: &NewMealPlanEntry) -> Result<MealPlanEntry> {
        if !self.recipe_owned_by(entry.recipe_id, owner)? {
            return Err(CoreError::validation(
                "recipe_id",
                format!("recipe {} does not belong to user {owner}", entry.recipe_id),
            ));
        }
        let now = Local::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO meal_plans (user_id, recipe_id, day_of_week, meal_type, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                owner,
                entry.recipe_id,
                entry.day_of_week.as_i64(),
                entry.meal_type.as_str(),
                now,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_meal_plan(id, owner)
    }

    pub fn get_meal_plan(&self, id: i64, owner: i64) -> Result<MealPlanEntry> {
        let parts = self
            .conn
            .query_row(
                "SELECT mp.id, mp.user_id, mp.recipe_id, mp.day_of_week, mp.meal_type, mp.created_at,
                        r.name AS recipe_name
                 FROM meal_plans mp
                 JOIN recipes r ON mp.recipe_id = r.id
                 WHERE mp.id = ?1 AND mp.user_id = ?2",
                params![id, owner],
                Self::meal_plan_from_row,
            )
            .optional()?
            .ok_or_else(|| CoreError::not_found("meal plan", id))?;
        Self::meal_plan_from_parts(parts)
    }

    /// Partial update; a changed recipe_id is re-checked for ownership.
    pub fn update_meal_plan(
        &self,
        id: i64,
        owner: i64,
        update: &UpdateMealPlanEntry,
    ) -> Result<MealPlanEntry> {
        let current = self.get_meal_plan(id, owner)?;
        let recipe_id = update.recipe_id.unwrap_or(current.recipe_id);
        let day = update.day_of_week.unwrap_or(current.day_of_week);
        let meal = update.meal_type.unwrap_or(current.meal_type);

        if !self.recipe_owned_by(recipe_id, owner)? {
            return Err(CoreError::validation(
                "recipe_id",
                format!("recipe {recipe_id} does not belong to user {owner}"),
            ));
        }

        self.conn.execute(
            "UPDATE meal_plans SET recipe_id = ?1, day_of_week = ?2, meal_type = ?3
             WHERE id = ?4 AND user_id = ?5",
            params![recipe_id, day.as_i64(), meal.as_str(), id, owner],
        )?;
        self.get_meal_plan(id, owner)
    }

    /// Idempotent, like [`Database::delete_recipe`].
    pub fn delete_meal_plan(&self, id: i64, owner: i64) -> Result<bool> {
        let changed = self.conn.execute(
            "DELETE FROM meal_plans WHERE id = ?1 AND user_id = ?2",
            params![id, owner],
        )?;
        Ok(changed > 0)
    }
}
