use std::path::Path;

use crate::db::Database;
use crate::error::{CoreError, ProviderError, Result};
use crate::models::{
    MealPlanEntry, NewMealPlanEntry, NewRecipe, Recipe, RecipeDetails, RecipeStub, RecipeSummary,
    UpdateMealPlanEntry,
};
use crate::spoonacular;

/// Fallback search term when the user submits a blank query. A deliberate
/// UX default, not an error path.
pub const DEFAULT_SEARCH_TERM: &str = "chicken";

pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// Platform-native recipe catalog lookup.
///
/// The CLI implements this with reqwest; tests use an in-process mock.
/// Implementations must apply a bounded timeout and map transport failures,
/// timeouts, and non-success statuses to [`ProviderError::Unavailable`].
pub trait RecipeCatalogProvider: Send + Sync {
    fn search(
        &self,
        query: &str,
        limit: u32,
    ) -> std::result::Result<Vec<RecipeSummary>, ProviderError>;

    fn fetch_details(&self, external_id: &str)
    -> std::result::Result<RecipeDetails, ProviderError>;
}

/// Facade over the storage layer plus the two-phase catalog import flow.
///
/// Every operation takes the verified owner id supplied by the session
/// layer; the service never authenticates and fails closed on a missing
/// owner.
pub struct MealMateService {
    db: Database,
}

impl MealMateService {
    pub fn new(db_path: &Path) -> Result<Self> {
        let db = Database::open(db_path)?;
        Ok(Self { db })
    }

    pub fn new_in_memory() -> Result<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self { db })
    }

    fn require_owner(owner: i64) -> Result<()> {
        if owner <= 0 {
            return Err(CoreError::validation(
                "owner_user_id",
                "a verified user id is required",
            ));
        }
        Ok(())
    }

    // --- Recipes ---

    /// The global "view all" feed, newest first.
    pub fn list_recipes_all(&self) -> Result<Vec<Recipe>> {
        self.db.list_recipes_all()
    }

    /// Only the caller's recipes; used for plan dropdown-style selection.
    pub fn list_recipes_owned(&self, owner: i64) -> Result<Vec<Recipe>> {
        Self::require_owner(owner)?;
        self.db.list_recipes_owned(owner)
    }

    pub fn create_recipe(&self, owner: i64, recipe: &NewRecipe) -> Result<Recipe> {
        Self::require_owner(owner)?;
        self.db.insert_recipe(owner, recipe)
    }

    pub fn get_recipe(&self, owner: i64, id: i64) -> Result<Recipe> {
        Self::require_owner(owner)?;
        self.db.get_recipe(id, owner)
    }

    pub fn update_recipe(&self, owner: i64, id: i64, recipe: &NewRecipe) -> Result<Recipe> {
        Self::require_owner(owner)?;
        self.db.update_recipe(id, owner, recipe)
    }

    pub fn delete_recipe(&self, owner: i64, id: i64) -> Result<bool> {
        Self::require_owner(owner)?;
        self.db.delete_recipe(id, owner)
    }

    // --- Catalog import (search -> stub -> enrich) ---

    /// Search the external catalog. A blank query falls back to
    /// [`DEFAULT_SEARCH_TERM`].
    pub fn search_catalog(
        &self,
        provider: &dyn RecipeCatalogProvider,
        query: &str,
        limit: u32,
    ) -> Result<Vec<RecipeSummary>> {
        let query = query.trim();
        let query = if query.is_empty() {
            DEFAULT_SEARCH_TERM
        } else {
            query
        };
        Ok(provider.search(query, limit)?)
    }

    /// Phase one of the import: persist a stub carrying only what the search
    /// result had. Repeated saves of the same external id create separate
    /// rows; there is no dedup.
    pub fn save_stub(&self, owner: i64, stub: &RecipeStub) -> Result<Recipe> {
        Self::require_owner(owner)?;
        self.db.insert_recipe_stub(owner, stub)
    }

    /// Phase two: fetch full details and patch the stored recipe's
    /// ingredients and calories in one write.
    ///
    /// Returns `Ok(false)` when the catalog was unreachable or had no such
    /// recipe; the stored row is left untouched. Returns `Ok(true)` once the
    /// patch is applied, even when the catalog data yielded no calories or
    /// ingredients — absent values are a valid enrichment outcome.
    pub fn enrich_and_patch(
        &self,
        provider: &dyn RecipeCatalogProvider,
        owner: i64,
        external_id: &str,
        recipe_id: i64,
    ) -> Result<bool> {
        Self::require_owner(owner)?;
        if external_id.trim().is_empty() {
            return Err(CoreError::validation("external_id", "must not be empty"));
        }

        let details = match provider.fetch_details(external_id) {
            Ok(details) => details,
            Err(err) => {
                log::warn!("enrichment of recipe {recipe_id} skipped: {err}");
                return Ok(false);
            }
        };

        let calories = spoonacular::extract_calories(&details.nutrients);
        let ingredients = if details.ingredient_lines.is_empty() {
            None
        } else {
            Some(details.ingredient_lines.join("\n"))
        };

        self.db
            .apply_enrichment(recipe_id, owner, ingredients.as_deref(), calories)?;
        Ok(true)
    }

    // --- Meal plans ---

    pub fn list_meal_plans(&self, owner: i64) -> Result<Vec<MealPlanEntry>> {
        Self::require_owner(owner)?;
        self.db.list_meal_plans(owner)
    }

    pub fn create_meal_plan(&self, owner: i64, entry: &NewMealPlanEntry) -> Result<MealPlanEntry> {
        Self::require_owner(owner)?;
        self.db.insert_meal_plan(owner, entry)
    }

    pub fn get_meal_plan(&self, owner: i64, id: i64) -> Result<MealPlanEntry> {
        Self::require_owner(owner)?;
        self.db.get_meal_plan(id, owner)
    }

    pub fn update_meal_plan(
        &self,
        owner: i64,
        id: i64,
        update: &UpdateMealPlanEntry,
    ) -> Result<MealPlanEntry> {
        Self::require_owner(owner)?;
        self.db.update_meal_plan(id, owner, update)
    }

    pub fn delete_meal_plan(&self, owner: i64, id: i64) -> Result<bool> {
        Self::require_owner(owner)?;
        self.db.delete_meal_plan(id, owner)
    }
}
