use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// A cataloged recipe, either entered manually or imported from the
/// external catalog.
///
/// Imported recipes start as stubs (`external_id` set, `ingredients` and
/// `calories` null) and are filled in later by enrichment.
#[derive(Debug, Clone, Serialize)]
pub struct Recipe {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub vegetarian: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: String,
}

impl Recipe {
    /// True when this recipe was imported from the catalog and has not
    /// been enriched yet.
    #[must_use]
    pub fn is_stub(&self) -> bool {
        self.external_id.is_some() && self.ingredients.is_none() && self.calories.is_none()
    }
}

/// Input for a manually entered recipe. All fields are required.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub name: String,
    pub ingredients: String,
    pub calories: i64,
    pub category: String,
    pub vegetarian: bool,
}

/// Input for a recipe saved from catalog search results.
#[derive(Debug, Clone)]
pub struct RecipeStub {
    pub external_id: String,
    pub title: String,
    pub image_url: Option<String>,
}

pub fn validate_new_recipe(recipe: &NewRecipe) -> Result<()> {
    if recipe.name.trim().is_empty() {
        return Err(CoreError::validation("name", "must not be empty"));
    }
    if recipe.ingredients.trim().is_empty() {
        return Err(CoreError::validation("ingredients", "must not be empty"));
    }
    if recipe.calories <= 0 {
        return Err(CoreError::validation("calories", "must be greater than 0"));
    }
    if recipe.category.trim().is_empty() {
        return Err(CoreError::validation("category", "must not be empty"));
    }
    Ok(())
}

pub fn validate_recipe_stub(stub: &RecipeStub) -> Result<()> {
    if stub.external_id.trim().is_empty() {
        return Err(CoreError::validation("external_id", "must not be empty"));
    }
    if stub.title.trim().is_empty() {
        return Err(CoreError::validation("title", "must not be empty"));
    }
    Ok(())
}

/// Day of the week for a meal plan slot. Stored as 0 (Monday) to 6 (Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    #[must_use]
    pub fn as_i64(self) -> i64 {
        self as i64
    }

    pub fn from_i64(value: i64) -> Result<Self> {
        usize::try_from(value)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| {
                CoreError::validation("day_of_week", format!("must be 0-6, got {value}"))
            })
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }
}

impl std::str::FromStr for DayOfWeek {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        // Accepts full names and three-letter abbreviations.
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == lower || d.as_str()[..3] == lower)
            .ok_or_else(|| CoreError::validation("day_of_week", format!("unknown day '{s}'")))
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Meal slot within a day. Variant order is chronological and drives
/// plan listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snack];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }

    /// Rank used for chronological ordering in SQL.
    #[must_use]
    pub fn rank(self) -> i64 {
        self as i64
    }
}

impl std::str::FromStr for MealType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == lower)
            .ok_or_else(|| {
                CoreError::validation(
                    "meal_type",
                    format!(
                        "unknown meal type '{s}'. Must be one of: breakfast, lunch, dinner, snack"
                    ),
                )
            })
    }
}

impl std::fmt::Display for MealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled meal: one recipe in one (day, meal) slot of the weekly plan.
#[derive(Debug, Clone, Serialize)]
pub struct MealPlanEntry {
    pub id: i64,
    pub user_id: i64,
    pub recipe_id: i64,
    pub day_of_week: DayOfWeek,
    pub meal_type: MealType,
    pub created_at: String,
    // Joined field for display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewMealPlanEntry {
    pub recipe_id: i64,
    pub day_of_week: DayOfWeek,
    pub meal_type: MealType,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateMealPlanEntry {
    pub recipe_id: Option<i64>,
    pub day_of_week: Option<DayOfWeek>,
    pub meal_type: Option<MealType>,
}

/// Normalized catalog search hit.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeSummary {
    pub external_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Normalized catalog detail record used for enrichment.
#[derive(Debug, Clone, Default)]
pub struct RecipeDetails {
    pub nutrients: Vec<crate::spoonacular::Nutrient>,
    pub ingredient_lines: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn manual_recipe() -> NewRecipe {
        NewRecipe {
            name: "Lentil Soup".to_string(),
            ingredients: "1 cup lentils\n2 carrots".to_string(),
            calories: 320,
            category: "Soup".to_string(),
            vegetarian: true,
        }
    }

    #[test]
    fn test_validate_new_recipe_valid() {
        assert!(validate_new_recipe(&manual_recipe()).is_ok());
    }

    #[test]
    fn test_validate_new_recipe_blank_name() {
        let mut r = manual_recipe();
        r.name = "   ".to_string();
        assert!(validate_new_recipe(&r).is_err());
    }

    #[test]
    fn test_validate_new_recipe_blank_ingredients() {
        let mut r = manual_recipe();
        r.ingredients = String::new();
        assert!(validate_new_recipe(&r).is_err());
    }

    #[test]
    fn test_validate_new_recipe_zero_calories() {
        let mut r = manual_recipe();
        r.calories = 0;
        assert!(validate_new_recipe(&r).is_err());
    }

    #[test]
    fn test_validate_new_recipe_negative_calories() {
        let mut r = manual_recipe();
        r.calories = -200;
        assert!(validate_new_recipe(&r).is_err());
    }

    #[test]
    fn test_validate_new_recipe_blank_category() {
        let mut r = manual_recipe();
        r.category = " ".to_string();
        assert!(validate_new_recipe(&r).is_err());
    }

    #[test]
    fn test_validate_recipe_stub() {
        let stub = RecipeStub {
            external_id: "99".to_string(),
            title: "Soup".to_string(),
            image_url: None,
        };
        assert!(validate_recipe_stub(&stub).is_ok());

        let mut no_id = stub.clone();
        no_id.external_id = String::new();
        assert!(validate_recipe_stub(&no_id).is_err());

        let mut no_title = stub;
        no_title.title = "  ".to_string();
        assert!(validate_recipe_stub(&no_title).is_err());
    }

    #[test]
    fn test_day_of_week_roundtrip() {
        for (i, day) in DayOfWeek::ALL.into_iter().enumerate() {
            assert_eq!(day.as_i64(), i as i64);
            assert_eq!(DayOfWeek::from_i64(i as i64).unwrap(), day);
        }
        assert!(DayOfWeek::from_i64(7).is_err());
        assert!(DayOfWeek::from_i64(-1).is_err());
    }

    #[test]
    fn test_day_of_week_from_str() {
        assert_eq!(DayOfWeek::from_str("monday").unwrap(), DayOfWeek::Monday);
        assert_eq!(DayOfWeek::from_str("Wed").unwrap(), DayOfWeek::Wednesday);
        assert_eq!(DayOfWeek::from_str("SUN").unwrap(), DayOfWeek::Sunday);
        assert!(DayOfWeek::from_str("someday").is_err());
    }

    #[test]
    fn test_meal_type_from_str() {
        assert_eq!(MealType::from_str("breakfast").unwrap(), MealType::Breakfast);
        assert_eq!(MealType::from_str("Dinner").unwrap(), MealType::Dinner);
        assert!(MealType::from_str("brunch").is_err());
    }

    #[test]
    fn test_meal_type_rank_is_chronological() {
        assert!(MealType::Breakfast.rank() < MealType::Lunch.rank());
        assert!(MealType::Lunch.rank() < MealType::Dinner.rank());
        assert!(MealType::Dinner.rank() < MealType::Snack.rank());
    }

    #[test]
    fn test_recipe_is_stub() {
        let recipe = Recipe {
            id: 1,
            user_id: 1,
            name: "Soup".to_string(),
            ingredients: None,
            calories: None,
            category: None,
            vegetarian: false,
            external_id: Some("99".to_string()),
            image_url: Some("x.jpg".to_string()),
            created_at: String::new(),
        };
        assert!(recipe.is_stub());

        let mut enriched = recipe;
        enriched.calories = Some(210);
        assert!(!enriched.is_stub());
    }
}
