use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use mealmate_core::models::{MealPlanEntry, Recipe, RecipeSummary};

pub(crate) fn print_recipe_table(recipes: &[&Recipe]) {
    #[derive(Tabled)]
    struct RecipeRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Kcal")]
        calories: String,
        #[tabled(rename = "Category")]
        category: String,
        #[tabled(rename = "Veg")]
        vegetarian: String,
        #[tabled(rename = "Source")]
        source: String,
    }

    let rows: Vec<RecipeRow> = recipes
        .iter()
        .map(|r| RecipeRow {
            id: r.id,
            name: truncate(&r.name, 40),
            calories: r.calories.map_or("-".into(), |c| c.to_string()),
            category: r
                .category
                .as_deref()
                .map(|c| truncate(c, 16))
                .unwrap_or_else(|| "-".into()),
            vegetarian: if r.vegetarian { "yes" } else { "no" }.to_string(),
            source: if r.external_id.is_some() {
                "catalog"
            } else {
                "manual"
            }
            .to_string(),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..3)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

pub(crate) fn print_summary_table(summaries: &[RecipeSummary]) {
    #[derive(Tabled)]
    struct SummaryRow {
        #[tabled(rename = "#")]
        idx: usize,
        #[tabled(rename = "Catalog ID")]
        external_id: String,
        #[tabled(rename = "Title")]
        title: String,
        #[tabled(rename = "Image")]
        image: String,
    }

    let rows: Vec<SummaryRow> = summaries
        .iter()
        .enumerate()
        .map(|(i, s)| SummaryRow {
            idx: i + 1,
            external_id: s.external_id.clone(),
            title: truncate(&s.title, 45),
            image: s
                .image_url
                .as_deref()
                .map(|u| truncate(u, 40))
                .unwrap_or_else(|| "-".into()),
        })
        .collect();

    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{table}");
}

pub(crate) fn print_plan_table(plans: &[MealPlanEntry]) {
    #[derive(Tabled)]
    struct PlanRow {
        #[tabled(rename = "ID")]
        id: i64,
        #[tabled(rename = "Day")]
        day: String,
        #[tabled(rename = "Meal")]
        meal: String,
        #[tabled(rename = "Recipe")]
        recipe: String,
        #[tabled(rename = "Recipe ID")]
        recipe_id: i64,
    }

    let rows: Vec<PlanRow> = plans
        .iter()
        .map(|p| PlanRow {
            id: p.id,
            day: p.day_of_week.to_string(),
            meal: p.meal_type.to_string(),
            recipe: p
                .recipe_name
                .as_deref()
                .map(|n| truncate(n, 40))
                .unwrap_or_else(|| "-".into()),
            recipe_id: p.recipe_id,
        })
        .collect();

    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{table}");
}

pub(crate) fn json_error(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate("soup", 10), "soup");
    }

    #[test]
    fn test_truncate_long_string() {
        let t = truncate("a very long recipe name indeed", 10);
        assert_eq!(t, "a very ...");
        assert_eq!(t.chars().count(), 10);
    }

    #[test]
    fn test_json_error_shape() {
        assert_eq!(json_error("nope"), r#"{"error":"nope"}"#);
    }
}
