//! Spoonacular response shapes and the pure mapping into normalized
//! catalog records. The HTTP client lives in the CLI crate.

use serde::{Deserialize, Serialize};

use crate::models::{RecipeDetails, RecipeSummary};

/// One entry from the catalog's nutrient list. Names vary by recipe
/// ("Calories", "Energy", "Kilocalories", ...), hence the fallback
/// matching in [`extract_calories`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nutrient {
    pub name: String,
    pub amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InformationResponse {
    pub nutrition: Option<Nutrition>,
    #[serde(rename = "extendedIngredients", default)]
    pub extended_ingredients: Vec<ExtendedIngredient>,
}

#[derive(Debug, Deserialize)]
pub struct Nutrition {
    #[serde(default)]
    pub nutrients: Vec<Nutrient>,
}

#[derive(Debug, Deserialize)]
pub struct ExtendedIngredient {
    pub original: Option<String>,
}

#[must_use]
pub fn search_response_to_summaries(resp: SearchResponse) -> Vec<RecipeSummary> {
    resp.results
        .into_iter()
        .map(|r| RecipeSummary {
            external_id: r.id.to_string(),
            title: r.title,
            image_url: r.image.filter(|i| !i.is_empty()),
        })
        .collect()
}

#[must_use]
pub fn information_to_details(resp: InformationResponse) -> RecipeDetails {
    RecipeDetails {
        nutrients: resp.nutrition.map(|n| n.nutrients).unwrap_or_default(),
        ingredient_lines: resp
            .extended_ingredients
            .into_iter()
            .filter_map(|i| i.original)
            .filter(|line| !line.trim().is_empty())
            .collect(),
    }
}

/// Pick a calorie value out of a heterogeneous nutrient list.
///
/// Ordered fallback, first match wins, case-insensitive: exact "calories",
/// else exact "energy", else the first name containing "cal". The amount is
/// rounded half away from zero. Returns `None` when nothing matches.
#[must_use]
pub fn extract_calories(nutrients: &[Nutrient]) -> Option<i64> {
    let entry = nutrients
        .iter()
        .find(|n| n.name.eq_ignore_ascii_case("calories"))
        .or_else(|| nutrients.iter().find(|n| n.name.eq_ignore_ascii_case("energy")))
        .or_else(|| {
            nutrients
                .iter()
                .find(|n| n.name.to_lowercase().contains("cal"))
        })?;
    Some(entry.amount.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nutrient(name: &str, amount: f64) -> Nutrient {
        Nutrient {
            name: name.to_string(),
            amount,
        }
    }

    #[test]
    fn test_extract_calories_exact_match() {
        let nutrients = vec![
            nutrient("Fat", 12.0),
            nutrient("Calories", 210.4),
            nutrient("Kilocalories", 999.0),
        ];
        assert_eq!(extract_calories(&nutrients), Some(210));
    }

    #[test]
    fn test_extract_calories_energy_fallback() {
        let nutrients = vec![nutrient("Protein", 20.0), nutrient("Energy", 315.6)];
        assert_eq!(extract_calories(&nutrients), Some(316));
    }

    #[test]
    fn test_extract_calories_substring_fallback() {
        let nutrients = vec![nutrient("Sodium", 400.0), nutrient("Kilocalories", 512.2)];
        assert_eq!(extract_calories(&nutrients), Some(512));
    }

    #[test]
    fn test_extract_calories_prefers_exact_over_substring() {
        // "Kilocalories" contains "cal" but the exact "energy" entry wins first.
        let nutrients = vec![nutrient("Kilocalories", 100.0), nutrient("energy", 200.0)];
        assert_eq!(extract_calories(&nutrients), Some(200));
    }

    #[test]
    fn test_extract_calories_no_match() {
        let nutrients = vec![nutrient("Protein", 20.0), nutrient("Fat", 10.0)];
        assert_eq!(extract_calories(&nutrients), None);
    }

    #[test]
    fn test_extract_calories_empty() {
        assert_eq!(extract_calories(&[]), None);
    }

    #[test]
    fn test_extract_calories_rounds_half_up() {
        assert_eq!(extract_calories(&[nutrient("Calories", 210.5)]), Some(211));
        assert_eq!(extract_calories(&[nutrient("Calories", 209.4)]), Some(209));
    }

    #[test]
    fn test_search_response_mapping() {
        let json = r#"{"results":[
            {"id": 642583, "title": "Farfalle with Peas", "image": "https://img/642583.jpg"},
            {"id": 716429, "title": "Pasta with Garlic", "image": ""}
        ],"offset":0,"number":2}"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        let summaries = search_response_to_summaries(resp);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].external_id, "642583");
        assert_eq!(summaries[0].title, "Farfalle with Peas");
        assert_eq!(
            summaries[0].image_url.as_deref(),
            Some("https://img/642583.jpg")
        );
        // Empty image strings are normalized away
        assert!(summaries[1].image_url.is_none());
    }

    #[test]
    fn test_search_response_missing_results_field() {
        let resp: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(search_response_to_summaries(resp).is_empty());
    }

    #[test]
    fn test_information_mapping() {
        let json = r#"{
            "nutrition": {"nutrients": [{"name": "Calories", "amount": 210.4, "unit": "kcal"}]},
            "extendedIngredients": [
                {"original": "1 cup broth"},
                {"original": ""},
                {"original": null},
                {"original": "2 carrots, diced"}
            ]
        }"#;
        let resp: InformationResponse = serde_json::from_str(json).unwrap();
        let details = information_to_details(resp);
        assert_eq!(details.nutrients.len(), 1);
        assert_eq!(
            details.ingredient_lines,
            vec!["1 cup broth".to_string(), "2 carrots, diced".to_string()]
        );
    }

    #[test]
    fn test_information_mapping_no_nutrition() {
        let resp: InformationResponse = serde_json::from_str("{}").unwrap();
        let details = information_to_details(resp);
        assert!(details.nutrients.is_empty());
        assert!(details.ingredient_lines.is_empty());
    }
}
