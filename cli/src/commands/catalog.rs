use anyhow::Result;
use std::process;

use mealmate_core::models::RecipeStub;
use mealmate_core::service::MealMateService;

use crate::spoonacular::SpoonacularClient;

use super::helpers::{json_error, print_summary_table};

// The provider trait is synchronous and the Spoonacular impl bridges with
// block_on, so calls through it must leave the async worker first.
fn with_provider<T>(f: impl FnOnce() -> T) -> T {
    tokio::task::block_in_place(f)
}

pub(crate) fn cmd_search(
    svc: &MealMateService,
    client: &SpoonacularClient,
    query: &str,
    limit: u32,
    json: bool,
) -> Result<()> {
    let results = with_provider(|| svc.search_catalog(client, query, limit))?;

    if results.is_empty() {
        if json {
            println!("[]");
        } else {
            eprintln!("No catalog recipes found for '{query}'");
        }
        process::exit(2);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_summary_table(&results);
        println!("Save one with: mealmate import <catalog id> <title>");
    }

    Ok(())
}

pub(crate) fn cmd_import(
    svc: &MealMateService,
    user: i64,
    external_id: &str,
    title: &str,
    image: Option<String>,
    json: bool,
) -> Result<()> {
    let recipe = svc.save_stub(
        user,
        &RecipeStub {
            external_id: external_id.to_string(),
            title: title.to_string(),
            image_url: image,
        },
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recipe)?);
    } else {
        let id = recipe.id;
        println!("Saved '{title}' from the catalog (id: {id})");
        println!("Fetch ingredients and calories with: mealmate enrich {id}");
    }

    Ok(())
}

pub(crate) fn cmd_enrich(
    svc: &MealMateService,
    client: &SpoonacularClient,
    user: i64,
    recipe_id: i64,
    json: bool,
) -> Result<()> {
    let recipe = svc.get_recipe(user, recipe_id)?;
    let Some(external_id) = recipe.external_id.clone() else {
        if json {
            println!(
                "{}",
                json_error(&format!(
                    "Recipe {recipe_id} was not imported from the catalog"
                ))
            );
        } else {
            eprintln!("Recipe {recipe_id} was not imported from the catalog; nothing to enrich");
        }
        process::exit(2);
    };

    if with_provider(|| svc.enrich_and_patch(client, user, &external_id, recipe_id))? {
        let enriched = svc.get_recipe(user, recipe_id)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&enriched)?);
        } else {
            let name = &enriched.name;
            let calories = enriched
                .calories
                .map_or("unknown".to_string(), |c| format!("{c} kcal"));
            let lines = enriched
                .ingredients
                .as_deref()
                .map_or(0, |i| i.lines().count());
            println!("Enriched {name}: {calories}, {lines} ingredient line(s)");
        }
        Ok(())
    } else {
        if json {
            println!(
                "{}",
                json_error("Catalog unavailable, recipe left unchanged")
            );
        } else {
            eprintln!("Catalog unavailable, recipe left unchanged. Try again later.");
        }
        process::exit(2);
    }
}
