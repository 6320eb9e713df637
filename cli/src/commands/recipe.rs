use anyhow::Result;
use std::process;

use mealmate_core::error::CoreError;
use mealmate_core::models::{NewRecipe, Recipe};
use mealmate_core::service::MealMateService;

use super::helpers::{json_error, print_recipe_table};

pub(crate) fn cmd_recipe_list(
    svc: &MealMateService,
    user: i64,
    mine: bool,
    json: bool,
) -> Result<()> {
    let recipes = if mine {
        svc.list_recipes_owned(user)?
    } else {
        svc.list_recipes_all()?
    };

    if recipes.is_empty() {
        if json {
            println!("[]");
        } else {
            eprintln!("No recipes found");
        }
        process::exit(2);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&recipes)?);
    } else {
        let refs: Vec<&Recipe> = recipes.iter().collect();
        print_recipe_table(&refs);
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn cmd_recipe_add(
    svc: &MealMateService,
    user: i64,
    name: &str,
    ingredients: &str,
    calories: i64,
    category: &str,
    vegetarian: bool,
    json: bool,
) -> Result<()> {
    let recipe = svc.create_recipe(
        user,
        &NewRecipe {
            name: name.to_string(),
            ingredients: ingredients.to_string(),
            calories,
            category: category.to_string(),
            vegetarian,
        },
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recipe)?);
    } else {
        let name = &recipe.name;
        let id = recipe.id;
        println!("Added recipe: {name} (id: {id})");
    }

    Ok(())
}

pub(crate) fn cmd_recipe_show(svc: &MealMateService, user: i64, id: i64, json: bool) -> Result<()> {
    match svc.get_recipe(user, id) {
        Ok(recipe) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&recipe)?);
            } else {
                println!("{} (id: {})", recipe.name, recipe.id);
                if let Some(category) = &recipe.category {
                    println!("Category:   {category}");
                }
                println!(
                    "Calories:   {}",
                    recipe.calories.map_or("-".into(), |c| c.to_string())
                );
                println!("Vegetarian: {}", if recipe.vegetarian { "yes" } else { "no" });
                if let Some(external_id) = &recipe.external_id {
                    println!("Catalog id: {external_id}");
                }
                if let Some(image_url) = &recipe.image_url {
                    println!("Image:      {image_url}");
                }
                match &recipe.ingredients {
                    Some(ingredients) => println!("Ingredients:\n{ingredients}"),
                    None => println!("Ingredients: (not enriched yet)"),
                }
            }
            Ok(())
        }
        Err(CoreError::NotFound { .. }) => {
            if json {
                println!("{}", json_error(&format!("Recipe {id} not found")));
            } else {
                eprintln!("Recipe {id} not found");
            }
            process::exit(2);
        }
        Err(e) => Err(e.into()),
    }
}

/// Full edit. Unspecified flags keep the stored value, but the merged
/// record must pass the same validation as a manual add — editing an
/// unenriched stub requires supplying ingredients and calories.
#[allow(clippy::too_many_arguments)]
pub(crate) fn cmd_recipe_edit(
    svc: &MealMateService,
    user: i64,
    id: i64,
    name: Option<String>,
    ingredients: Option<String>,
    calories: Option<i64>,
    category: Option<String>,
    vegetarian: Option<bool>,
    json: bool,
) -> Result<()> {
    let current = match svc.get_recipe(user, id) {
        Ok(r) => r,
        Err(CoreError::NotFound { .. }) => {
            if json {
                println!("{}", json_error(&format!("Recipe {id} not found")));
            } else {
                eprintln!("Recipe {id} not found");
            }
            process::exit(2);
        }
        Err(e) => return Err(e.into()),
    };

    let update = NewRecipe {
        name: name.unwrap_or(current.name),
        ingredients: ingredients
            .or(current.ingredients)
            .unwrap_or_default(),
        calories: calories.or(current.calories).unwrap_or_default(),
        category: category.or(current.category).unwrap_or_default(),
        vegetarian: vegetarian.unwrap_or(current.vegetarian),
    };

    let recipe = svc.update_recipe(user, id, &update)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recipe)?);
    } else {
        println!("Updated recipe {id}: {}", recipe.name);
    }

    Ok(())
}

pub(crate) fn cmd_recipe_delete(
    svc: &MealMateService,
    user: i64,
    id: i64,
    json: bool,
) -> Result<()> {
    if svc.delete_recipe(user, id)? {
        if json {
            println!("{}", serde_json::json!({ "deleted": id }));
        } else {
            println!("Deleted recipe {id}");
        }
    } else {
        // Idempotent: nothing to remove is not an error.
        if json {
            println!("{}", serde_json::json!({ "deleted": serde_json::Value::Null }));
        } else {
            eprintln!("Recipe {id} not found (nothing deleted)");
        }
    }
    Ok(())
}
