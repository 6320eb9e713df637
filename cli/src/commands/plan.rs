use anyhow::Result;
use std::process;

use mealmate_core::error::CoreError;
use mealmate_core::models::{DayOfWeek, MealType, NewMealPlanEntry, UpdateMealPlanEntry};
use mealmate_core::service::MealMateService;

use super::helpers::{json_error, print_plan_table};

pub(crate) fn cmd_plan_list(svc: &MealMateService, user: i64, json: bool) -> Result<()> {
    let plans = svc.list_meal_plans(user)?;

    if plans.is_empty() {
        if json {
            println!("[]");
        } else {
            eprintln!("No meal plans found");
        }
        process::exit(2);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&plans)?);
    } else {
        print_plan_table(&plans);
    }

    Ok(())
}

pub(crate) fn cmd_plan_add(
    svc: &MealMateService,
    user: i64,
    recipe_id: i64,
    day: &str,
    meal: &str,
    json: bool,
) -> Result<()> {
    let day: DayOfWeek = day.parse()?;
    let meal: MealType = meal.parse()?;

    let entry = svc.create_meal_plan(
        user,
        &NewMealPlanEntry {
            recipe_id,
            day_of_week: day,
            meal_type: meal,
        },
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        let name = entry.recipe_name.as_deref().unwrap_or("?");
        println!(
            "Planned {name} for {} {} (id: {})",
            entry.day_of_week, entry.meal_type, entry.id
        );
    }

    Ok(())
}

pub(crate) fn cmd_plan_edit(
    svc: &MealMateService,
    user: i64,
    id: i64,
    recipe_id: Option<i64>,
    day: Option<String>,
    meal: Option<String>,
    json: bool,
) -> Result<()> {
    if recipe_id.is_none() && day.is_none() && meal.is_none() {
        anyhow::bail!("Nothing to update. Provide at least one of --recipe, --day, or --meal");
    }

    let day: Option<DayOfWeek> = day.as_deref().map(str::parse).transpose()?;
    let meal: Option<MealType> = meal.as_deref().map(str::parse).transpose()?;
    let update = UpdateMealPlanEntry {
        recipe_id,
        day_of_week: day,
        meal_type: meal,
    };

    match svc.update_meal_plan(user, id, &update) {
        Ok(entry) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&entry)?);
            } else {
                let name = entry.recipe_name.as_deref().unwrap_or("?");
                println!(
                    "Updated plan {id}: {name} on {} {}",
                    entry.day_of_week, entry.meal_type
                );
            }
            Ok(())
        }
        Err(CoreError::NotFound { .. }) => {
            if json {
                println!("{}", json_error(&format!("Meal plan {id} not found")));
            } else {
                eprintln!("Meal plan {id} not found");
            }
            process::exit(2);
        }
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn cmd_plan_delete(svc: &MealMateService, user: i64, id: i64, json: bool) -> Result<()> {
    if svc.delete_meal_plan(user, id)? {
        if json {
            println!("{}", serde_json::json!({ "deleted": id }));
        } else {
            println!("Deleted meal plan {id}");
        }
    } else {
        if json {
            println!("{}", serde_json::json!({ "deleted": serde_json::Value::Null }));
        } else {
            eprintln!("Meal plan {id} not found (nothing deleted)");
        }
    }
    Ok(())
}
