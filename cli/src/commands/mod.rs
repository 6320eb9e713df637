mod catalog;
mod helpers;
mod plan;
mod recipe;

pub(crate) use catalog::{cmd_enrich, cmd_import, cmd_search};
pub(crate) use plan::{cmd_plan_add, cmd_plan_delete, cmd_plan_edit, cmd_plan_list};
pub(crate) use recipe::{
    cmd_recipe_add, cmd_recipe_delete, cmd_recipe_edit, cmd_recipe_list, cmd_recipe_show,
};
