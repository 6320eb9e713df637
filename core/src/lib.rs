pub mod db;
pub mod error;
pub mod models;
pub mod service;
pub mod spoonacular;
