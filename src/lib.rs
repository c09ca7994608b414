pub mod config;
pub mod db;
pub mod deck;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod validate;
