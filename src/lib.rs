pub mod auth;
pub mod config;
pub mod entities;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod seeders;
pub mod services;
pub mod startup;
pub mod telemetry;
pub mod utils;
