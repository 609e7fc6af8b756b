pub mod api;
pub mod client;
pub mod database;
pub mod guard;
pub mod middleware;
pub mod models;
pub mod services;
pub mod session;
pub mod utils;
