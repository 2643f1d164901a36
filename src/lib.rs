pub mod config;
pub mod error;
pub mod itinerary;
pub mod models;
pub mod ordering;
pub mod route;
pub mod routes;
pub mod services;
pub mod state;
