pub mod analytics;
pub mod audit;
pub mod auth;
pub mod lead;
pub mod property;
pub mod site_config;
