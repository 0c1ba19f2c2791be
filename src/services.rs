pub mod access_policy;
pub mod analytics_service;
pub mod audit_service;
pub mod auth;
pub mod lead_service;
pub mod notifier;
pub mod property_service;
pub mod seed_service;
pub mod site_config_service;
pub mod user_service;
