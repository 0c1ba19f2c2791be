pub mod auth;
pub mod dashboard;
pub mod leads;
pub mod properties;
pub mod settings;
pub mod users;
