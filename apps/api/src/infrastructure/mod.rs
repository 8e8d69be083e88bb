// Infrastructure layer module
// Database adapters behind the domain repository traits

pub mod database;
pub mod repositories;
