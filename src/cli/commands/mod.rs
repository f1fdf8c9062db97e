pub mod synthesize;
pub mod show;
pub mod schema;
