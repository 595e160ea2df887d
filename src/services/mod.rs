pub mod database;
pub mod importer;
pub mod source;
