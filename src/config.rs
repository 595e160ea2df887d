use std::env;
use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "planets-data.json";
pub const DEFAULT_COLLECTION: &str = "planets";
// Used when neither DATABASE_NAME nor the URI names a database.
pub const FALLBACK_DATABASE: &str = "test";

// Development placeholders only. Real deployments set MONGO_* in the
// environment or in a `.env` file.
pub const DEV_MONGO_URI: &str = "your-mongodb-uri-here";
pub const DEV_MONGO_USERNAME: &str = "your-username-here";
pub const DEV_MONGO_PASSWORD: &str = "your-password-here";

#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Where and how to reach the datastore.
#[derive(Debug, Clone, PartialEq)]
pub struct MongoConfig {
    pub uri: String,
    pub credentials: Option<Credentials>,
    /// `None` uses the database named in the URI, else [`FALLBACK_DATABASE`].
    pub database: Option<String>,
    pub collection: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: String::from(DEV_MONGO_URI),
            credentials: Some(Credentials {
                username: String::from(DEV_MONGO_USERNAME),
                password: String::from(DEV_MONGO_PASSWORD),
            }),
            database: None,
            collection: String::from(DEFAULT_COLLECTION),
        }
    }
}

impl MongoConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. An empty username disables
    /// authentication.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let uri = lookup("MONGO_URI").unwrap_or(String::from(DEV_MONGO_URI));
        let username = lookup("MONGO_USERNAME").unwrap_or(String::from(DEV_MONGO_USERNAME));
        let password = lookup("MONGO_PASSWORD").unwrap_or(String::from(DEV_MONGO_PASSWORD));
        let credentials = if username.is_empty() {
            None
        } else {
            Some(Credentials { username, password })
        };
        let database = lookup("DATABASE_NAME").filter(|name| !name.is_empty());
        let collection = lookup("COLLECTION_NAME")
            .filter(|name| !name.is_empty())
            .unwrap_or(String::from(DEFAULT_COLLECTION));

        Self {
            uri,
            credentials,
            database,
            collection,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportConfig {
    pub data_file: PathBuf,
    pub mongo: MongoConfig,
}

impl ImportConfig {
    pub fn new(mongo: MongoConfig) -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            mongo,
        }
    }

    #[cfg(test)]
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }
}
