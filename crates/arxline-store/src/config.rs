//! MongoDB connection settings from the environment

use anyhow::{Result, bail};

pub const MONGO_URI_VAR: &str = "MONGO_CONNECTION_STRING";
pub const DB_NAME_VAR: &str = "DB_NAME";
pub const COLLECTION_NAME_VAR: &str = "COLLECTION_NAME";

#[derive(Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

// The URI usually carries credentials
impl std::fmt::Debug for MongoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoConfig")
            .field("uri", &"<redacted>")
            .field("database", &self.database)
            .field("collection", &self.collection)
            .finish()
    }
}

impl MongoConfig {
    /// Read all three variables; every missing or empty one is reported.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let uri = read(MONGO_URI_VAR);
        let database = read(DB_NAME_VAR);
        let collection = read(COLLECTION_NAME_VAR);

        match (uri, database, collection) {
            (Some(uri), Some(database), Some(collection)) => Ok(Self {
                uri,
                database,
                collection,
            }),
            (uri, database, collection) => {
                let missing: Vec<&str> = [
                    (MONGO_URI_VAR, uri.is_none()),
                    (DB_NAME_VAR, database.is_none()),
                    (COLLECTION_NAME_VAR, collection.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                bail!(
                    "missing MongoDB configuration: {} must be set",
                    missing.join(", ")
                )
            }
        }
    }
}
