use anyhow::{Context, Result};
use mongodb::bson::{Bson, doc};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};

use crate::config::{FALLBACK_DATABASE, MongoConfig};
use crate::models::PlanetRecord;

/// An open session on the planets collection.
#[allow(async_fn_in_trait)]
pub trait PlanetStore {
    /// Removes every document and returns how many were deleted.
    async fn delete_all(&self) -> Result<u64>;
    /// Writes the batch in order and returns the store-assigned ids.
    async fn insert_batch(&self, planets: &[PlanetRecord]) -> Result<Vec<String>>;
    async fn count(&self) -> Result<u64>;
    async fn close(self) -> Result<()>;
}

/// Opens a [`PlanetStore`] session. A single attempt, no retry.
#[allow(async_fn_in_trait)]
pub trait Connector {
    type Store: PlanetStore;

    async fn connect(&self, config: &MongoConfig) -> Result<Self::Store>;
}

pub struct MongoConnector;

pub struct MongoStore {
    client: Client,
    collection: Collection<PlanetRecord>,
}

pub async fn create_mongo_client(config: &MongoConfig) -> Result<(Client, String)> {
    let mut options = ClientOptions::parse(&config.uri)
        .await
        .context("invalid MongoDB connection string")?;

    if let Some(credentials) = &config.credentials {
        let mut credential = options.credential.take().unwrap_or_default();
        credential.username = Some(credentials.username.clone());
        credential.password = Some(credentials.password.clone());
        options.credential = Some(credential);
    }

    let database = config
        .database
        .clone()
        .or_else(|| options.default_database.clone())
        .unwrap_or(String::from(FALLBACK_DATABASE));

    let client = Client::with_options(options)?;

    // The driver connects lazily; ping so auth and reachability fail here.
    client
        .database("admin")
        .run_command(doc! { "ping": 1 }, None)
        .await
        .context("failed to ping MongoDB")?;

    Ok((client, database))
}

impl Connector for MongoConnector {
    type Store = MongoStore;

    async fn connect(&self, config: &MongoConfig) -> Result<MongoStore> {
        let (client, database) = create_mongo_client(config).await?;
        tracing::debug!(%database, collection = %config.collection, "using collection");
        let collection = client
            .database(&database)
            .collection::<PlanetRecord>(&config.collection);
        Ok(MongoStore { client, collection })
    }
}

impl PlanetStore for MongoStore {
    async fn delete_all(&self) -> Result<u64> {
        let result = self.collection.delete_many(doc! {}, None).await?;
        Ok(result.deleted_count)
    }

    async fn insert_batch(&self, planets: &[PlanetRecord]) -> Result<Vec<String>> {
        if planets.is_empty() {
            return Ok(Vec::new());
        }
        let result = self.collection.insert_many(planets, None).await?;
        let ids = (0..planets.len())
            .map(|index| match result.inserted_ids.get(&index) {
                Some(Bson::ObjectId(oid)) => oid.to_hex(),
                Some(other) => other.to_string(),
                None => String::new(),
            })
            .collect();
        Ok(ids)
    }

    async fn count(&self) -> Result<u64> {
        let count = self.collection.count_documents(None, None).await?;
        Ok(count)
    }

    async fn close(self) -> Result<()> {
        self.client.shutdown().await;
        Ok(())
    }
}
