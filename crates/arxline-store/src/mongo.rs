//! MongoDB sink
//!
//! The driver is async; every call blocks on the shared runtime so the
//! harvest loop stays sequential.

use anyhow::{Context, Result};
use arxline_core::SHARED_RUNTIME;
use futures_util::TryStreamExt;
use mongodb::bson::{Bson, Document, doc, from_document};
use mongodb::{Client, Collection, IndexModel};

use crate::config::MongoConfig;
use crate::record::PaperRecord;
use crate::sink::RecordSink;

/// Keys of the compound text index used by `search`.
pub fn text_index_keys() -> Document {
    doc! {
        "title": "text",
        "authors": "text",
        "summary": "text",
        "keywords": "text",
    }
}

/// A stored record matched by a text search
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub record: PaperRecord,
    pub score: f64,
}

pub struct MongoStore {
    client: Client,
    collection: Collection<Document>,
    namespace: String,
}

impl MongoStore {
    /// Open a client and ping the server so bad settings fail here.
    pub fn connect(config: &MongoConfig) -> Result<Self> {
        let namespace = format!("{}.{}", config.database, config.collection);
        SHARED_RUNTIME.handle().block_on(async {
            let client = Client::with_uri_str(&config.uri)
                .await
                .context("Invalid MongoDB connection string")?;
            let database = client.database(&config.database);
            database
                .run_command(doc! { "ping": 1 })
                .await
                .with_context(|| format!("MongoDB not reachable for {namespace}"))?;
            log::info!("Connected to MongoDB ({namespace})");

            let collection = database.collection::<Document>(&config.collection);
            Ok(Self {
                client,
                collection,
                namespace,
            })
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Create the compound text index. Re-running with the same keys is a no-op.
    pub fn ensure_text_index(&self) -> Result<String> {
        let model = IndexModel::builder().keys(text_index_keys()).build();
        let created = SHARED_RUNTIME
            .handle()
            .block_on(async { self.collection.create_index(model).await })
            .with_context(|| format!("Failed to create text index on {}", self.namespace))?;
        Ok(created.index_name)
    }

    /// Records matching `query`, best match first.
    ///
    /// Needs the text index; without it the server rejects the query.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let filter = doc! { "$text": { "$search": query } };
        let score = doc! { "score": { "$meta": "textScore" } };
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let docs = SHARED_RUNTIME
            .handle()
            .block_on(async {
                let cursor = self
                    .collection
                    .find(filter)
                    .projection(score.clone())
                    .sort(score)
                    .limit(limit)
                    .await?;
                cursor.try_collect::<Vec<Document>>().await
            })
            .with_context(|| format!("Text search failed on {}", self.namespace))?;

        docs.into_iter().map(search_hit).collect()
    }

    pub fn count(&self) -> Result<u64> {
        SHARED_RUNTIME
            .handle()
            .block_on(async { self.collection.count_documents(doc! {}).await })
            .with_context(|| format!("Failed to count documents in {}", self.namespace))
    }

    /// Shut the client down, waiting for in-flight operations.
    pub fn close(self) {
        let Self {
            client, namespace, ..
        } = self;
        SHARED_RUNTIME
            .handle()
            .block_on(async { client.shutdown().await });
        log::debug!("Closed MongoDB connection ({namespace})");
    }
}

impl RecordSink for MongoStore {
    fn insert(&mut self, record: &PaperRecord) -> Result<()> {
        let document = record
            .to_document()
            .with_context(|| format!("Failed to encode {}", record.id))?;
        let result = SHARED_RUNTIME
            .handle()
            .block_on(async { self.collection.insert_one(document).await })
            .with_context(|| format!("Failed to insert {}", record.id))?;
        log::trace!("Inserted {} as {}", record.id, result.inserted_id);
        Ok(())
    }
}

fn search_hit(mut document: Document) -> Result<SearchHit> {
    let score = match document.remove("score") {
        Some(Bson::Double(score)) => score,
        _ => 0.0,
    };
    document.remove("_id");
    let record: PaperRecord =
        from_document(document).context("Stored document does not match the record schema")?;
    Ok(SearchHit { record, score })
}
