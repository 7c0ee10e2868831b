//! Integration tests against a running MongoDB
//!
//! These tests need MONGO_CONNECTION_STRING, DB_NAME and COLLECTION_NAME set
//! (use a throwaway collection) and are marked #[ignore] by default.
//! Run with: cargo test -p arxline-store --test live_mongo -- --ignored

use arxline_store::{MongoConfig, MongoStore, PaperRecord, RecordSink};

fn record(id: &str, title: &str) -> PaperRecord {
    PaperRecord {
        id: format!("http://arxiv.org/abs/{id}"),
        title: title.to_string(),
        authors: vec!["A. Author".to_string()],
        published: "2020-01-01T00:00:00Z".to_string(),
        summary: "Stellar activity cycles of solar-type stars".to_string(),
        keywords: vec!["stellar activity".to_string()],
        doi: id.to_string(),
        citations: None,
        text: None,
    }
}

#[test]
#[ignore]
fn insert_index_and_search() {
    let config = MongoConfig::from_env().expect("Mongo environment not set");
    let mut store = MongoStore::connect(&config).expect("MongoDB not reachable");

    let before = store.count().unwrap();
    store.insert(&record("1111.2222", "Magnetic cycles")).unwrap();
    store.insert(&record("1111.3333", "Unrelated title")).unwrap();
    assert_eq!(store.count().unwrap(), before + 2);

    let index = store.ensure_text_index().unwrap();
    assert_eq!(store.ensure_text_index().unwrap(), index);

    let hits = store.search("magnetic", 10).unwrap();
    assert!(hits.iter().any(|h| h.record.doi == "1111.2222"));
    assert!(hits.iter().all(|h| h.score > 0.0));

    store.close();
}

#[test]
#[ignore]
fn unreachable_server_fails_connect() {
    let config = MongoConfig {
        uri: "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=500".to_string(),
        database: "arxline".to_string(),
        collection: "papers".to_string(),
    };
    assert!(MongoStore::connect(&config).is_err());
}
