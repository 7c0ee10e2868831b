//! arxline Store - Persistence of harvested paper records
//!
//! Records go to one MongoDB collection. The harvest loop only sees the
//! [`RecordSink`] trait, so it can be driven against an in-memory sink.

mod config;
mod mongo;
mod record;
mod sink;

pub use config::{COLLECTION_NAME_VAR, DB_NAME_VAR, MONGO_URI_VAR, MongoConfig};
pub use mongo::{MongoStore, SearchHit, text_index_keys};
pub use record::PaperRecord;
pub use sink::RecordSink;
