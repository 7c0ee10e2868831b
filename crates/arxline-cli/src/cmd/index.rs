//! `arxline index` - create the text index once

use anyhow::Result;

use arxline_core::fmt_num;
use arxline_store::{MongoConfig, MongoStore};

/// Settings are read through `env` before any connection is attempted.
pub fn run(env: impl Fn(&str) -> Option<String>) -> Result<()> {
    let mongo = MongoConfig::from_lookup(env)?;
    let store = MongoStore::connect(&mongo)?;

    let result = store.ensure_text_index().and_then(|name| {
        log::info!("Text index {name} ready on {}", store.namespace());
        let count = store.count()?;
        log::info!("{} documents indexed", fmt_num(count as usize));
        Ok(())
    });

    store.close();
    result
}
