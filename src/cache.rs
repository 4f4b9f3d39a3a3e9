use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use polars::prelude::DataFrame;

use crate::prepare::{self, DataError};

static TABLE_CACHE: OnceLock<Mutex<HashMap<PathBuf, DataFrame>>> = OnceLock::new();

fn table_cache() -> &'static Mutex<HashMap<PathBuf, DataFrame>> {
    TABLE_CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

fn cache_key(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Loads the cleaned player table, memoized per source file for the session.
/// Callers receive a clone; the cached frame is never mutated after insert.
pub fn load_cached(path: &Path) -> Result<DataFrame, DataError> {
    let key = cache_key(path);

    {
        let guard = table_cache()
            .lock()
            .expect("Table cache mutex poisoned while reading");
        if let Some(cached) = guard.get(&key) {
            return Ok(cached.clone());
        }
    }

    let cleaned = prepare::load_player_stats(path)?;

    let mut guard = table_cache()
        .lock()
        .expect("Table cache mutex poisoned while inserting");
    Ok(guard.entry(key).or_insert(cleaned).clone())
}

/// Drops the memoized table for a source file so the next load re-reads it.
pub fn invalidate(path: &Path) {
    let mut guard = table_cache()
        .lock()
        .expect("Table cache mutex poisoned while invalidating");
    guard.remove(&cache_key(path));
}
