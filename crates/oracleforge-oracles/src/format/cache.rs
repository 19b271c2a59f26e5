//! Parse cache keyed by file content digest.

use std::any::Any;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use oracleforge_core::{OracleError, Result};
use sha2::{Digest, Sha256};
use tracing::{debug, trace};

use super::FileFormat;

type Entry = Arc<dyn Any + Send + Sync>;

/// Reads and parses formula files, caching parsed values by SHA-256 of
/// their contents.
///
/// The file is read whole and closed before parsing. Parse failures are
/// never cached.
#[derive(Debug, Default)]
pub struct FileCache {
    enabled: bool,
    entries: Mutex<HashMap<(&'static str, [u8; 32]), Entry>>,
}

impl FileCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of cached parsed files.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(&'static str, [u8; 32]), Entry>> {
        // Entries are immutable once inserted, so a poisoned map is still valid.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Loads `path` as format `F` on behalf of `oracle`.
    pub fn load<F: FileFormat>(&self, oracle: &str, path: &Path) -> Result<Arc<F>> {
        let text = std::fs::read_to_string(path).map_err(|source| OracleError::FileAccess {
            oracle: oracle.to_string(),
            path: path.to_path_buf(),
            source,
        })?;

        let parse = || {
            F::parse(&text).map_err(|err| OracleError::MalformedFile {
                oracle: oracle.to_string(),
                path: path.to_path_buf(),
                reason: err.to_string(),
            })
        };

        if !self.enabled {
            return parse().map(Arc::new);
        }

        let digest: [u8; 32] = Sha256::digest(text.as_bytes()).into();
        let key = (F::NAME, digest);
        if let Some(entry) = self.lock().get(&key).cloned() {
            if let Ok(parsed) = entry.downcast::<F>() {
                trace!(event = "file_cache_hit", format = F::NAME, path = %path.display());
                return Ok(parsed);
            }
        }

        let parsed = Arc::new(parse()?);
        debug!(event = "file_parsed", format = F::NAME, path = %path.display());
        self.lock().insert(key, parsed.clone() as Entry);
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Cnf;
    use oracleforge_test::files::temp_file;

    #[test]
    fn test_same_content_parsed_once() {
        let cache = FileCache::new(true);
        let a = temp_file("1 2 0\n");
        let b = temp_file("1 2 0\n");

        let first = cache.load::<Cnf>("sat", a.path()).unwrap();
        let second = cache.load::<Cnf>("sat", b.path()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_disabled_cache_stores_nothing() {
        let cache = FileCache::new(false);
        let file = temp_file("1 0\n");
        cache.load::<Cnf>("sat", file.path()).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_errors_name_oracle_and_path() {
        let cache = FileCache::new(true);
        let file = temp_file("1 2 0\n0\n");
        match cache.load::<Cnf>("sat", file.path()) {
            Err(OracleError::MalformedFile { oracle, path, reason }) => {
                assert_eq!(oracle, "sat");
                assert_eq!(path, file.path());
                assert!(reason.contains("line 2"));
            }
            other => panic!("expected MalformedFile, got {other:?}"),
        }
        assert!(cache.is_empty());

        assert!(matches!(
            cache.load::<Cnf>("sat", Path::new("/nonexistent/f.cnf")),
            Err(OracleError::FileAccess { .. })
        ));
    }
}
