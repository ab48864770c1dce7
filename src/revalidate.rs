use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Per-path view generations.
///
/// A view's ETag is derived from its generation; bumping the generation
/// makes every copy a client cached under the old tag stale.
#[derive(Debug, Clone)]
pub struct Revalidator {
    epoch: i64,
    generations: Arc<RwLock<HashMap<String, u64>>>,
}

impl Default for Revalidator {
    fn default() -> Self {
        Self::new(chrono::Utc::now().timestamp_millis())
    }
}

impl Revalidator {
    /// `epoch` distinguishes tags issued by different process lifetimes
    pub fn new(epoch: i64) -> Self {
        Self {
            epoch,
            generations: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Invalidate every cached rendering of `path`
    pub fn revalidate_path(&self, path: &str) {
        let mut generations = self
            .generations
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let generation = generations.entry(path.to_string()).or_insert(0);
        *generation += 1;
        tracing::debug!("Revalidated {} (generation {})", path, generation);
    }

    pub fn generation(&self, path: &str) -> u64 {
        self.generations
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(path)
            .copied()
            .unwrap_or(0)
    }

    /// Weak ETag for one rendering of `path` with the given query string
    pub fn etag(&self, path: &str, query_string: &str) -> String {
        format!(
            "W/\"{}-{}-{}\"",
            self.epoch,
            self.generation(path),
            hex::encode(query_string.as_bytes())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revalidate_changes_etag() {
        let revalidator = Revalidator::new(42);
        let before = revalidator.etag("/dashboard/invoices", "page=1");

        revalidator.revalidate_path("/dashboard/invoices");

        let after = revalidator.etag("/dashboard/invoices", "page=1");
        assert_ne!(before, after);
        assert_eq!(revalidator.generation("/dashboard/invoices"), 1);
    }

    #[test]
    fn test_revalidate_is_scoped_to_path() {
        let revalidator = Revalidator::new(42);
        let customers = revalidator.etag("/dashboard/customers", "");

        revalidator.revalidate_path("/dashboard/invoices");

        assert_eq!(revalidator.etag("/dashboard/customers", ""), customers);
    }

    #[test]
    fn test_etag_depends_on_query_and_epoch() {
        let a = Revalidator::new(1);
        let b = Revalidator::new(2);

        assert_ne!(a.etag("/x", "page=1"), a.etag("/x", "page=2"));
        assert_ne!(a.etag("/x", "page=1"), b.etag("/x", "page=1"));
        assert!(a.etag("/x", "").starts_with("W/\""));
    }

    #[test]
    fn test_clones_share_generations() {
        let revalidator = Revalidator::new(7);
        let clone = revalidator.clone();

        clone.revalidate_path("/dashboard/invoices");

        assert_eq!(revalidator.generation("/dashboard/invoices"), 1);
    }
}
