use std::collections::BTreeSet;
use std::sync::Arc;

/*-------------------------------------------------------------------------------------------------
  Utilities
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Work with Reference Counted String Slices
--------------------------------------------------------------------------------------*/

/// Set of shared string slices used to deduplicate the repetitive metadata (AS names, AS
/// domains, country names) of a range table while it is being built.
#[derive(Clone, Debug, Default)]
pub struct StringPool {
    strings: BTreeSet<Arc<str>>,
}

impl StringPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the shared copy of `value`, adding it to the pool when it is not present yet.
    pub fn intern(&mut self, value: &str) -> Arc<str> {
        if let Some(item) = self.strings.get(value) {
            return Arc::clone(item);
        }

        let item: Arc<str> = Arc::from(value);
        self.strings.insert(Arc::clone(&item));
        item
    }

    /// Number of distinct strings in the pool.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
