use std::sync::Arc;

use generational_arena::{Arena, Index};

use super::ObjectUrl;

const URL_PREFIX: &str = "blob:lockview/";

/// An in-memory registry of transient references, for hosts without `URL.createObjectURL`.
///
/// Each reference is a URL of the form `blob:lockview/<index>/<generation>`. The generation means
/// that once a URL is revoked it will never resolve again, even after its slot is reused.
#[derive(Debug, Default)]
pub struct ObjectUrlStore {
    entries: Arena<Arc<[u8]>>,
    revoked: usize,
}

impl ObjectUrlStore {
    /// Create an empty store
    pub fn new() -> Self {
        Default::default()
    }

    /// Pin `bytes` in memory and return a URL that resolves to them
    pub fn create(&mut self, bytes: Arc<[u8]>) -> ObjectUrl {
        let index = self.entries.insert(bytes);
        let (slot, generation) = index.into_raw_parts();
        ObjectUrl::new(format!("{URL_PREFIX}{slot}/{generation}"))
    }

    /// The bytes behind `url`, if it is still live
    pub fn resolve(&self, url: &ObjectUrl) -> Option<Arc<[u8]>> {
        let index = parse(url)?;
        self.entries.get(index).cloned()
    }

    /// Release `url`. Returns `false` if the URL was not live, eg. because it was already revoked.
    pub fn revoke(&mut self, url: &ObjectUrl) -> bool {
        let removed = parse(url)
            .and_then(|index| self.entries.remove(index))
            .is_some();
        if removed {
            self.revoked += 1;
        }
        removed
    }

    /// Number of live references
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Are there no live references?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of references successfully revoked over the store's lifetime
    pub fn revoked_count(&self) -> usize {
        self.revoked
    }
}

fn parse(url: &ObjectUrl) -> Option<Index> {
    let rest = url.as_str().strip_prefix(URL_PREFIX)?;
    let (slot, generation) = rest.split_once('/')?;
    Some(Index::from_raw_parts(
        slot.parse().ok()?,
        generation.parse().ok()?,
    ))
}
