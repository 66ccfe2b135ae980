//! Lazily populated item list backed by a host data source.

use crate::item::Item;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use thiserror::Error;

/// Host-side provider of ring items.
///
/// The count must not change between a call to `number_of_items` and the
/// `item_at` calls that follow it within one generation.
pub trait DataSource {
    fn number_of_items(&self) -> usize;
    fn item_at(&self, index: usize) -> Item;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Item index {index} out of range for {count} items")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("Data source reports {fresh} items but {cached} were cached")]
    InconsistentDataSource { cached: usize, fresh: usize },
}

/// Item cache for one generation.
///
/// The data source is held weakly; once the host drops it the catalog behaves
/// as if it were empty.
#[derive(Default)]
pub struct ItemCatalog {
    source: Option<Weak<dyn DataSource>>,
    count: Option<usize>,
    items: HashMap<usize, Item>,
    generation: u64,
}

impl fmt::Debug for ItemCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemCatalog")
            .field("connected", &self.source().is_some())
            .field("count", &self.count)
            .field("cached_items", &self.items.len())
            .field("generation", &self.generation)
            .finish()
    }
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_data_source<S: DataSource + 'static>(&mut self, source: &Rc<S>) {
        let weak: Weak<S> = Rc::downgrade(source);
        self.source = Some(weak);
        self.invalidate();
    }

    fn source(&self) -> Option<Rc<dyn DataSource>> {
        self.source.as_ref().and_then(Weak::upgrade)
    }

    fn fresh_count(&self) -> usize {
        self.source().map_or(0, |s| s.number_of_items())
    }

    /// Item count for the current generation, read once from the data source.
    pub fn count(&mut self) -> usize {
        match self.count {
            Some(count) => count,
            None => {
                let count = self.fresh_count();
                log::debug!(
                    "Catalog generation {} holds {} items",
                    self.generation,
                    count
                );
                self.count = Some(count);
                count
            }
        }
    }

    pub fn cached_count(&self) -> Option<usize> {
        self.count
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_cached(&self, index: usize) -> bool {
        self.items.contains_key(&index)
    }

    pub fn cached_item(&self, index: usize) -> Option<&Item> {
        self.items.get(&index)
    }

    pub fn item_at(&mut self, index: usize) -> Result<&Item, CatalogError> {
        let count = self.count();
        if index >= count {
            return Err(CatalogError::IndexOutOfRange { index, count });
        }

        let item = match self.items.remove(&index) {
            Some(item) => item,
            None => self.pull(index, count)?,
        };
        Ok(self.items.entry(index).or_insert(item))
    }

    fn pull(&self, index: usize, count: usize) -> Result<Item, CatalogError> {
        let source = self.source().ok_or(CatalogError::InconsistentDataSource {
            cached: count,
            fresh: 0,
        })?;

        let fresh = source.number_of_items();
        if fresh != count {
            return Err(CatalogError::InconsistentDataSource {
                cached: count,
                fresh,
            });
        }

        log::debug!("Pulling item {} from data source", index);
        Ok(source.item_at(index))
    }

    /// Compares the cached count with a fresh read. Succeeds with the fresh
    /// count when nothing is cached yet.
    pub fn verify(&self) -> Result<usize, CatalogError> {
        let fresh = self.fresh_count();
        match self.count {
            Some(cached) if cached != fresh => {
                Err(CatalogError::InconsistentDataSource { cached, fresh })
            }
            _ => Ok(fresh),
        }
    }

    /// Drops every cached item and the cached count, starting a new generation.
    pub fn invalidate(&mut self) {
        self.count = None;
        self.items.clear();
        self.generation += 1;
    }
}
