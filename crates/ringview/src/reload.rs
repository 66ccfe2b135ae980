//! Reconciles the catalog with its data source.

use crate::catalog::{CatalogError, ItemCatalog};
use crate::geometry::RingLayout;
use crate::selection::SelectionController;

/// Summary of one reload, for the host to decide how much to redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadReport {
    pub generation: u64,
    pub previous_count: Option<usize>,
    pub count: usize,
    pub interaction_cancelled: bool,
    pub selection_cleared: bool,
}

impl ReloadReport {
    pub fn count_changed(&self) -> bool {
        self.previous_count != Some(self.count)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReloadCoordinator;

impl ReloadCoordinator {
    /// Starts a new generation: cancels any interaction, drops cached items and
    /// geometry, re-reads the count and clears indices that fell out of range.
    /// Everything is done before returning.
    pub fn reload(
        &self,
        catalog: &mut ItemCatalog,
        layout: &mut RingLayout,
        selection: &mut SelectionController,
    ) -> ReloadReport {
        let previous_count = catalog.cached_count();

        let interaction_cancelled = selection.is_tracking();
        if interaction_cancelled {
            log::debug!("Cancelling interaction for reload");
            selection.cancel_interaction();
        }

        catalog.invalidate();
        let count = catalog.count();
        layout.invalidate();
        let selection_cleared = selection.clamp_to(count);

        let report = ReloadReport {
            generation: catalog.generation(),
            previous_count,
            count,
            interaction_cancelled,
            selection_cleared,
        };
        log::info!(
            "Reloaded ring: {} items (was {:?}), generation {}",
            count,
            previous_count,
            report.generation
        );
        report
    }

    /// Reloads only when the data source no longer agrees with the cached
    /// count.
    pub fn reconcile(
        &self,
        catalog: &mut ItemCatalog,
        layout: &mut RingLayout,
        selection: &mut SelectionController,
    ) -> Option<ReloadReport> {
        match catalog.verify() {
            Ok(_) => None,
            Err(e @ CatalogError::InconsistentDataSource { .. }) => {
                log::warn!("{}; reloading", e);
                Some(self.reload(catalog, layout, selection))
            }
            Err(e) => {
                log::warn!("Unexpected catalog error: {}", e);
                None
            }
        }
    }
}
