use crate::data::classify::with_composition;
use crate::data::filter::{filtered_indices, Criteria, CriteriaError};
use crate::data::model::Catalog;
use crate::presets;

// ---------------------------------------------------------------------------
// Exploration session
// ---------------------------------------------------------------------------

/// One exploration session over one loaded catalog.
///
/// The session is the composition root for catalog lifetime: the caller
/// loads the catalog once, hands it over, and iterates on criteria. The
/// passing row indices are cached and recomputed only when the criteria
/// change; the underlying catalog is never mutated.
pub struct Session {
    catalog: Catalog,
    criteria: Criteria,
    visible_indices: Vec<usize>,
}

impl Session {
    /// Start a session with no active criteria: every record visible.
    pub fn new(catalog: Catalog) -> Self {
        let visible_indices = (0..catalog.len()).collect();
        Session {
            catalog,
            criteria: Criteria::default(),
            visible_indices,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// Indices of records passing the current criteria, in source order.
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible_indices
    }

    /// Replace the criteria and recompute the visible set.
    pub fn set_criteria(&mut self, criteria: Criteria) {
        self.criteria = criteria;
        self.refilter();
    }

    /// Resolve a named preset and apply its criteria.
    pub fn apply_preset(&mut self, name: &str) -> Result<(), CriteriaError> {
        let criteria = presets::preset_criteria(name)?;
        log::info!("applying preset '{name}'");
        self.set_criteria(criteria);
        Ok(())
    }

    /// Clear all criteria, making every record visible again.
    pub fn reset(&mut self) {
        self.set_criteria(Criteria::default());
    }

    fn refilter(&mut self) {
        self.visible_indices = filtered_indices(&self.catalog, &self.criteria);
        log::debug!(
            "{} of {} records visible",
            self.visible_indices.len(),
            self.catalog.len()
        );
    }

    /// The passing subset as a standalone catalog.
    pub fn filtered(&self) -> Catalog {
        let records = self
            .visible_indices
            .iter()
            .map(|&i| self.catalog.records[i].clone())
            .collect();
        Catalog::from_records(records)
    }

    /// The passing subset annotated with the two ephemeral composition
    /// columns.
    pub fn classified(&self) -> Catalog {
        with_composition(&self.filtered())
    }
}
