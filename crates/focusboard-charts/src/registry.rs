//! Catalog for looking up and running chart derivations

use crate::base::{ChartDataset, Derivation, DerivationName, InputSet};
use crate::calendar::{SessionsByWeekday, SessionsHeatmap};
use crate::distribution::{
    ElapsedTimeByGoal, GoalDistribution, SessionDurationDistribution, SessionLengthByGoal,
    TimeVsElapsed,
};
use crate::error::{ChartError, Result};
use crate::timeline::{
    AverageElapsedOverTime, SessionTimeOverTime, SessionsOverTime, TotalElapsedOverTime,
};
use focusboard_core::{CanonicalSplit, DEFAULT_HISTOGRAM_BINS};
use focusboard_store::SessionRecord;
use serde::Serialize;

/// Listing entry describing one registered derivation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub name: DerivationName,
    pub title: String,
    pub input: InputSet,
}

/// Registry of derivations, selectable by name
pub struct Catalog {
    derivations: Vec<Box<dyn Derivation>>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn empty() -> Self {
        Self {
            derivations: Vec::new(),
        }
    }

    /// Every standard derivation, with the default histogram bucket count
    pub fn new() -> Self {
        Self::with_histogram_bins(DEFAULT_HISTOGRAM_BINS)
    }

    pub fn with_histogram_bins(bins: usize) -> Self {
        let mut catalog = Self::empty();
        catalog.register(Box::new(SessionTimeOverTime));
        catalog.register(Box::new(GoalDistribution));
        catalog.register(Box::new(SessionDurationDistribution::new(bins)));
        catalog.register(Box::new(ElapsedTimeByGoal));
        catalog.register(Box::new(TimeVsElapsed));
        catalog.register(Box::new(AverageElapsedOverTime));
        catalog.register(Box::new(SessionsOverTime));
        catalog.register(Box::new(TotalElapsedOverTime));
        catalog.register(Box::new(SessionsByWeekday));
        catalog.register(Box::new(SessionLengthByGoal));
        catalog.register(Box::new(SessionsHeatmap));
        catalog
    }

    /// Register a derivation, replacing any existing one with the same name
    pub fn register(&mut self, derivation: Box<dyn Derivation>) {
        let name = derivation.name();
        match self.derivations.iter().position(|d| d.name() == name) {
            Some(idx) => self.derivations[idx] = derivation,
            None => self.derivations.push(derivation),
        }
    }

    pub fn get(&self, name: DerivationName) -> Option<&dyn Derivation> {
        self.derivations
            .iter()
            .find(|d| d.name() == name)
            .map(|d| d.as_ref())
    }

    /// Validate requested names before any computation.
    ///
    /// Duplicates are dropped, first occurrence wins.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<DerivationName>> {
        let mut resolved = Vec::with_capacity(names.len());
        for raw in names {
            let name: DerivationName = raw.as_ref().parse()?;
            if self.get(name).is_none() {
                return Err(ChartError::UnknownDerivation(raw.as_ref().to_string()));
            }
            if !resolved.contains(&name) {
                resolved.push(name);
            }
        }
        Ok(resolved)
    }

    /// Derive one dataset by name from both candidate collections.
    ///
    /// The derivation's declared input picks which collection it sees.
    pub fn derive(
        &self,
        name: &str,
        full: &[&SessionRecord],
        excluding_canonical: &[&SessionRecord],
    ) -> Result<ChartDataset> {
        let name: DerivationName = name.parse()?;
        self.derive_named(name, full, excluding_canonical)
    }

    pub fn derive_named(
        &self,
        name: DerivationName,
        full: &[&SessionRecord],
        excluding_canonical: &[&SessionRecord],
    ) -> Result<ChartDataset> {
        let derivation = self
            .get(name)
            .ok_or_else(|| ChartError::UnknownDerivation(name.to_string()))?;

        let records = match derivation.input() {
            InputSet::Full => full,
            InputSet::ExcludingCanonical => excluding_canonical,
        };
        let dataset = derivation.dataset(records);
        tracing::debug!(chart = %name, input = records.len(), entries = dataset.data.len(), "derived chart");
        Ok(dataset)
    }

    /// Derive every named dataset, in request order, from a tagged collection
    pub fn derive_all(
        &self,
        names: &[DerivationName],
        split: &CanonicalSplit<'_>,
    ) -> Result<Vec<ChartDataset>> {
        names
            .iter()
            .map(|&name| self.derive_named(name, split.full(), split.excluding_canonical()))
            .collect()
    }

    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.derivations
            .iter()
            .map(|d| CatalogEntry {
                name: d.name(),
                title: d.title().to_string(),
                input: d.input(),
            })
            .collect()
    }

    /// Get number of registered derivations
    pub fn len(&self) -> usize {
        self.derivations.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.derivations.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
