//! Catalog of named chart derivations over session records

pub mod base;
pub mod calendar;
pub mod distribution;
mod error;
pub mod registry;
pub mod timeline;

pub use base::{
    AxisValue, Category, ChartData, ChartDataset, Derivation, DerivationName, GoalSummary,
    Heatmap, HistogramBin, InputSet, Point,
};
pub use error::{ChartError, Result};
pub use registry::{Catalog, CatalogEntry};
