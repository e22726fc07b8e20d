//! # horizons-bodies
//!
//! Turn the free-text responses of the JPL Horizons service into a hierarchical dataset
//! of solar-system bodies: physical properties in canonical units, a position/velocity
//! state vector and osculating orbital elements, with satellites nested under their
//! planet.
//!
//! ```rust, no_run
//! use horizons_bodies::{Catalog, DatasetBuilder, DirectorySource};
//!
//! let catalog = Catalog::default();
//! let source = DirectorySource::new("responses");
//!
//! let report = DatasetBuilder::new(&source, &catalog).build();
//! for failure in &report.failures {
//!     eprintln!("{}: {}", failure.id, failure.error);
//! }
//! println!("{}", report.dataset.to_json_pretty().unwrap());
//! ```
pub mod catalog;
pub mod constants;
pub mod dataset;
pub mod diagnostics;
pub mod geophysical;
pub mod horizons_errors;
pub mod horizons_table;
pub mod identifier;
pub mod imputer;
pub mod orbital_elements;
pub mod record;
pub mod source;
pub mod state_vector;

pub use catalog::{Catalog, CatalogEntry, CatalogGroup};
pub use dataset::{BuildReport, Dataset, DatasetBuilder};
pub use horizons_errors::HorizonsError;
pub use record::BodyRecord;
pub use source::{DirectorySource, HorizonsQuery, HorizonsSource, InMemorySource, TableKind};
