//! Catalog geometry for pipes, heat exchanger tubes, and tube bundles.
//!
//! Exchanger inputs name standard parts ("2 in schedule 40", "3/4 in 16 BWG")
//! rather than raw diameters. A [`GeometryCatalog`] resolves those selectors
//! once, before a solve starts. [`StandardCatalog`] carries the usual tables:
//!
//! - ASME B36.10 steel pipe, schedules 40 and 80, NPS 1/2 through 4;
//! - ASTM B88 seamless copper tube, types K, L, and M;
//! - BWG tube wall gauges 10 through 18;
//! - Kern's tube counts for 3/4 in and 1 in tubes on square and triangular pitch.
//!
//! Lookups match every key column exactly. Nothing is interpolated.

mod catalog;
mod inch;
mod pipe;
mod standard;
mod tube;

pub use catalog::{CatalogError, GeometryCatalog};
pub use inch::{InchSize, ParseInchSizeError};
pub use pipe::{
    CopperType, PipeDimensions, PipeKey, PipeMaterial, PipeSpec, Schedule, UnknownPipeSpec,
};
pub use standard::StandardCatalog;
pub use tube::{TubeCountKey, TubeKey, TubeLayout};
