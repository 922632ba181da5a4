//! Builds the ground of a driving simulation world from map features: road surfaces, area
//! footprints with their colors and heights, and placements for street furniture models.

#[macro_use]
extern crate log;

mod assembler;
mod input;
mod output;
mod presets;

pub use crate::assembler::{Failure, FeatureError, GeometryAssembler, Layers};
pub use crate::input::{AreaInput, AreaKind, FeatureSet, HighwayInput, ModelInput, RoadInput};
pub use crate::output::{AreaRing, Emitter, GeoJsonEmitter, GroundMap, ModelPlacement, RoadRing};
pub use crate::presets::{AreaPreset, Color, Presets};
