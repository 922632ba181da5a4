use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use geom::LonLat;

use crate::Presets;

/// Everything needed to build one ground map. Nothing is shared between features except the
/// origin.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeatureSet {
    /// The local frame is centered here.
    pub origin: LonLat,
    #[serde(default)]
    pub roads: Vec<RoadInput>,
    #[serde(default)]
    pub areas: Vec<AreaInput>,
    #[serde(default)]
    pub models: Vec<ModelInput>,
    /// Raw OSM highway ways, whose widths come from the presets. See `resolve_highways`.
    #[serde(default)]
    pub highways: Vec<HighwayInput>,
}

impl FeatureSet {
    pub fn load(path: &str) -> Result<FeatureSet> {
        let raw = fs_err::read_to_string(path)?;
        let input = serde_json::from_str(&raw)
            .with_context(|| format!("parsing feature set from {}", path))?;
        Ok(input)
    }

    /// Turns every highway into a road, appended after the roads given directly. Highway classes
    /// without a configured width are dropped.
    pub fn resolve_highways(&mut self, presets: &Presets) {
        for way in self.highways.drain(..) {
            match RoadInput::from_highway(
                presets,
                way.osm_id,
                &way.highway,
                way.name.as_deref(),
                way.pts,
            ) {
                Some(road) => self.roads.push(road),
                None => debug!("Skipping way {} with highway={}", way.osm_id, way.highway),
            }
        }
    }
}

/// An OSM way tagged `highway`, before its width is known.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HighwayInput {
    pub osm_id: i64,
    pub highway: String,
    #[serde(default)]
    pub name: Option<String>,
    pub pts: Vec<LonLat>,
}

/// A road centerline to thicken into a ribbon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadInput {
    pub name: String,
    /// Meters, edge to edge
    pub width: f64,
    pub pts: Vec<LonLat>,
}

impl RoadInput {
    /// Builds a road from an OSM way tagged `highway`. The name comes from the way's name, or the
    /// highway class when unnamed, plus the way ID to keep it unique. Returns `None` for highway
    /// classes with no configured width; those aren't turned into ground.
    pub fn from_highway(
        presets: &Presets,
        osm_id: i64,
        highway: &str,
        name: Option<&str>,
        pts: Vec<LonLat>,
    ) -> Option<RoadInput> {
        let width = presets.road_width(highway)?;
        Some(RoadInput {
            name: format!("{}_{}", name.unwrap_or(highway), osm_id),
            width,
            pts,
        })
    }
}

/// Determines what preset an area uses.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaKind {
    Building,
    Amenity(String),
    Landuse(String),
}

impl std::fmt::Display for AreaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            AreaKind::Building => write!(f, "building"),
            AreaKind::Amenity(x) => write!(f, "amenity={}", x),
            AreaKind::Landuse(x) => write!(f, "landuse={}", x),
        }
    }
}

/// A filled outline, like a building footprint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AreaInput {
    pub name: String,
    pub kind: AreaKind,
    /// Usually just one outline. Multipolygon relations have one entry per outer member way, in
    /// the order they're listed.
    pub members: Vec<Vec<LonLat>>,
}

impl AreaInput {
    /// An area from a single outline.
    pub fn new(name: String, kind: AreaKind, pts: Vec<LonLat>) -> AreaInput {
        AreaInput {
            name,
            kind,
            members: vec![pts],
        }
    }
}

/// A point feature, like a stop sign. `kind` is looked up in the presets to find the model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelInput {
    pub kind: String,
    pub pt: LonLat,
}
