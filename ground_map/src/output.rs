use anyhow::Result;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use serde::{Deserialize, Serialize};

use geom::{Bounds, Pt2D, Ring};

use crate::{AreaKind, Color, Failure};

/// The filled surface of one road, or one piece of it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadRing {
    pub name: String,
    pub width: f64,
    pub ring: Ring,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AreaRing {
    pub name: String,
    pub kind: AreaKind,
    pub color: Color,
    pub height: f64,
    pub ring: Ring,
    /// The mean of the outline's points, for placing labels or anchoring an extrusion
    pub center: Pt2D,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelPlacement {
    /// Unique per model, like "Lamp Post_2"
    pub name: String,
    pub model: String,
    pub pt: Pt2D,
}

/// Everything produced from one `FeatureSet`, in input order. Features that couldn't be built
/// are listed in `failures` instead.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroundMap {
    /// Covers every ring and model placed
    pub bounds: Bounds,
    pub roads: Vec<RoadRing>,
    pub areas: Vec<AreaRing>,
    pub models: Vec<ModelPlacement>,
    pub failures: Vec<Failure>,
}

impl GroundMap {
    /// Hands every record to the emitter: roads, then areas, then models.
    pub fn emit(&self, emitter: &mut dyn Emitter) -> Result<()> {
        for road in &self.roads {
            emitter.road(road)?;
        }
        for area in &self.areas {
            emitter.area(area)?;
        }
        for model in &self.models {
            emitter.model(model)?;
        }
        Ok(())
    }
}

/// Turns finished geometry into some scene description.
pub trait Emitter {
    fn road(&mut self, road: &RoadRing) -> Result<()>;
    fn area(&mut self, area: &AreaRing) -> Result<()>;
    fn model(&mut self, model: &ModelPlacement) -> Result<()>;
}

/// Collects everything as GeoJSON features in local coordinates, for debugging in a viewer.
#[derive(Default)]
pub struct GeoJsonEmitter {
    features: Vec<Feature>,
}

impl GeoJsonEmitter {
    pub fn new() -> GeoJsonEmitter {
        GeoJsonEmitter::default()
    }

    pub fn features(&self) -> &Vec<Feature> {
        &self.features
    }

    pub fn into_string(self) -> Result<String> {
        let gj = GeoJson::FeatureCollection(FeatureCollection {
            features: self.features,
            bbox: None,
            foreign_members: None,
        });
        let x = serde_json::to_string_pretty(&gj)?;
        Ok(x)
    }
}

impl Emitter for GeoJsonEmitter {
    fn road(&mut self, road: &RoadRing) -> Result<()> {
        let mut feature = Feature {
            bbox: None,
            geometry: Some(road.ring.to_geojson()),
            id: None,
            properties: None,
            foreign_members: None,
        };
        feature.set_property("type", "road");
        feature.set_property("name", road.name.clone());
        feature.set_property("width", road.width);
        feature.set_property("fill", Color::GroundGray.as_hex());
        self.features.push(feature);
        Ok(())
    }

    fn area(&mut self, area: &AreaRing) -> Result<()> {
        let mut feature = Feature {
            bbox: None,
            geometry: Some(area.ring.to_geojson()),
            id: None,
            properties: None,
            foreign_members: None,
        };
        feature.set_property("type", "area");
        feature.set_property("name", area.name.clone());
        feature.set_property("kind", area.kind.to_string());
        feature.set_property("height", area.height);
        feature.set_property("fill", area.color.as_hex());
        self.features.push(feature);
        Ok(())
    }

    fn model(&mut self, model: &ModelPlacement) -> Result<()> {
        let mut feature = Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![model.pt.x(), model.pt.y()]))),
            id: None,
            properties: None,
            foreign_members: None,
        };
        feature.set_property("type", "model");
        feature.set_property("name", model.name.clone());
        feature.set_property("model", model.model.clone());
        self.features.push(feature);
        Ok(())
    }
}
