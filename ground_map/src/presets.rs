//! Lookup tables for what the ground looks like: how wide each class of road is, and what color
//! and height each kind of area gets. These are plain data, built once and shared read-only by
//! every feature.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::AreaKind;

/// Material colors understood by downstream scene emitters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red,
    RedBright,
    Purple,
    Orange,
    Blue,
    Yellow,
    Green,
    GroundGray,
}

impl Color {
    pub fn rgba(self) -> [f64; 4] {
        match self {
            Color::Red => [1.0, 0.0, 0.0, 1.0],
            Color::RedBright => [0.87, 0.26, 0.07, 1.0],
            Color::Purple => [1.0, 0.0, 1.0, 1.0],
            Color::Orange => [1.0, 0.5088, 0.0468, 1.0],
            Color::Blue => [0.0, 0.0, 1.0, 1.0],
            Color::Yellow => [1.0, 1.0, 0.0, 1.0],
            Color::Green => [0.0, 1.0, 0.0, 1.0],
            Color::GroundGray => [0.3, 0.3, 0.3, 1.0],
        }
    }

    /// "#RRGGBB", ignoring alpha
    pub fn as_hex(self) -> String {
        let [r, g, b, _] = self.rgba();
        let byte = |x: f64| (x * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", byte(r), byte(g), byte(b))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AreaPreset {
    pub color: Color,
    /// Meters. Flat things like grass get a token height.
    pub height: f64,
}

impl AreaPreset {
    fn new(color: Color, height: f64) -> AreaPreset {
        AreaPreset { color, height }
    }
}

/// Any field missing from a presets file falls back to the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Presets {
    /// Road width in meters, keyed by the OSM highway tag. Highway classes not listed here aren't
    /// turned into ground.
    pub highway_widths: BTreeMap<String, f64>,
    pub building: AreaPreset,
    /// Keyed by the OSM amenity tag
    pub amenities: BTreeMap<String, AreaPreset>,
    /// Keyed by the OSM landuse tag
    pub landuse: BTreeMap<String, AreaPreset>,
    /// Point features, like street furniture, to the name of the model placed there
    pub models: BTreeMap<String, String>,
}

impl Default for Presets {
    fn default() -> Presets {
        let highway_widths = [
            ("footway", 0.3),
            ("pedestrian", 3.0),
            ("motorway", 14.0),
            ("motorway_link", 13.0),
            ("trunk", 12.0),
            ("trunk_link", 11.0),
            ("primary", 10.0),
            ("primary_link", 9.0),
            ("secondary", 8.0),
            ("secondary_link", 7.0),
            ("tertiary", 6.0),
            ("tertiary_link", 5.0),
            ("residential", 3.0),
            ("steps", 0.8),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let amenities = [
            ("school", Color::Purple, 3.0),
            ("post_office", Color::Orange, 3.0),
            ("library", Color::Purple, 3.0),
            ("bar", Color::Blue, 3.0),
            ("cafe", Color::Blue, 3.0),
            ("pub", Color::Blue, 3.0),
            ("restaurant", Color::Blue, 3.0),
            ("fast_food", Color::Blue, 3.0),
            ("college", Color::Purple, 3.0),
            ("kindergarten", Color::Purple, 3.0),
            ("parking", Color::GroundGray, 0.01),
        ]
        .into_iter()
        .map(|(k, color, height)| (k.to_string(), AreaPreset::new(color, height)))
        .collect();

        let mut landuse = BTreeMap::new();
        landuse.insert("grass".to_string(), AreaPreset::new(Color::Green, 0.01));

        let models = [
            ("stop", "Stop Sign"),
            ("street_lamp", "Lamp Post"),
            ("traffic_signals", "Construction Cone"),
            ("fire hydrant", "Fire hydrant"),
            ("give_way", "Speed limit sign"),
            ("bus_stop", "RoboCup 2014 SPL Goal"),
            ("fuel", "Gas Station"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Presets {
            highway_widths,
            building: AreaPreset::new(Color::Red, 3.0),
            amenities,
            landuse,
            models,
        }
    }
}

impl Presets {
    /// Reads presets from a JSON file. Anything the file doesn't mention keeps its default.
    pub fn load(path: &str) -> Result<Presets> {
        let raw = fs_err::read_to_string(path)?;
        let presets: Presets =
            serde_json::from_str(&raw).with_context(|| format!("parsing presets from {}", path))?;
        if let Some((highway, width)) = presets
            .highway_widths
            .iter()
            .find(|(_, width)| !(**width > 0.0 && width.is_finite()))
        {
            anyhow::bail!("{} sets a bad width {} for {}", path, width, highway);
        }
        Ok(presets)
    }

    pub fn road_width(&self, highway: &str) -> Option<f64> {
        self.highway_widths.get(highway).copied()
    }

    pub fn area(&self, kind: &AreaKind) -> Option<&AreaPreset> {
        match kind {
            AreaKind::Building => Some(&self.building),
            AreaKind::Amenity(amenity) => self.amenities.get(amenity),
            AreaKind::Landuse(landuse) => self.landuse.get(landuse),
        }
    }

    pub fn model(&self, kind: &str) -> Option<&str> {
        self.models.get(kind).map(|x| x.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let presets = Presets::default();
        assert_eq!(presets.road_width("motorway"), Some(14.0));
        assert_eq!(presets.road_width("footway"), Some(0.3));
        assert_eq!(presets.road_width("service"), None);

        assert_eq!(
            presets.area(&AreaKind::Building),
            Some(&AreaPreset::new(Color::Red, 3.0))
        );
        assert_eq!(
            presets.area(&AreaKind::Amenity("parking".to_string())),
            Some(&AreaPreset::new(Color::GroundGray, 0.01))
        );
        assert_eq!(
            presets.area(&AreaKind::Landuse("grass".to_string())),
            Some(&AreaPreset::new(Color::Green, 0.01))
        );
        assert_eq!(presets.area(&AreaKind::Amenity("university".to_string())), None);

        assert_eq!(presets.model("street_lamp"), Some("Lamp Post"));
        assert_eq!(presets.model("bench"), None);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let presets: Presets =
            serde_json::from_str(r#"{"highway_widths": {"service": 4.5}}"#).unwrap();
        assert_eq!(presets.road_width("service"), Some(4.5));
        // Replaced wholesale
        assert_eq!(presets.road_width("motorway"), None);
        // Untouched
        assert_eq!(presets.building, Presets::default().building);
        assert_eq!(presets.model("stop"), Some("Stop Sign"));
    }

    #[test]
    fn hex_colors() {
        assert_eq!(Color::Red.as_hex(), "#FF0000");
        assert_eq!(Color::GroundGray.as_hex(), "#4D4D4D");
        assert_eq!(Color::Orange.rgba()[1], 0.5088);
    }
}
