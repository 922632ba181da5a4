use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use geom::{Bounds, GeomError, Path, Projector, Pt2D, Ring};

use crate::{
    AreaInput, AreaRing, FeatureSet, GroundMap, ModelInput, ModelPlacement, Presets, RoadInput,
    RoadRing,
};

/// Which kinds of features to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layers {
    pub roads: bool,
    pub areas: bool,
    pub models: bool,
}

impl Layers {
    pub fn all() -> Layers {
        Layers {
            roads: true,
            areas: true,
            models: true,
        }
    }
}

impl Default for Layers {
    fn default() -> Layers {
        Layers::all()
    }
}

impl std::str::FromStr for Layers {
    type Err = String;

    /// Any combination of `r` (roads), `b` (areas, including buildings), and `m` (models). `a`
    /// selects everything.
    fn from_str(x: &str) -> Result<Layers, String> {
        let mut layers = Layers {
            roads: false,
            areas: false,
            models: false,
        };
        for c in x.chars() {
            match c {
                'r' => layers.roads = true,
                'a' => layers = Layers::all(),
                'b' => layers.areas = true,
                'm' => layers.models = true,
                _ => return Err(format!("unknown layer {} in {}; use r, b, m, or a for everything", c, x)),
            }
        }
        if !(layers.roads || layers.areas || layers.models) {
            return Err("no layers selected".to_string());
        }
        Ok(layers)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeatureError {
    #[error(transparent)]
    Geometry(#[from] GeomError),
    #[error("no preset for {0}")]
    NoPreset(String),
}

/// A feature, or one piece of it, that couldn't be built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Failure {
    pub name: String,
    pub error: FeatureError,
}

impl Failure {
    fn new<E: Into<FeatureError>>(name: String, error: E) -> Failure {
        Failure {
            name,
            error: error.into(),
        }
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.error)
    }
}

/// Turns features into ground geometry. Holds nothing mutable, so features can be built in any
/// order and from any thread.
pub struct GeometryAssembler {
    projector: Projector,
    presets: Presets,
}

impl GeometryAssembler {
    pub fn new(projector: Projector, presets: Presets) -> GeometryAssembler {
        GeometryAssembler { projector, presets }
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub fn presets(&self) -> &Presets {
        &self.presets
    }

    /// Produces one entry per piece of the road left after splitting loops. Closed pieces are
    /// used as rings directly; the rest are dilated to the road's width. When there's more than
    /// one piece, each is named `<road>_p<index>`. A bad piece doesn't affect the others.
    pub fn build_road(&self, road: &RoadInput) -> Vec<Result<RoadRing, Failure>> {
        if !road.width.is_finite() || road.width <= 0.0 {
            return vec![Err(Failure::new(
                road.name.clone(),
                GeomError::BadWidth(road.width),
            ))];
        }
        if road.pts.len() < 2 {
            return vec![Err(Failure::new(
                road.name.clone(),
                GeomError::EmptyInput {
                    needed: 2,
                    got: road.pts.len(),
                },
            ))];
        }

        let pieces = Path::new(self.projector.project(&road.pts)).split_loops(&road.name);
        let multiple = pieces.len() > 1;
        pieces
            .into_iter()
            .enumerate()
            .map(|(idx, piece)| {
                let name = if multiple {
                    format!("{}_p{}", road.name, idx)
                } else {
                    road.name.clone()
                };
                let result = if piece.is_closed() {
                    Ring::new(piece.into_points())
                } else {
                    piece.dilate(road.width)
                };
                match result {
                    Ok(ring) => Ok(RoadRing {
                        name,
                        width: road.width,
                        ring,
                    }),
                    Err(err) => Err(Failure::new(name, err)),
                }
            })
            .collect()
    }

    /// Produces one entry per part of the area. Outlines that don't repeat their first point are
    /// closed. Multipolygon members are glued first, and the parts are named `<area>_p<index>`
    /// when there's more than one.
    pub fn build_area(&self, area: &AreaInput) -> Vec<Result<AreaRing, Failure>> {
        let preset = match self.presets.area(&area.kind) {
            Some(preset) => preset,
            None => {
                return vec![Err(Failure::new(
                    area.name.clone(),
                    FeatureError::NoPreset(area.kind.to_string()),
                ))];
            }
        };

        let mut parts = glue_members(
            area.members
                .iter()
                .map(|pts| self.projector.project(pts))
                .collect(),
        );
        if parts.is_empty() {
            // Let the ring validation describe the problem
            parts.push(Vec::new());
        }
        let multiple = parts.len() > 1;
        parts
            .into_iter()
            .enumerate()
            .map(|(idx, pts)| -> Result<AreaRing, Failure> {
                let name = if multiple {
                    format!("{}_p{}", area.name, idx)
                } else {
                    area.name.clone()
                };
                let center = Pt2D::center(&pts);
                let ring = Ring::closing(pts).map_err(|err| Failure::new(name.clone(), err))?;
                Ok(AreaRing {
                    name,
                    kind: area.kind.clone(),
                    color: preset.color,
                    height: preset.height,
                    // A valid ring has points, so there's always a center
                    center: center.unwrap_or(ring.points()[0]),
                    ring,
                })
            })
            .collect()
    }

    /// Places a model for every point feature with a known kind, named `<model>_<n>` where `n`
    /// counts up from 0 separately for each model.
    pub fn place_models(&self, models: &[ModelInput]) -> Vec<Result<ModelPlacement, Failure>> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        models
            .iter()
            .map(|input| -> Result<ModelPlacement, Failure> {
                let model = self.presets.model(&input.kind).ok_or_else(|| {
                    Failure::new(
                        input.kind.clone(),
                        FeatureError::NoPreset(input.kind.clone()),
                    )
                })?;
                let count = counts.entry(model).or_insert(0);
                let name = format!("{}_{}", model, count);
                *count += 1;
                Ok(ModelPlacement {
                    name,
                    model: model.to_string(),
                    pt: self.projector.project_pt(input.pt),
                })
            })
            .collect()
    }

    /// Builds every enabled layer. Roads and areas are built in parallel, but the output keeps
    /// the input order. Failures are logged and collected, and never stop the other features.
    pub fn assemble(&self, input: &FeatureSet, layers: Layers) -> GroundMap {
        let mut failures = Vec::new();

        let mut roads = Vec::new();
        if layers.roads {
            let results: Vec<Vec<Result<RoadRing, Failure>>> = input
                .roads
                .par_iter()
                .map(|road| self.build_road(road))
                .collect();
            split_results(results.into_iter().flatten(), &mut roads, &mut failures);
        }

        let mut areas = Vec::new();
        if layers.areas {
            let results: Vec<Vec<Result<AreaRing, Failure>>> = input
                .areas
                .par_iter()
                .map(|area| self.build_area(area))
                .collect();
            split_results(results.into_iter().flatten(), &mut areas, &mut failures);
        }

        let mut models = Vec::new();
        if layers.models {
            split_results(
                self.place_models(&input.models),
                &mut models,
                &mut failures,
            );
        }

        for failure in &failures {
            warn!("Skipping {}", failure);
        }

        let mut bounds = Bounds::new();
        for road in &roads {
            bounds.union(&road.ring.get_bounds());
        }
        for area in &areas {
            bounds.union(&area.ring.get_bounds());
        }
        for model in &models {
            bounds.update(model.pt);
        }

        info!(
            "Built {} road rings, {} area rings, and {} models; {} failures",
            roads.len(),
            areas.len(),
            models.len(),
            failures.len()
        );
        GroundMap {
            bounds,
            roads,
            areas,
            models,
            failures,
        }
    }
}

fn split_results<T, I: IntoIterator<Item = Result<T, Failure>>>(
    results: I,
    ok: &mut Vec<T>,
    failures: &mut Vec<Failure>,
) {
    for result in results {
        match result {
            Ok(x) => ok.push(x),
            Err(err) => failures.push(err),
        }
    }
}

/// Multipolygon outer members can be a mix of complete outlines and pieces of one. Complete
/// (closed) members each become their own part. The open pieces are chained together into one
/// more part, following shared endpoints (and flipping pieces as needed) where possible, and
/// otherwise just in the order given.
fn glue_members(members: Vec<Vec<Pt2D>>) -> Vec<Vec<Pt2D>> {
    let mut parts = Vec::new();
    let mut open = Vec::new();
    for pts in members {
        if pts.is_empty() {
            continue;
        }
        if pts.len() >= 4 && pts[0].approx_eq(pts[pts.len() - 1]) {
            parts.push(pts);
        } else {
            open.push(pts);
        }
    }
    if open.is_empty() {
        return parts;
    }
    if open.len() > 1 {
        debug!("Gluing {} open members", open.len());
    }

    let mut result = open.remove(0);
    while !open.is_empty() {
        let glue_pt = result[result.len() - 1];
        let next = open
            .iter()
            .position(|pts| pts[0].approx_eq(glue_pt) || pts[pts.len() - 1].approx_eq(glue_pt));
        match next {
            Some(idx) => {
                let mut append = open.remove(idx);
                if !append[0].approx_eq(glue_pt) {
                    append.reverse();
                }
                result.pop();
                result.extend(append);
            }
            None => {
                result.extend(open.remove(0));
            }
        }
    }
    parts.push(result);
    parts
}
