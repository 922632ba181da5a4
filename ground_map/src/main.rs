#[macro_use]
extern crate log;

use anyhow::Result;
use structopt::StructOpt;

use geom::{Axes, Projector};
use ground_map::{FeatureSet, GeoJsonEmitter, GeometryAssembler, Layers, Presets};

#[derive(StructOpt)]
#[structopt(
    name = "ground_map",
    about = "Turns map features into flat road and area rings in a local frame"
)]
struct Args {
    /// A JSON file with the origin, roads, highways, areas, and models
    #[structopt(long)]
    input: String,
    /// Write the ground map as JSON here
    #[structopt(long)]
    output: String,
    /// A JSON file overriding the default highway widths, area presets, and models. Highway
    /// widths apply to the input's highways; its roads already carry their own width.
    #[structopt(long)]
    presets: Option<String>,
    /// Also write all of the rings as GeoJSON here, in local coordinates, for debugging
    #[structopt(long)]
    geojson: Option<String>,
    /// Which layers to build: any combination of r (roads), b (areas), and m (models), or a for
    /// all of them
    #[structopt(long, default_value = "a")]
    layers: Layers,
    /// How local x and y line up with the compass: east-north or bearing
    #[structopt(long, default_value = "east-north")]
    axes: Axes,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::from_args();

    let presets = match args.presets {
        Some(ref path) => Presets::load(path)?,
        None => Presets::default(),
    };
    let mut input = FeatureSet::load(&args.input)?;
    input.resolve_highways(&presets);
    info!(
        "Loaded {} roads, {} areas, and {} models from {}",
        input.roads.len(),
        input.areas.len(),
        input.models.len(),
        args.input
    );

    let assembler = GeometryAssembler::new(Projector::new(input.origin, args.axes), presets);
    let map = assembler.assemble(&input, args.layers);

    fs_err::write(&args.output, serde_json::to_string_pretty(&map)?)?;
    info!("Wrote {}", args.output);

    if let Some(path) = args.geojson {
        let mut emitter = GeoJsonEmitter::new();
        map.emit(&mut emitter)?;
        fs_err::write(&path, emitter.into_string()?)?;
        info!("Wrote {}", path);
    }
    Ok(())
}
