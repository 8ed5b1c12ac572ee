use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use cityroute::{AStar, Graph, GreatCircle};

#[derive(Debug, thiserror::Error)]
#[error("{0:?}: no such city, and not a \"lat,lon\" position")]
struct UnknownPlace(String);

#[derive(Parser)]
struct Cli {
    /// The path to the CSV file with cities (name, lon, lat)
    nodes_file: PathBuf,

    /// The path to the CSV file with connections (from, to, cost)
    edges_file: PathBuf,

    /// Name of the start city, or a "lat,lon" position to snap to the nearest city
    start: String,

    /// Name of the goal city, or a "lat,lon" position to snap to the nearest city
    goal: String,

    /// Maximum number of cities expanded during the search
    #[arg(long, default_value_t = cityroute::DEFAULT_STEP_LIMIT)]
    step_limit: usize,

    /// Multiplier converting great-circle kilometers into edge cost units.
    /// The default assumes costs in kilometers; use 0.00899 (1/111.2)
    /// for costs in degrees of latitude/longitude
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let g = cityroute::io::load_graph(&cli.nodes_file, &cli.edges_file)?;
    let start = resolve_place(&g, &cli.start)?;
    let goal = resolve_place(&g, &cli.goal)?;

    if !cli.scale.is_finite() || cli.scale < 0.0 {
        return Err(format!("invalid heuristic scale: {}", cli.scale).into());
    }
    let heuristic = GreatCircle::with_scale(&g, cli.scale);
    let astar = AStar::new(&g, heuristic).with_step_limit(cli.step_limit);
    let route = astar.search(start, goal)?;

    let coordinates: Vec<[f64; 2]> = route
        .path
        .iter()
        .filter_map(|id| g.get_node(id))
        .map(|nd| [nd.lon, nd.lat])
        .collect();

    let collection = serde_json::json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {
                "path": route.path,
                "cost": route.cost,
            },
            "geometry": {
                "type": "LineString",
                "coordinates": coordinates,
            },
        }],
    });
    println!("{}", serde_json::to_string_pretty(&collection)?);

    Ok(())
}

/// Interprets a command-line place as a city name, falling back to
/// the city nearest to a "lat,lon" position.
fn resolve_place<'a>(g: &'a Graph, place: &str) -> Result<&'a str, UnknownPlace> {
    if let Some(nd) = g.get_node(place) {
        return Ok(&nd.id);
    }

    place
        .split_once(',')
        .and_then(|(lat, lon)| {
            let lat = lat.trim().parse::<f64>().ok()?;
            let lon = lon.trim().parse::<f64>().ok()?;
            Some((lat, lon))
        })
        .and_then(|(lat, lon)| g.find_nearest_node(lat, lon))
        .map(|nd| {
            log::info!("{place} snapped to {}", nd.id);
            nd.id.as_str()
        })
        .ok_or_else(|| UnknownPlace(place.to_owned()))
}
