//! route-tiles CLI
//!
//! Prints the point-cloud and vector tiles a recorded route needs, one identifier per line.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use route_tiles::source::{read_positions_path, PositionLayout};
use route_tiles::{
    select_tiles_from_path, MatchConfig, RouteTilesError, Selection, SortMethod, TileCategory,
    DEFAULT_BUFFER,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    /// Hilbert curve packing
    Hilbert,
    /// Sort-tile-recursive packing
    Str,
}

impl From<SortArg> for SortMethod {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Hilbert => SortMethod::Hilbert,
            SortArg::Str => SortMethod::Str,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "route-tiles")]
#[command(about = "List the map tiles a recorded route passes through", long_about = None)]
struct Args {
    /// Point cloud manifest, columns "path,minx,miny,_,maxx,maxy,..."
    #[arg(long, default_value = "./point_cloud_map_list.csv")]
    map: PathBuf,

    /// Vector map manifest, columns "path,minx,miny,maxx,maxy,..."
    #[arg(long = "vec", default_value = "./vector_map_list.csv")]
    vector: PathBuf,

    /// Only select vector tiles whose path contains this name, e.g. sign, pole, markline
    #[arg(long = "vec-name", default_value = "")]
    vector_name: String,

    /// Route positions, columns "_,_,_,_,x,y,..."
    #[arg(long, default_value = "./pos.csv")]
    pos: PathBuf,

    /// Margin added around every tile, in map units
    #[arg(long, default_value_t = DEFAULT_BUFFER, allow_negative_numbers = true)]
    buffer: f64,

    /// Skip point cloud tiles
    #[arg(long = "only-vec")]
    only_vector: bool,

    /// Maximum children per index node
    #[arg(long, default_value_t = route_tiles::rtree::DEFAULT_NODE_SIZE)]
    node_size: u16,

    /// Index packing method
    #[arg(long, value_enum, default_value = "hilbert")]
    sort: SortArg,

    /// Write the list to this file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        log::error!("{err}");
        process::exit(1);
    }
}

fn run(args: &Args) -> route_tiles::Result<()> {
    let base = MatchConfig::default()
        .with_buffer(args.buffer)
        .with_node_size(args.node_size)
        .with_sort(args.sort.into());
    base.validate()?;

    let positions = read_positions_path(&args.pos, &PositionLayout::DEFAULT)?;
    log::info!("{} positions loaded", positions.items.len());

    let mut selections = vec![];
    if !args.only_vector {
        selections.push(select_tiles_from_path(
            TileCategory::PointCloud,
            &args.map,
            &positions.items,
            &base,
        )?);
    }
    let vector_config = base.clone().with_filter(args.vector_name.as_str());
    selections.push(select_tiles_from_path(
        TileCategory::Vector,
        &args.vector,
        &positions.items,
        &vector_config,
    )?);

    write_listing(args.out.as_deref(), &render(&selections))
}

fn write_listing(out: Option<&Path>, listing: &str) -> route_tiles::Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, listing).map_err(|source| RouteTilesError::OutputUnavailable {
                path: path.to_path_buf(),
                source,
            })
        }
        None => {
            print!("{listing}");
            Ok(())
        }
    }
}

/// One `# category` header per selection followed by its identifiers.
fn render(selections: &[Selection]) -> String {
    let mut out = String::new();
    for selection in selections {
        let _ = writeln!(out, "# {}", selection.category);
        for id in selection.tiles.iter() {
            let _ = writeln!(out, "{id}");
        }
    }
    out
}
