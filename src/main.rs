//! Renders one map of a Doom-format WAD to SVG.
//!
//! ```text
//! wadmap DOOM1.WAD --list             # print the maps in the archive
//! wadmap DOOM1.WAD                    # first map to E1M1.svg
//! wadmap DOOM1.WAD E1M3 out.svg       # chosen map and output path
//! wadmap DOOM1.WAD E1M3 --size 2048x1536
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use wadmap::archive::{MapName, Wad};
use wadmap::error::ArchiveError;
use wadmap::operations::BuildMap;
use wadmap::render::{RenderParams, RenderSvg};
use wadmap::Result;

#[derive(Debug, Parser)]
#[command(name = "wadmap")]
#[command(about = "Render a Doom map from a WAD archive to SVG")]
struct Args {
    /// Path to the IWAD file
    wad: PathBuf,

    /// Map to render, e.g. E1M3 (default: first map in the archive)
    map: Option<MapName>,

    /// Output SVG path (default: <MAP>.svg)
    output: Option<PathBuf>,

    /// Print the maps in the archive and exit
    #[arg(long)]
    list: bool,

    /// Drawing surface size in pixels, e.g. 1024x768
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    size: Option<(f64, f64)>,
}

fn parse_size(value: &str) -> std::result::Result<(f64, f64), String> {
    let invalid = || format!("size must look like 1024x768, got {value:?}");
    let (w, h) = value.split_once(['x', 'X']).ok_or_else(invalid)?;
    let w = w.trim().parse().map_err(|_| invalid())?;
    let h = h.trim().parse().map_err(|_| invalid())?;
    Ok((w, h))
}

fn run(args: Args) -> Result<()> {
    let wad = Wad::open(&args.wad)?;

    if args.list {
        for name in wad.map_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let map = match args.map {
        Some(map) => map,
        None => *wad
            .map_names()
            .first()
            .ok_or_else(|| ArchiveError::UnknownMap("(none)".to_owned()))?,
    };
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{map}.svg")));

    let level = wad.load_level(map)?;
    let textures = wad.load_textures(&level)?;
    let geometry = BuildMap::new(&level).execute();

    let mut params = RenderParams::default();
    if let Some((width, height)) = args.size {
        params = params.with_size(width, height)?;
    }
    let document = RenderSvg::new(&level, &geometry)
        .with_textures(&textures)
        .with_params(params)
        .execute()?;
    svg::save(&output, &document)?;

    info!(
        %map,
        output = %output.display(),
        polygons = geometry.polygons.len(),
        "wrote map"
    );
    Ok(())
}

fn main() -> ExitCode {
    // Default: WARN for everything, INFO for wadmap.
    // Override with RUST_LOG (e.g. RUST_LOG=wadmap=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("wadmap=info".parse().unwrap_or_default());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("wadmap: {err}");
            ExitCode::FAILURE
        }
    }
}
