use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use clap::Parser;
use lantern_blocks::{BlockId, BlockRegistry};
use lantern_chunk::{ChunkStore, DirtyLog, DirtyTracker};
use lantern_geom::{BlockPos, BlockRegion, ChunkRegion};
use lantern_world::{
    ChunkLoader, MainThreadWorldProvider, WorldChangeListener, WorldConfig, WorldProviderCore,
    WorldProviderCoreImpl,
};
use log::{LevelFilter, error, info, warn};
use simplelog::{ColorChoice, Config, TerminalMode, TermLogger};

#[derive(Parser, Debug)]
#[command(name = "lantern", about = "Stream a flat world in and watch light settle")]
struct Args {
    /// World config (TOML). Built-in defaults when omitted.
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Chunks loaded around the origin; overrides the config.
    #[arg(long)]
    radius: Option<u32>,
    /// Generation threads; overrides the config.
    #[arg(long)]
    workers: Option<usize>,
    #[arg(long)]
    log_level: Option<LevelFilter>,
    /// Column whose light profile is printed.
    #[arg(long, default_value_t = 8)]
    x: i32,
    #[arg(long, default_value_t = 8)]
    z: i32,
    /// Height of the roof placed over the column, above the surface.
    #[arg(long, default_value_t = 8)]
    roof_height: i32,
    /// Skip placing the torch under the roof.
    #[arg(long)]
    no_torch: bool,
}

#[derive(Default)]
struct ChangeCounter(AtomicUsize);

impl WorldChangeListener for ChangeCounter {
    fn on_block_changed(&self, _pos: BlockPos, _new: BlockId, _old: BlockId) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let cfg = match &args.config {
        Some(path) => match WorldConfig::load_from_path(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => WorldConfig::default(),
    };
    let level = match args.log_level {
        Some(level) => level,
        None => match cfg.log_level() {
            Ok(level) => level,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        },
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    match run(&args, &cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, cfg: &WorldConfig) -> Result<(), Box<dyn Error>> {
    let registry = Arc::new(cfg.build_registry()?);
    let generator = cfg.flat_generator(&registry)?;
    let surface = generator.surface();
    let dirty_log = Arc::new(DirtyLog::new());
    let mut world = WorldProviderCoreImpl::new(
        cfg.world_info(),
        ChunkStore::new(),
        Arc::clone(&registry),
        DirtyTracker::new(dirty_log.clone()),
    );

    let workers = args.workers.unwrap_or(cfg.workers);
    let radius = args.radius.unwrap_or(cfg.view_radius) as i32;
    let mut loader = ChunkLoader::new(Arc::new(generator), workers, cfg.extra_data_slots)?;
    let center = BlockPos::new(args.x, surface, args.z).chunk_pos();
    let queued = loader.request_region(ChunkRegion::around(center, radius), world.chunks());
    let start = Instant::now();
    loader.finish_into(&mut world);
    info!(
        "world `{}`: {} chunks lit in {:.1?}",
        world.world_info().title,
        queued,
        start.elapsed()
    );
    world.take_dirty();
    dirty_log.take();

    let column = BlockPos::new(args.x, surface, args.z);
    println!("after load:");
    print_profile(&world, &registry, column, args.roof_height);

    let mut world = MainThreadWorldProvider::new(world);
    let counter = Arc::new(ChangeCounter::default());
    world.register_listener(counter.clone());

    let roof = roof_blocks(generator.fill(), column, args.roof_height);
    world.set_blocks(&roof);
    if !args.no_torch {
        match registry.id_by_name("torch") {
            Some(torch) => {
                world.set_block(column.offset(2, 1, 0), torch);
            }
            None => warn!("no `torch` block registered, skipping"),
        }
    }

    let pending = world.pending_changes();
    let start = Instant::now();
    world.process_propagation();
    info!(
        "{} changes ({} notifications) propagated in {:.1?}, {} chunks need a remesh",
        pending,
        counter.0.load(Ordering::Relaxed),
        start.elapsed(),
        dirty_log.take().len()
    );

    println!("after roof:");
    print_profile(world.inner(), &registry, column, args.roof_height);
    Ok(())
}

/// A 9x9 slab of `block` `height` blocks above `column`.
fn roof_blocks(block: BlockId, column: BlockPos, height: i32) -> Vec<(BlockPos, BlockId)> {
    BlockRegion::from_point(column.offset(0, height, 0))
        .expand(4, 0, 4)
        .iter()
        .map(|pos| (pos, block))
        .collect()
}

fn print_profile<W: WorldProviderCore>(world: &W, registry: &BlockRegistry, column: BlockPos, height: i32) {
    println!("{:>5}  {:<10} {:>5} {:>8}", "y", "block", "light", "sunlight");
    for dy in (-2..=height + 2).rev() {
        let pos = column.offset(0, dy, 0);
        println!(
            "{:>5}  {:<10} {:>5} {:>8}",
            pos.y,
            registry.block(world.block(pos)).name,
            world.light(pos),
            world.sunlight(pos)
        );
    }
}
