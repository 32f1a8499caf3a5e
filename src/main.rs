pub mod config;
pub mod errors;
pub mod import;
pub mod mapper;
pub mod reader;
pub mod store;

use clap::Parser;
use std::path::PathBuf;

use crate::import::{eat, list_gzip_files};
use crate::mapper::SegmentIdMapper;
use crate::store::SegmentStore;
use crate::store::grpc::GrpcSegmentStore;

#[cfg(target_os = "linux")]
#[global_allocator]
static ALLOC: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "pensieve")]
#[command(about = "Ingest gzipped krux segment logs into a bitmap-index store", long_about = None)]
struct Args {
    /// Name of the target index
    #[arg(long, default_value = config::DEFAULT_INDEX)]
    index: String,

    /// Name of the target field
    #[arg(long, default_value = config::DEFAULT_FIELD)]
    field: String,

    /// Directory to search for gzip files
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// host:port of the bitmap store
    #[arg(long, default_value = config::DEFAULT_STORE_URI)]
    uri: String,

    /// Maximum records per import batch
    #[arg(long, default_value_t = config::DEFAULT_IMPORT_BATCH_SIZE)]
    batch_size: usize,
}

fn setup_logging() {
    unsafe {
        if std::env::var("RUST_LOG").is_err() {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::init();
}

async fn run(args: Args) -> errors::Result<()> {
    let mut store = GrpcSegmentStore::connect(&args.uri, &args.index, &args.field).await?;
    store.ensure_schema().await?;

    let mut mapper = SegmentIdMapper::new(&mut store).await?;

    let files = list_gzip_files(&args.dir)?;
    log::info!("Found {} gzip files in {}", files.len(), args.dir.display());

    let mut viewer_index = 0u64;
    for path in &files {
        viewer_index = eat(&mut store, &mut mapper, path, viewer_index, args.batch_size).await?;
        log::info!("Ingested {} viewers", viewer_index);
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
