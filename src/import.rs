use std::io::BufReader;
use std::path::{Path, PathBuf};

use flate2::bufread::GzDecoder;

use crate::errors;
use crate::mapper::SegmentIdMapper;
use crate::reader::RecordReader;
use crate::store::SegmentStore;

// Ingest one gzip-compressed krux log.
//
// Pulls the record reader to exhaustion, shipping bits to the store in
// batches of at most `batch_size`, and returns the final viewer column
// counter so the caller can seed the next file with it. Any error aborts
// the file; bits already imported stay imported.
pub async fn eat<S: SegmentStore>(
    store: &mut S,
    mapper: &mut SegmentIdMapper,
    path: &Path,
    viewer_index: u64,
    batch_size: usize,
) -> errors::Result<u64> {
    log::info!("Attempting to ingest {}", path.display());

    let file = std::fs::File::open(path).map_err(|e| {
        errors::Errors::StreamError(format!("Failed to open '{}': {}", path.display(), e))
    })?;

    let decoder = GzDecoder::new(BufReader::new(file));
    let mut reader = RecordReader::new(BufReader::new(decoder), viewer_index);

    let mut batch = Vec::with_capacity(batch_size);

    while let Some(bit) = reader.next_bit(mapper, store).await? {
        batch.push(bit);

        if batch.len() >= batch_size {
            store.import_bits(std::mem::take(&mut batch)).await?;
            batch = Vec::with_capacity(batch_size);
        }
    }

    // final partial batch
    if !batch.is_empty() {
        store.import_bits(batch).await?;
    }

    log::info!("done");

    Ok(reader.viewer_index())
}

// List the .gz files directly under `dir`, sorted by name so column
// assignment is deterministic across runs.
pub fn list_gzip_files(dir: &Path) -> errors::Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        errors::Errors::StreamError(format!(
            "Failed to read source directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| {
            entry.ok().map(|e| e.path()).filter(|path| {
                path.is_file() && path.extension().is_some_and(|ext| ext == "gz")
            })
        })
        .collect();

    files.sort();

    Ok(files)
}
