use std::io::BufRead;

use crate::config::FIELD_SEPARATOR;
use crate::errors;
use crate::mapper::SegmentIdMapper;
use crate::store::{Bit, SegmentStore};

// Pull-based reader over one decompressed krux log.
//
// Each line is `<viewer-key>^-^<kruxid>[...]`. Consecutive lines with the
// same viewer key belong to one viewer; the column counter advances on
// every key change and is carried from file to file by the caller, so
// viewer columns are unique across the whole run.
//
// The last-seen viewer key starts out as the empty string, which no real
// line carries, so the first line of a run always advances the counter:
// the first viewer is column 1 and column 0 is never assigned. That quirk
// matches what earlier ingestion runs wrote and is kept on purpose.
pub struct RecordReader<R: BufRead> {
    reader: R,
    line: u64,
    viewer_value: String,
    viewer_index: u64,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R, viewer_index: u64) -> Self {
        Self {
            reader,
            line: 0,
            viewer_value: String::new(),
            viewer_index,
        }
    }

    // Current value of the viewer column counter.
    pub fn viewer_index(&self) -> u64 {
        self.viewer_index
    }

    // Produce the next resolved membership bit, or None at end of stream.
    //
    // Resolving the kruxid may itself issue remote calls (see
    // SegmentIdMapper::resolve); resolution happens exactly once per line,
    // with no look-ahead.
    pub async fn next_bit<S: SegmentStore>(
        &mut self,
        mapper: &mut SegmentIdMapper,
        store: &mut S,
    ) -> errors::Result<Option<Bit>> {
        let mut buffer = String::new();

        let bytes_read = self
            .reader
            .read_line(&mut buffer)
            .map_err(|e| errors::Errors::StreamError(format!("Failed to read line: {}", e)))?;

        if bytes_read == 0 {
            return Ok(None);
        }

        self.line += 1;

        let text = buffer.trim();
        let mut parts = text.split(FIELD_SEPARATOR);

        let (Some(viewer_key), Some(kruxid)) = (parts.next(), parts.next()) else {
            return Err(errors::Errors::MalformedRecord { line: self.line });
        };

        if viewer_key != self.viewer_value {
            self.viewer_index += 1;
            self.viewer_value = viewer_key.to_string();
        }

        let row_id = mapper.resolve(store, kruxid).await?;

        Ok(Some(Bit {
            row_id,
            column_id: self.viewer_index,
        }))
    }
}
