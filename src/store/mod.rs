use crate::errors;

pub mod grpc;

// One set-membership bit: segment row x viewer column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bit {
    pub row_id: u64,
    pub column_id: u64,
}

// The exact surface the ingestion pipeline needs from the remote
// bitmap-index store. Implemented by the gRPC client and by the
// in-memory store the tests use.
#[tonic::async_trait]
pub trait SegmentStore {
    // Create the target index/field if they do not exist yet. Idempotent.
    async fn ensure_schema(&mut self) -> errors::Result<()>;

    // Number of rows in the field that carry a non-empty kruxid attribute.
    async fn row_count(&mut self) -> errors::Result<u64>;

    // At most one row whose kruxid attribute equals the given value.
    async fn lookup_segment(&mut self, kruxid: &str) -> errors::Result<Option<u64>>;

    // Persist the kruxid attribute on a row.
    async fn bind_segment(&mut self, row_id: u64, kruxid: &str) -> errors::Result<()>;

    // Bulk write of one batch of membership bits.
    async fn import_bits(&mut self, bits: Vec<Bit>) -> errors::Result<()>;
}
