use tonic::transport::Channel;

use crate::errors;
use crate::store::{Bit, SegmentStore};

// Include the generated proto code
pub mod pensieve {
    tonic::include_proto!("pensieve");
}

use pensieve::bitmap_store_client::BitmapStoreClient;
use pensieve::{
    BindSegmentRequest, EnsureSchemaRequest, ImportBitsRequest, LookupSegmentRequest,
    RowCountRequest,
};

pub struct GrpcSegmentStore {
    client: BitmapStoreClient<Channel>,
    index: String,
    field: String,
}

impl GrpcSegmentStore {
    // `addr` is a bare host:port; the transport scheme is fixed.
    pub async fn connect(addr: &str, index: &str, field: &str) -> errors::Result<Self> {
        let endpoint = format!("http://{}", addr);

        let client = BitmapStoreClient::connect(endpoint).await.map_err(|e| {
            errors::Errors::RemoteStoreError(format!(
                "Failed to connect to bitmap store at '{}': {}",
                addr, e
            ))
        })?;

        Ok(Self {
            client,
            index: index.to_string(),
            field: field.to_string(),
        })
    }
}

#[tonic::async_trait]
impl SegmentStore for GrpcSegmentStore {
    async fn ensure_schema(&mut self) -> errors::Result<()> {
        let request = EnsureSchemaRequest {
            index: self.index.clone(),
            field: self.field.clone(),
        };

        self.client.ensure_schema(request).await.map_err(|e| {
            errors::Errors::RemoteStoreError(format!(
                "Failed to sync schema for '{}/{}': {}",
                self.index, self.field, e
            ))
        })?;

        Ok(())
    }

    async fn row_count(&mut self) -> errors::Result<u64> {
        let request = RowCountRequest {
            index: self.index.clone(),
            field: self.field.clone(),
        };

        let response = self.client.row_count(request).await.map_err(|e| {
            errors::Errors::RemoteStoreError(format!(
                "Failed to query row count for '{}/{}': {}",
                self.index, self.field, e
            ))
        })?;

        Ok(response.into_inner().count)
    }

    async fn lookup_segment(&mut self, kruxid: &str) -> errors::Result<Option<u64>> {
        let request = LookupSegmentRequest {
            index: self.index.clone(),
            field: self.field.clone(),
            kruxid: kruxid.to_string(),
        };

        let response = self.client.lookup_segment(request).await.map_err(|e| {
            errors::Errors::RemoteStoreError(format!(
                "Failed to look up segment '{}': {}",
                kruxid, e
            ))
        })?;

        let response = response.into_inner();

        if response.found {
            Ok(Some(response.row_id))
        } else {
            Ok(None)
        }
    }

    async fn bind_segment(&mut self, row_id: u64, kruxid: &str) -> errors::Result<()> {
        let request = BindSegmentRequest {
            index: self.index.clone(),
            field: self.field.clone(),
            row_id,
            kruxid: kruxid.to_string(),
        };

        self.client.bind_segment(request).await.map_err(|e| {
            errors::Errors::RemoteStoreError(format!(
                "Failed to bind segment '{}' to row {}: {}",
                kruxid, row_id, e
            ))
        })?;

        Ok(())
    }

    async fn import_bits(&mut self, bits: Vec<Bit>) -> errors::Result<()> {
        let batch_len = bits.len();

        let request = ImportBitsRequest {
            index: self.index.clone(),
            field: self.field.clone(),
            bits: bits
                .into_iter()
                .map(|bit| pensieve::Bit {
                    row_id: bit.row_id,
                    column_id: bit.column_id,
                })
                .collect(),
        };

        self.client.import_bits(request).await.map_err(|e| {
            errors::Errors::RemoteStoreError(format!(
                "Failed to import batch of {} bits into '{}/{}': {}",
                batch_len, self.index, self.field, e
            ))
        })?;

        Ok(())
    }
}
