// Field separator used by krux log lines.
pub const FIELD_SEPARATOR: &str = "^-^";

pub const DEFAULT_INDEX: &str = "segmentation";
pub const DEFAULT_FIELD: &str = "membership";
pub const DEFAULT_STORE_URI: &str = "localhost:10101";

pub const DEFAULT_IMPORT_BATCH_SIZE: usize = 1_000_000;
