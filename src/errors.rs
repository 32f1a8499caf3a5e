#[derive(Debug)]
pub enum Errors {
    MalformedRecord { line: u64 },
    StreamError(String),
    RemoteStoreError(String),
}

impl std::fmt::Display for Errors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Errors::MalformedRecord { line } => {
                write!(f, "Malformed Record: invalid krux line: {}", line)
            }
            Errors::StreamError(msg) => write!(f, "Stream Error: {}", msg),
            Errors::RemoteStoreError(msg) => write!(f, "Remote Store Error: {}", msg),
        }
    }
}

impl std::error::Error for Errors {}

pub type Result<T> = std::result::Result<T, Errors>;
