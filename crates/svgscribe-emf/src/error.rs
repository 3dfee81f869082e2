pub type Result<T> = std::result::Result<T, MetafileParseError>;

#[derive(Debug, thiserror::Error)]
pub enum MetafileParseError {
    #[error("metafile does not start with a header record")]
    MissingHeader,

    #[error("record at offset {offset} declares size {size}, below the 8 byte minimum")]
    RecordTooSmall { offset: usize, size: u32 },

    #[error("record at offset {offset} needs {needed} bytes but only {available} remain")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("record type {record_type} at offset {offset} is shorter than its fields")]
    FieldOverrun { record_type: u32, offset: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
