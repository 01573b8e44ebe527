use thiserror::Error;

#[derive(Error, Debug)]
pub enum PagerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Page {index} out of range (page count {page_count})")]
    PageOutOfRange { index: usize, page_count: usize },

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
