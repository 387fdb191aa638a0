use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Logging initialization failed: {0}")]
    LoggingInit(String),
}

pub type Result<T> = std::result::Result<T, Error>;
