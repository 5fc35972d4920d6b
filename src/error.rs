use crate::Float;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShowerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Particle queue exceeded {limit} entries in an event with E0 = {e0} GeV")]
    QueueOverflow { limit: usize, e0: Float },
}

pub type ShowerResult<T> = Result<T, ShowerError>;
