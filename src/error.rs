use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error{
    #[error("At least one thruster must be configured")]
    NoThrusters,

    #[error("Number of thrusters ({count}) is greater than supported thruster count ({max})")]
    TooManyThrusters{ count: usize, max: usize },

    #[error("Thruster index {index} out of range for {count} thrusters")]
    ThrusterIndex{ index: usize, count: usize },

    #[error("Invalid bits per thruster: {0}")]
    InvalidBitWidth(u32),

    #[error("Thruster levels need {required} bits but the signal word only has {available}")]
    SignalOverflow{ required: u32, available: u32 },

    #[error("Invalid force limit {name}: {value}")]
    InvalidForceLimit{ name: &'static str, value: f64 },

    #[error("Pseudo-inverse decomposition failed: {0}")]
    Decomposition(String),

    #[error("Failed to read config {path}: {source}")]
    Io{
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse{
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid geometry table {name}: {source}")]
    ThrusterTable{
        name: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Topic {0} already exists with a different message type")]
    TopicTypeMismatch(String),
}

pub type Result<T> = std::result::Result<T, Error>;
