use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FootprintError {
    #[error("Nucleosome probability array has length {found}, expected wrap length {expected}")]
    InvalidProfileLength { expected: usize, found: usize },

    #[error("Probability {value} at position {position} is outside [0, 1]")]
    InvalidProbabilityValue { position: usize, value: f64 },

    #[error("Cleavage profile has zero mean probability; breakage rate cannot be calibrated")]
    DegenerateProfile,

    #[error("Invalid binning configuration: {0}")]
    InvalidBinningConfig(String),

    #[error("No fragments survived filtering")]
    EmptyAggregate,

    #[error("Invalid fiber geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid simulation configuration: {0}")]
    InvalidSimulationConfig(String),
}

pub type Result<T> = std::result::Result<T, FootprintError>;
