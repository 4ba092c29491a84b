pub mod config;
pub mod fragments;
pub mod geometry;
pub mod histogram;
pub mod probability;
pub mod profile;

// re-export for cleaner imports
pub use self::config::SimulationConfig;
pub use self::fragments::{
    AggregateDistribution, Fragment, FragmentSummary, RelativeDistribution, TrialResult,
};
pub use self::geometry::FiberGeometry;
pub use self::histogram::{LengthDistribution, VPlotBins, VPlotHistogram};
pub use self::probability::ProbabilitySpec;
pub use self::profile::CleavageProfile;
