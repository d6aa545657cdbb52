//! Configuration validation and loading errors.

/// Errors raised while loading or validating an analysis configuration.
/// All of these are fatal before any database activity.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("exposure_cuis must not be empty")]
    EmptyExposures,

    #[error("outcome_cuis must not be empty")]
    EmptyOutcomes,

    #[error("predicates must not be empty")]
    EmptyPredicates,

    #[error("no configured predicate is in the known vocabulary: {listed}")]
    UnknownPredicates { listed: String },

    #[error("degree must be a positive integer, got {degree}")]
    InvalidDegree { degree: u32 },

    #[error("threshold must be >= 1, got {threshold}")]
    ThresholdOutOfRange { threshold: u32 },

    #[error("thresholds_by_degree names hop {hop}, outside 1..={degree}")]
    HopThresholdOutOfRange { hop: u32, degree: u32 },

    #[error("blocklisted CUI {cui} is also an exposure or outcome CUI")]
    BlocklistOverlap { cui: String },

    #[error("unknown predefined configuration: {name}")]
    UnknownPreset { name: String },

    #[error("cannot read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse configuration file {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}
