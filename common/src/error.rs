use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("polygon has zero area")]
    ZeroArea,
    #[error("polygon boundary intersects itself")]
    SelfIntersecting,
    #[error("hole {index} is not inside the shell")]
    HoleOutsideShell { index: usize },
    #[error("{ring}: {source}")]
    InvalidRing {
        ring: String,
        #[source]
        source: Box<GeometryError>,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("'{field}' must be greater than zero (got {value})")]
    NonPositive { field: &'static str, value: i64 },
    #[error("at least one mat fill must be configured")]
    NoFills,
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("layout verification failed: {containment} containment violation(s), {overlaps} overlapping pair(s)")]
pub struct CheckError {
    pub containment: usize,
    pub overlaps: usize,
}
