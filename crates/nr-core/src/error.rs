//! Road-map error type.
//!
//! Every operation either applies completely or fails with one of these
//! variants and leaves the map exactly as it was.

use thiserror::Error;

use crate::RouteId;

/// Coarse classification of a [`MapError`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    /// The request was malformed; rejected before touching the graph.
    InvalidInput,
    /// A city, road, route, or path does not exist.
    NotFound,
    /// The shortest path exists but is not unique.
    Ambiguous,
}

/// Errors produced by the road map.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("invalid city name {0:?}")]
    InvalidCityName(String),

    #[error("both ends of the road are {0:?}")]
    SameCity(String),

    #[error("road length must be positive")]
    ZeroLength,

    #[error("year must be non-zero")]
    ZeroYear,

    #[error("route id {0} is outside the accepted range")]
    RouteIdOutOfRange(u32),

    #[error("route {0} already exists")]
    RouteExists(RouteId),

    #[error("road {0:?} - {1:?} already exists")]
    RoadExists(String, String),

    #[error("city {city:?} already lies on route {route}")]
    CityOnRoute { route: RouteId, city: String },

    #[error("repair year {requested} is older than the recorded year {current}")]
    RepairYearTooOld { current: i32, requested: i32 },

    #[error("road {from:?} - {to:?} has length {stored}, not {given}")]
    LengthMismatch {
        from:   String,
        to:     String,
        stored: u32,
        given:  u32,
    },

    #[error("city {0:?} appears more than once on the route")]
    RepeatedCity(String),

    #[error("malformed route description: {0}")]
    MalformedRoute(String),

    #[error("city {0:?} not found")]
    CityNotFound(String),

    #[error("no road between {0:?} and {1:?}")]
    RoadNotFound(String, String),

    #[error("route {0} not found")]
    RouteNotFound(RouteId),

    #[error("no path from {from:?} to {to:?}")]
    NoPath { from: String, to: String },

    #[error("shortest path from {from:?} to {to:?} is not unique")]
    AmbiguousPath { from: String, to: String },
}

impl MapError {
    /// Classify this error into the three failure families.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MapError::CityNotFound(_)
            | MapError::RoadNotFound(..)
            | MapError::RouteNotFound(_)
            | MapError::NoPath { .. } => ErrorKind::NotFound,
            MapError::AmbiguousPath { .. } => ErrorKind::Ambiguous,
            _ => ErrorKind::InvalidInput,
        }
    }
}

/// Shorthand result type for all `nr-*` crates.
pub type MapResult<T> = Result<T, MapError>;
