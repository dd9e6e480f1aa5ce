//! `nr-core` — foundational types for the national road map.
//!
//! This crate is a dependency of every other `nr-*` crate.  It has no `nr-*`
//! dependencies and a single required external one (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `CityId`, `RouteId`                                        |
//! | [`error`]  | `MapError`, `ErrorKind`, `MapResult`                       |
//! | [`config`] | `MapConfig`                                                |
//! | [`name`]   | `validate_city_name`, `is_valid_city_name`                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and `MapConfig`.     |

pub mod config;
pub mod error;
pub mod ids;
pub mod name;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::MapConfig;
pub use error::{ErrorKind, MapError, MapResult};
pub use ids::{CityId, RouteId};
pub use name::{is_valid_city_name, validate_city_name};
