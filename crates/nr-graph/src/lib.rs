//! `nr-graph` — road graph and unique shortest-path search.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`sequence`] | `Sequence<T>` linked container with stable `Slot`s        |
//! | [`queue`]    | `PathKey` rank, `PathQueue` min-queue                     |
//! | [`network`]  | `RoadNetwork`, `City`, `Road`                             |
//! | [`router`]   | `Router` trait, `PathQuery`, `UniqueDijkstra`             |

pub mod network;
pub mod queue;
pub mod router;
pub mod sequence;


pub use network::{City, Road, RoadNetwork};
pub use queue::{PathKey, PathQueue};
pub use router::{PathQuery, Router, SearchContext, UniqueDijkstra};
pub use sequence::{Sequence, Slot};
