//! `nr-routes` — named routes kept valid while the road network changes.
//!
//! # Operations
//!
//! | Method                        | Effect                                              |
//! |-------------------------------|-----------------------------------------------------|
//! | `add_road` / `repair_road`    | Plain graph edits; routes are unaffected            |
//! | `new_route`                   | Route along the unique best path between two cities |
//! | `extend_route`                | Grow a route at whichever end is best reached       |
//! | `remove_road`                 | Unlink a road, rerouting every route that used it, or fail with nothing changed |
//! | `add_route_from_description`  | Install a route given hop by hop                    |
//! | `remove_route`                | Forget a route                                      |
//! | `route_description`           | `id;city;length;year;…;city`                        |
//!
//! # Quick-start
//!
//! ```
//! use nr_routes::RoadMap;
//!
//! let mut map = RoadMap::new();
//! map.add_road("A", "B", 10, 2000).unwrap();
//! map.add_road("B", "C", 10, 2000).unwrap();
//! map.new_route(1, "A", "C").unwrap();
//! assert_eq!(map.route_description(1), "1;A;10;2000;B;10;2000;C");
//! ```

pub mod map;
pub mod repair;
pub mod route;

#[cfg(test)]
mod tests;

pub use map::{Hop, RoadInfo, RoadMap};
pub use route::Route;
