//! `nr-text` — drive a [`RoadMap`](nr_routes::RoadMap) from `;`-separated
//! command lines.
//!
//! # Commands
//!
//! | Line                                   | Effect                                          |
//! |----------------------------------------|-------------------------------------------------|
//! | `addRoad;c1;c2;length;year`            | `RoadMap::add_road`                             |
//! | `repairRoad;c1;c2;year`                | `RoadMap::repair_road`                          |
//! | `getRouteDescription;id`               | Print the description, or an empty line         |
//! | `newRoute;id;c1;c2`                    | `RoadMap::new_route`                            |
//! | `extendRoute;id;city`                  | `RoadMap::extend_route`                         |
//! | `removeRoad;c1;c2`                     | `RoadMap::remove_road`                          |
//! | `removeRoute;id`                       | `RoadMap::remove_route`                         |
//! | `id;city;length;year;city;…;city`      | `RoadMap::add_route_from_description`           |
//!
//! Empty lines and lines starting with `#` are skipped.  Any other line that
//! cannot be parsed or applied prints `ERROR <line number>` to the error
//! stream.
//!
//! # Example
//!
//! ```
//! use nr_routes::RoadMap;
//! use nr_text::run_commands;
//!
//! let input = b"addRoad;A;B;10;2000\nnewRoute;1;A;B\ngetRouteDescription;1\nnewRoute;1;A;B\n";
//! let (mut out, mut err) = (Vec::new(), Vec::new());
//! let mut map = RoadMap::new();
//! run_commands(&mut map, &input[..], &mut out, &mut err).unwrap();
//! assert_eq!(out, b"1;A;10;2000;B\n");
//! assert_eq!(err, b"ERROR 4\n");
//! ```

pub mod command;
pub mod error;
pub mod run;


pub use command::{Command, SyntaxError};
pub use error::{LineError, TextError, TextResult};
pub use run::{apply, run_commands, RunSummary};
