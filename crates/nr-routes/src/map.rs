//! The `RoadMap` — road network plus the routes laid over it.
//!
//! Every public operation validates its arguments first and either applies
//! completely or returns an error with the map unchanged.  Road removal is
//! the one operation that must stage changes before it can know whether it
//! succeeds; it lives in [`crate::repair`].

use std::collections::BTreeMap;

use log::debug;
use rustc_hash::FxHashSet;

use nr_core::{validate_city_name, CityId, MapConfig, MapError, MapResult, RouteId};
use nr_graph::{PathQuery, RoadNetwork, Router, Sequence, UniqueDijkstra};

use crate::route::Route;

/// Length and year of one road, as reported to callers.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct RoadInfo {
    pub length: u32,
    pub year:   i32,
}

/// One step of an explicitly described route: the road taken and the city
/// it leads to.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Hop<'a> {
    pub length: u32,
    pub year:   i32,
    pub city:   &'a str,
}

/// National road map: cities, roads, and routes kept valid under edits.
///
/// Generic over the path engine; [`UniqueDijkstra`] unless a test or an
/// application supplies another [`Router`].
pub struct RoadMap<R: Router = UniqueDijkstra> {
    pub(crate) network: RoadNetwork,
    /// Keyed by id so repairs visit routes in ascending id order.
    pub(crate) routes:  BTreeMap<RouteId, Route>,
    pub(crate) router:  R,
    config:             MapConfig,
}

impl RoadMap<UniqueDijkstra> {
    pub fn new() -> Self {
        Self::with_config(MapConfig::default())
    }

    pub fn with_config(config: MapConfig) -> Self {
        Self::with_router(config, UniqueDijkstra::new())
    }
}

impl Default for RoadMap<UniqueDijkstra> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Router> RoadMap<R> {
    pub fn with_router(config: MapConfig, router: R) -> Self {
        Self {
            network: RoadNetwork::new(),
            routes: BTreeMap::new(),
            router,
            config,
        }
    }

    // ── Introspection ─────────────────────────────────────────────────────

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    pub fn city_count(&self) -> usize {
        self.network.city_count()
    }

    /// The live road between two named cities.
    pub fn road(&self, city1: &str, city2: &str) -> Option<RoadInfo> {
        let a = self.network.find_city(city1)?;
        let b = self.network.find_city(city2)?;
        self.network
            .road(a, b)
            .filter(|r| !r.deleted)
            .map(|r| RoadInfo { length: r.length, year: r.year })
    }

    pub fn route(&self, id: u32) -> Option<&Route> {
        self.routes.get(&RouteId(id))
    }

    /// Ids of all routes, ascending.
    pub fn route_ids(&self) -> impl Iterator<Item = RouteId> + '_ {
        self.routes.keys().copied()
    }

    /// City names of a route, in order.
    pub fn route_cities(&self, id: u32) -> Option<Vec<&str>> {
        let route = self.route(id)?;
        Some(route.cities().iter().map(|&c| self.network.city_name(c)).collect())
    }

    /// `id;city;length;year;city;...;city`, or an empty string for an
    /// unknown route.
    pub fn route_description(&self, id: u32) -> String {
        self.route(id)
            .map(|r| r.describe(&self.network))
            .unwrap_or_default()
    }

    // ── Argument checks ───────────────────────────────────────────────────

    fn check_pair(city1: &str, city2: &str) -> MapResult<()> {
        validate_city_name(city1)?;
        validate_city_name(city2)?;
        if city1 == city2 {
            return Err(MapError::SameCity(city1.to_owned()));
        }
        Ok(())
    }

    fn check_new_route_id(&self, id: u32) -> MapResult<RouteId> {
        if !self.config.accepts_route_id(id) {
            return Err(MapError::RouteIdOutOfRange(id));
        }
        let id = RouteId(id);
        if self.routes.contains_key(&id) {
            return Err(MapError::RouteExists(id));
        }
        Ok(id)
    }

    pub(crate) fn require_pair(&self, city1: &str, city2: &str) -> MapResult<(CityId, CityId)> {
        Self::check_pair(city1, city2)?;
        Ok((self.network.require_city(city1)?, self.network.require_city(city2)?))
    }

    // ── Roads ─────────────────────────────────────────────────────────────

    /// Add a road, creating either city if it is new.
    ///
    /// # Errors
    ///
    /// Invalid or equal names, zero length or year, or an existing road.
    pub fn add_road(&mut self, city1: &str, city2: &str, length: u32, year: i32) -> MapResult<()> {
        Self::check_pair(city1, city2)?;
        if length == 0 {
            return Err(MapError::ZeroLength);
        }
        if year == 0 {
            return Err(MapError::ZeroYear);
        }
        let a = self.network.insert_city(city1)?;
        let b = self.network.insert_city(city2)?;
        self.network.add_road(a, b, length, year)
    }

    /// Record a repair; `year` may equal but not precede the stored year.
    pub fn repair_road(&mut self, city1: &str, city2: &str, year: i32) -> MapResult<()> {
        if year == 0 {
            return Err(MapError::ZeroYear);
        }
        let (a, b) = self.require_pair(city1, city2)?;
        self.network.repair_road(a, b, year)
    }

    // ── Routes ────────────────────────────────────────────────────────────

    /// Create route `id` along the unique best path from `city1` to `city2`.
    pub fn new_route(&mut self, id: u32, city1: &str, city2: &str) -> MapResult<()> {
        let id = self.check_new_route_id(id)?;
        let (a, b) = self.require_pair(city1, city2)?;

        let path = self.router.find_path(&self.network, &PathQuery::new(a, b))?;
        debug!("route {id} created through {} cities", path.len());
        self.routes.insert(id, Route::new(id, path.into_iter().collect()));
        Ok(())
    }

    /// Lengthen route `id` so that it ends (or starts) at `city`.
    ///
    /// The new stretch is the unique best path from `city` to either end of
    /// the route that avoids the route's other cities.
    pub fn extend_route(&mut self, id: u32, city: &str) -> MapResult<()> {
        validate_city_name(city)?;
        let id = RouteId(id);
        let route = self.routes.get_mut(&id).ok_or(MapError::RouteNotFound(id))?;
        let c = self.network.require_city(city)?;
        if route.contains(c) {
            return Err(MapError::CityOnRoute { route: id, city: city.to_owned() });
        }

        let cities = route.cities();
        let (front, back) = match (cities.front(), cities.back()) {
            (Some(&f), Some(&b)) => (f, b),
            _ => return Err(MapError::RouteNotFound(id)),
        };
        let avoid = route.city_ids();
        let query = PathQuery::new(c, front).or_to(back).avoiding(&avoid);
        let mut path = self.router.find_path(&self.network, &query)?;

        // `path` runs city → … → reached end; drop the end, which is already on the route.
        let reached = path.pop();
        let mut stretch: Sequence<CityId> = path.into_iter().collect();
        let added = stretch.len();
        let seq = route.cities_mut();
        if reached == Some(front) {
            let begin = seq.begin();
            seq.splice_before(begin, &mut stretch);
        } else {
            stretch.reverse();
            let end = seq.end();
            seq.splice_before(end, &mut stretch);
        }
        debug!(
            "route {id} extended by {added} cities at its {}",
            if reached == Some(front) { "start" } else { "end" }
        );
        Ok(())
    }

    /// Install route `id` exactly as described, creating missing cities and
    /// roads and repairing existing roads to the given years.
    ///
    /// Nothing is changed unless the whole description is acceptable:
    /// existing roads must match the given length and may not be given an
    /// older year, and no city may repeat.
    pub fn add_route_from_description(&mut self, id: u32, start: &str, hops: &[Hop<'_>]) -> MapResult<()> {
        let id = self.check_new_route_id(id)?;
        if hops.is_empty() {
            return Err(MapError::MalformedRoute("a route needs at least two cities".into()));
        }

        // ── Validate ──────────────────────────────────────────────────────
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        validate_city_name(start)?;
        seen.insert(start);
        let mut prev = start;
        for hop in hops {
            validate_city_name(hop.city)?;
            if !seen.insert(hop.city) {
                return Err(MapError::RepeatedCity(hop.city.to_owned()));
            }
            if hop.length == 0 {
                return Err(MapError::ZeroLength);
            }
            if hop.year == 0 {
                return Err(MapError::ZeroYear);
            }
            if let Some(existing) = self.road(prev, hop.city) {
                if existing.length != hop.length {
                    return Err(MapError::LengthMismatch {
                        from:   prev.to_owned(),
                        to:     hop.city.to_owned(),
                        stored: existing.length,
                        given:  hop.length,
                    });
                }
                if hop.year < existing.year {
                    return Err(MapError::RepairYearTooOld {
                        current:   existing.year,
                        requested: hop.year,
                    });
                }
            }
            prev = hop.city;
        }

        // ── Apply ─────────────────────────────────────────────────────────
        let mut cities = Sequence::new();
        let mut prev = self.network.insert_city(start)?;
        cities.push_back(prev);
        for hop in hops {
            let next = self.network.insert_city(hop.city)?;
            if self.network.road(prev, next).is_some() {
                self.network.repair_road(prev, next, hop.year)?;
            } else {
                self.network.add_road(prev, next, hop.length, hop.year)?;
            }
            cities.push_back(next);
            prev = next;
        }
        debug!("route {id} installed from a description of {} cities", cities.len());
        self.routes.insert(id, Route::new(id, cities));
        Ok(())
    }

    /// Forget route `id`.  Its roads and cities stay on the map.
    pub fn remove_route(&mut self, id: u32) -> MapResult<()> {
        let id = RouteId(id);
        if self.routes.remove(&id).is_none() {
            return Err(MapError::RouteNotFound(id));
        }
        debug!("route {id} removed");
        Ok(())
    }
}
