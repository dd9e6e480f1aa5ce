//! A named route: an ordered, loop-free sequence of cities.

use std::fmt::Write as _;

use nr_core::name::SEPARATOR;
use nr_core::{CityId, RouteId};
use nr_graph::{RoadNetwork, Sequence, Slot};

/// One route of the map.
///
/// Consecutive cities are always joined by a live road and no city repeats.
/// City handles are borrowed from the network; cities are never removed, so
/// they stay valid for the lifetime of the map.
#[derive(Debug)]
pub struct Route {
    id:     RouteId,
    cities: Sequence<CityId>,
}

impl Route {
    pub(crate) fn new(id: RouteId, cities: Sequence<CityId>) -> Self {
        debug_assert!(cities.len() >= 2);
        Self { id, cities }
    }

    pub fn id(&self) -> RouteId {
        self.id
    }

    pub fn cities(&self) -> &Sequence<CityId> {
        &self.cities
    }

    pub(crate) fn cities_mut(&mut self) -> &mut Sequence<CityId> {
        &mut self.cities
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn contains(&self, city: CityId) -> bool {
        self.cities.contains(&city)
    }

    /// Snapshot of the city handles, in route order.
    pub fn city_ids(&self) -> Vec<CityId> {
        self.cities.iter().copied().collect()
    }

    /// If `a` and `b` are neighbours on the route, their slots in route
    /// order.
    pub(crate) fn adjacent_slots(&self, a: CityId, b: CityId) -> Option<(Slot, Slot)> {
        let at = self.cities.find_slot(|&c| c == a)?;
        let next = self.cities.next(at);
        if self.cities.get(next) == Some(&b) {
            return Some((at, next));
        }
        let prev = self.cities.prev(at);
        if self.cities.get(prev) == Some(&b) {
            return Some((prev, at));
        }
        None
    }

    /// Render as `id;city;length;year;city;...;city`.
    pub fn describe(&self, network: &RoadNetwork) -> String {
        let mut out = self.id.to_string();
        let mut prev: Option<CityId> = None;
        for &city in &self.cities {
            if let Some(p) = prev {
                let road = network.road(p, city);
                debug_assert!(road.is_some_and(|r| !r.deleted), "route {} is broken", self.id);
                if let Some(road) = road {
                    let _ = write!(out, "{SEPARATOR}{}{SEPARATOR}{}", road.length, road.year);
                }
            }
            out.push(SEPARATOR);
            out.push_str(network.city_name(city));
            prev = Some(city);
        }
        out
    }
}
