//! Mutable road network: an arena of cities with per-city adjacency lists.
//!
//! # Data layout
//!
//! Cities are stored in a `Vec` indexed by [`CityId`] and looked up by name
//! through an `FxHashMap`.  Cities are never removed, so handles stay valid
//! for the lifetime of the network.
//!
//! Each undirected road is materialised as two directed [`Road`] records, one
//! in each endpoint's adjacency [`Sequence`].  Every mutator updates both
//! records together so `length`, `year`, and `deleted` never disagree.
//!
//! # Soft deletion
//!
//! [`set_deleted`](RoadNetwork::set_deleted) hides a road from path search
//! without unlinking it.  Removal of a road used by routes stages the
//! deletion this way, so the road can be restored if a route cannot be
//! repaired.

use rustc_hash::FxHashMap;

use nr_core::{validate_city_name, CityId, MapError, MapResult};

use crate::sequence::{Sequence, Slot};

// ── Road / City ───────────────────────────────────────────────────────────────

/// One direction of an undirected road, stored in the source city's list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Road {
    /// The other endpoint.
    pub to:       CityId,
    /// Length in kilometres; always positive.
    pub length:   u32,
    /// Year of construction or of the latest repair; never zero.
    pub year:     i32,
    /// Hidden from path search while a removal is being staged.
    pub deleted:  bool,
}

#[derive(Debug)]
pub struct City {
    pub name:  String,
    pub roads: Sequence<Road>,
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RoadNetwork {
    cities:     Vec<City>,
    by_name:    FxHashMap<String, CityId>,
    road_count: usize,
}

impl RoadNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Number of undirected roads, soft-deleted ones included.
    pub fn road_count(&self) -> usize {
        self.road_count
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    // ── Cities ────────────────────────────────────────────────────────────

    pub fn find_city(&self, name: &str) -> Option<CityId> {
        self.by_name.get(name).copied()
    }

    /// Like [`find_city`](Self::find_city) but fails with
    /// [`MapError::CityNotFound`].
    pub fn require_city(&self, name: &str) -> MapResult<CityId> {
        self.find_city(name)
            .ok_or_else(|| MapError::CityNotFound(name.to_owned()))
    }

    /// Return the handle of `name`, creating the city if it does not exist.
    pub fn insert_city(&mut self, name: &str) -> MapResult<CityId> {
        if let Some(id) = self.find_city(name) {
            return Ok(id);
        }
        validate_city_name(name)?;
        let id = CityId(self.cities.len() as u32);
        self.cities.push(City { name: name.to_owned(), roads: Sequence::new() });
        self.by_name.insert(name.to_owned(), id);
        Ok(id)
    }

    #[inline]
    pub fn city(&self, id: CityId) -> &City {
        &self.cities[id.index()]
    }

    #[inline]
    pub fn city_name(&self, id: CityId) -> &str {
        &self.cities[id.index()].name
    }

    pub fn city_ids(&self) -> impl Iterator<Item = CityId> + '_ {
        (0..self.cities.len()).map(|i| CityId(i as u32))
    }

    // ── Roads ─────────────────────────────────────────────────────────────

    /// Iterator over the road records leaving `city`, soft-deleted included.
    #[inline]
    pub fn roads(&self, city: CityId) -> impl Iterator<Item = &Road> + '_ {
        self.cities[city.index()].roads.iter()
    }

    /// The road from `a` to `b`, soft-deleted or not.
    pub fn road(&self, a: CityId, b: CityId) -> Option<&Road> {
        self.roads(a).find(|r| r.to == b)
    }

    fn road_slot(&self, a: CityId, b: CityId) -> Option<Slot> {
        self.cities[a.index()].roads.find_slot(|r| r.to == b)
    }

    /// Apply `f` to both directed records of the road `a`–`b`.
    fn update_both<F: FnMut(&mut Road)>(&mut self, a: CityId, b: CityId, mut f: F) -> MapResult<()> {
        let fwd = self.road_slot(a, b).ok_or_else(|| self.road_not_found(a, b))?;
        let bwd = self.road_slot(b, a).ok_or_else(|| self.road_not_found(b, a))?;
        for (city, slot) in [(a, fwd), (b, bwd)] {
            if let Some(road) = self.cities[city.index()].roads.get_mut(slot) {
                f(road);
            }
        }
        Ok(())
    }

    fn road_not_found(&self, a: CityId, b: CityId) -> MapError {
        MapError::RoadNotFound(self.city_name(a).to_owned(), self.city_name(b).to_owned())
    }

    /// Add the undirected road `a`–`b`.
    ///
    /// # Errors
    ///
    /// `SameCity` for a loop, `ZeroLength`/`ZeroYear` for degenerate values,
    /// `RoadExists` if the two cities are already connected.
    pub fn add_road(&mut self, a: CityId, b: CityId, length: u32, year: i32) -> MapResult<()> {
        if a == b {
            return Err(MapError::SameCity(self.city_name(a).to_owned()));
        }
        if length == 0 {
            return Err(MapError::ZeroLength);
        }
        if year == 0 {
            return Err(MapError::ZeroYear);
        }
        if self.road(a, b).is_some() {
            return Err(MapError::RoadExists(
                self.city_name(a).to_owned(),
                self.city_name(b).to_owned(),
            ));
        }
        self.cities[a.index()]
            .roads
            .push_front(Road { to: b, length, year, deleted: false });
        self.cities[b.index()]
            .roads
            .push_front(Road { to: a, length, year, deleted: false });
        self.road_count += 1;
        Ok(())
    }

    /// Record a repair of `a`–`b` in `year`.
    ///
    /// # Errors
    ///
    /// `ZeroYear`, `RoadNotFound`, or `RepairYearTooOld` if `year` predates
    /// the recorded build/repair year.  Repairing in the same year is allowed.
    pub fn repair_road(&mut self, a: CityId, b: CityId, year: i32) -> MapResult<()> {
        if year == 0 {
            return Err(MapError::ZeroYear);
        }
        let current = self.road(a, b).ok_or_else(|| self.road_not_found(a, b))?.year;
        if year < current {
            return Err(MapError::RepairYearTooOld { current, requested: year });
        }
        self.update_both(a, b, |r| r.year = year)
    }

    /// Set the soft-delete flag of `a`–`b` on both directions.
    pub fn set_deleted(&mut self, a: CityId, b: CityId, deleted: bool) -> MapResult<()> {
        self.update_both(a, b, |r| r.deleted = deleted)
    }

    /// Physically unlink `a`–`b` from both adjacency lists and return the
    /// removed record (as seen from `a`).
    pub fn unlink_road(&mut self, a: CityId, b: CityId) -> MapResult<Road> {
        let fwd = self.road_slot(a, b).ok_or_else(|| self.road_not_found(a, b))?;
        let bwd = self.road_slot(b, a).ok_or_else(|| self.road_not_found(b, a))?;
        let (road, _) = self.cities[a.index()]
            .roads
            .remove(fwd)
            .ok_or_else(|| self.road_not_found(a, b))?;
        self.cities[b.index()].roads.erase(bwd);
        self.road_count -= 1;
        Ok(road)
    }
}
