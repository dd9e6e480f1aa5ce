//! Routing trait and the default two-pass Dijkstra implementation.
//!
//! # Path order
//!
//! Paths are ranked by total length; among paths of equal length the one
//! whose oldest road (minimum build/repair year) is newest wins.  A query
//! succeeds only if exactly one path attains the best rank; two or more
//! equally good paths make the query [`MapError::AmbiguousPath`].
//!
//! # Two passes
//!
//! A single Dijkstra run over `(distance, oldest_road)` labels finds the best
//! rank but cannot count optimal paths: a prefix discarded for having an
//! older road may still tie once a later, even older road dominates both
//! branches.  So:
//!
//! 1. **Rank pass** — Dijkstra over full [`PathKey`]s yields the best rank
//!    `(D, Y)` at the target.
//! 2. **Count pass** — Dijkstra by distance alone over roads with year ≥ `Y`.
//!    Every path in that subgraph has oldest road ≥ `Y`, so the optimal paths
//!    are exactly its shortest paths, of length `D`.  The `unequivocal` flag
//!    is copied along strictly improving relaxations and cleared by equal
//!    ones, which marks a city exactly when it has one shortest path.

use log::trace;

use nr_core::{CityId, MapError, MapResult};

use crate::network::RoadNetwork;
use crate::queue::{PathKey, PathQueue};

// ── PathQuery ─────────────────────────────────────────────────────────────────

/// One path-search request.
#[derive(Clone, Debug)]
pub struct PathQuery<'a> {
    pub from:   CityId,
    pub to:     CityId,
    /// Second acceptable target; the better-ranked of `to`/`alt_to` wins and
    /// a tie between them is ambiguous.
    pub alt_to: Option<CityId>,
    /// Cities the path may not pass through, unless they are `from`, `to`,
    /// or `alt_to`.
    pub avoid:  &'a [CityId],
}

impl<'a> PathQuery<'a> {
    pub fn new(from: CityId, to: CityId) -> Self {
        Self { from, to, alt_to: None, avoid: &[] }
    }

    pub fn or_to(mut self, alt_to: CityId) -> Self {
        self.alt_to = Some(alt_to).filter(|&c| c != self.to);
        self
    }

    pub fn avoiding(mut self, avoid: &'a [CityId]) -> Self {
        self.avoid = avoid;
        self
    }

    #[inline]
    fn is_target(&self, city: CityId) -> bool {
        city == self.to || self.alt_to == Some(city)
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable path engine used by route maintenance.
///
/// `find_path` takes `&mut self` so an implementation can keep per-search
/// scratch state; the borrow also guarantees searches never interleave.
pub trait Router {
    /// Find the unique best path for `query`.
    ///
    /// On success returns the cities of the path in order, from
    /// `query.from` to whichever target was reached, both inclusive.
    ///
    /// # Errors
    ///
    /// [`MapError::NoPath`] if no target is reachable,
    /// [`MapError::AmbiguousPath`] if the best path is not unique.
    fn find_path(&mut self, network: &RoadNetwork, query: &PathQuery<'_>) -> MapResult<Vec<CityId>>;
}

// ── SearchContext ─────────────────────────────────────────────────────────────

/// Which roads a pass may use and how it ranks paths.
#[derive(Copy, Clone, Debug)]
enum Pass {
    Rank,
    /// Only roads built or repaired in this year or later; rank by distance.
    Count { min_year: i64 },
}

/// Per-city labels of one search, held outside the network.
///
/// Arrays are dense over `CityId` and reset at the start of every pass.
#[derive(Default)]
pub struct SearchContext {
    key:         Vec<PathKey>,
    unequivocal: Vec<bool>,
    previous:    Vec<CityId>,
    blocked:     Vec<bool>,
    queue:       PathQueue,
    settled:     usize,
}

impl SearchContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self, city_count: usize, query: &PathQuery<'_>) {
        self.key.clear();
        self.key.resize(city_count, PathKey::UNREACHED);
        self.unequivocal.clear();
        self.unequivocal.resize(city_count, false);
        self.previous.clear();
        self.previous.resize(city_count, CityId::INVALID);
        self.blocked.clear();
        self.blocked.resize(city_count, false);
        for &c in query.avoid {
            self.blocked[c.index()] = true;
        }
        self.blocked[query.from.index()] = false;
        self.blocked[query.to.index()] = false;
        if let Some(alt) = query.alt_to {
            self.blocked[alt.index()] = false;
        }
        self.queue.clear();
        self.settled = 0;
    }

    fn run(&mut self, network: &RoadNetwork, query: &PathQuery<'_>, pass: Pass) {
        self.reset(network.city_count(), query);

        let start = match pass {
            Pass::Rank => PathKey::START,
            Pass::Count { .. } => PathKey::by_distance(0),
        };
        self.key[query.from.index()] = start;
        self.unequivocal[query.from.index()] = true;
        self.queue.push(start, query.from);

        // No early exit: the queue is drained so every tie at the targets is seen.
        while let Some((key, city)) = self.queue.pop() {
            // Skip stale entries.
            if key != self.key[city.index()] {
                continue;
            }
            self.settled += 1;

            // Targets are route ends; a path may stop there but not pass through.
            if city != query.from && query.is_target(city) {
                continue;
            }

            for road in network.roads(city) {
                if road.deleted || self.blocked[road.to.index()] {
                    continue;
                }
                let candidate = match pass {
                    Pass::Rank => key.extend(road.length, road.year),
                    Pass::Count { min_year } => {
                        if (road.year as i64) < min_year {
                            continue;
                        }
                        PathKey::by_distance(key.distance + road.length as i64)
                    }
                };

                let next = road.to.index();
                match candidate.cmp(&self.key[next]) {
                    std::cmp::Ordering::Less => {
                        self.key[next] = candidate;
                        self.unequivocal[next] = self.unequivocal[city.index()];
                        self.previous[next] = city;
                        self.queue.push(candidate, road.to);
                    }
                    std::cmp::Ordering::Equal => self.unequivocal[next] = false,
                    std::cmp::Ordering::Greater => {}
                }
            }
        }
    }

    /// Walk `previous` links back from `target` to the origin.
    fn reconstruct(&self, from: CityId, target: CityId) -> Vec<CityId> {
        let mut path = vec![target];
        let mut cur = target;
        while cur != from {
            let prev = self.previous[cur.index()];
            if !prev.is_valid() {
                break;
            }
            cur = prev;
            path.push(cur);
        }
        debug_assert_eq!(cur, from, "previous links must lead back to the origin");
        path.reverse();
        path
    }
}

// ── UniqueDijkstra ────────────────────────────────────────────────────────────

/// Two-pass Dijkstra that succeeds only on a unique best path.
#[derive(Default)]
pub struct UniqueDijkstra {
    ctx: SearchContext,
}

impl UniqueDijkstra {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Router for UniqueDijkstra {
    fn find_path(&mut self, network: &RoadNetwork, query: &PathQuery<'_>) -> MapResult<Vec<CityId>> {
        let no_path = || MapError::NoPath {
            from: network.city_name(query.from).to_owned(),
            to:   network.city_name(query.to).to_owned(),
        };
        let ambiguous = || MapError::AmbiguousPath {
            from: network.city_name(query.from).to_owned(),
            to:   network.city_name(query.to).to_owned(),
        };

        if query.is_target(query.from) {
            return Err(no_path());
        }

        // ── Rank pass ─────────────────────────────────────────────────────
        self.ctx.run(network, query, Pass::Rank);
        let rank_settled = self.ctx.settled;

        let mut target = query.to;
        if let Some(alt) = query.alt_to {
            match self.ctx.key[alt.index()].cmp(&self.ctx.key[target.index()]) {
                std::cmp::Ordering::Less => target = alt,
                std::cmp::Ordering::Equal if self.ctx.key[alt.index()].is_reached() => {
                    return Err(ambiguous());
                }
                _ => {}
            }
        }
        let best = self.ctx.key[target.index()];
        if !best.is_reached() {
            return Err(no_path());
        }

        // ── Count pass ────────────────────────────────────────────────────
        self.ctx.run(network, query, Pass::Count { min_year: best.oldest_road });
        trace!(
            "path {} -> {}: distance {}, oldest road {}, settled {}+{}",
            network.city_name(query.from),
            network.city_name(target),
            best.distance,
            best.oldest_road,
            rank_settled,
            self.ctx.settled,
        );
        debug_assert_eq!(self.ctx.key[target.index()].distance, best.distance);

        if !self.ctx.unequivocal[target.index()] {
            return Err(ambiguous());
        }
        Ok(self.ctx.reconstruct(query.from, target))
    }
}
