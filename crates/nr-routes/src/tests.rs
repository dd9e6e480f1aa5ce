//! Unit tests for nr-routes.

#[cfg(test)]
mod helpers {
    use std::collections::HashSet;

    use crate::RoadMap;

    pub fn map(roads: &[(&str, &str, u32, i32)]) -> RoadMap {
        let mut m = RoadMap::new();
        for &(a, b, len, year) in roads {
            m.add_road(a, b, len, year).unwrap();
        }
        m
    }

    /// Every route is loop-free and every hop is a live road.
    pub fn assert_consistent<R: nr_graph::Router>(m: &RoadMap<R>) {
        for id in m.route_ids() {
            let ids = m.route(id.0).unwrap().city_ids();
            assert!(ids.len() >= 2, "route {id} too short");
            let mut seen = HashSet::new();
            for c in &ids {
                assert!(seen.insert(*c), "route {id} repeats {c}");
            }
            for hop in ids.windows(2) {
                let road = m.network().road(hop[0], hop[1]);
                assert!(road.is_some_and(|r| !r.deleted), "route {id} has a broken hop");
            }
        }
    }

    pub fn descriptions<R: nr_graph::Router>(m: &RoadMap<R>) -> Vec<String> {
        m.route_ids().map(|id| m.route_description(id.0)).collect()
    }
}

// ── Roads ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod roads {
    use nr_core::MapError;

    use super::helpers::map;
    use crate::{RoadInfo, RoadMap};

    #[test]
    fn add_road_creates_cities() {
        let m = map(&[("A", "B", 10, 2000)]);
        assert_eq!(m.city_count(), 2);
        assert_eq!(m.road("B", "A"), Some(RoadInfo { length: 10, year: 2000 }));
    }

    #[test]
    fn add_road_rejects_bad_input_without_side_effects() {
        let mut m = RoadMap::new();
        assert_eq!(m.add_road("A", "A", 1, 1), Err(MapError::SameCity("A".into())));
        assert_eq!(m.add_road("A", "B;", 1, 1), Err(MapError::InvalidCityName("B;".into())));
        assert_eq!(m.add_road("A", "B", 0, 1), Err(MapError::ZeroLength));
        assert_eq!(m.add_road("A", "B", 1, 0), Err(MapError::ZeroYear));
        assert_eq!(m.city_count(), 0);
    }

    #[test]
    fn duplicate_road_is_rejected() {
        let mut m = map(&[("A", "B", 10, 2000)]);
        assert_eq!(
            m.add_road("B", "A", 4, 2001),
            Err(MapError::RoadExists("B".into(), "A".into()))
        );
        assert_eq!(m.road("A", "B"), Some(RoadInfo { length: 10, year: 2000 }));
    }

    #[test]
    fn repair_to_older_year_fails() {
        let mut m = map(&[("A", "B", 10, 2000)]);
        assert_eq!(
            m.repair_road("A", "B", 1999),
            Err(MapError::RepairYearTooOld { current: 2000, requested: 1999 })
        );
        assert_eq!(m.road("A", "B").unwrap().year, 2000);
    }

    #[test]
    fn repair_changes_route_description() {
        let mut m = map(&[("A", "B", 10, 2000)]);
        m.new_route(1, "A", "B").unwrap();
        m.repair_road("B", "A", 2020).unwrap();
        assert_eq!(m.route_description(1), "1;A;10;2020;B");
    }

    #[test]
    fn repair_unknown_road() {
        let mut m = map(&[("A", "B", 1, 1), ("C", "D", 1, 1)]);
        assert_eq!(
            m.repair_road("A", "C", 5),
            Err(MapError::RoadNotFound("A".into(), "C".into()))
        );
        assert_eq!(m.repair_road("A", "Q", 5), Err(MapError::CityNotFound("Q".into())));
        assert_eq!(m.repair_road("A", "B", 0), Err(MapError::ZeroYear));
    }
}

// ── new_route ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod new_route {
    use nr_core::{ErrorKind, MapConfig, MapError, RouteId};

    use super::helpers::map;
    use crate::RoadMap;

    #[test]
    fn straight_route_description() {
        let mut m = map(&[("A", "B", 10, 2000), ("B", "C", 10, 2000)]);
        m.new_route(1, "A", "C").unwrap();
        assert_eq!(m.route_description(1), "1;A;10;2000;B;10;2000;C");
        assert_eq!(m.route_cities(1).unwrap(), ["A", "B", "C"]);
    }

    #[test]
    fn equal_length_prefers_newer_oldest_road() {
        let mut m = map(&[
            ("A", "B", 10, 2000),
            ("B", "C", 10, 2000),
            ("A", "C", 20, 1990),
        ]);
        m.new_route(1, "A", "C").unwrap();
        assert_eq!(m.route_description(1), "1;A;10;2000;B;10;2000;C");
    }

    #[test]
    fn indistinguishable_paths_fail() {
        let mut m = map(&[
            ("A", "B", 10, 2000),
            ("B", "C", 10, 2000),
            ("A", "C", 20, 2000),
        ]);
        let err = m.new_route(1, "A", "C").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Ambiguous);
        assert_eq!(m.route_description(1), "");
        assert!(m.route(1).is_none());
    }

    #[test]
    fn unreachable_city_fails() {
        let mut m = map(&[("A", "B", 1, 1), ("C", "D", 1, 1)]);
        assert_eq!(
            m.new_route(1, "A", "D"),
            Err(MapError::NoPath { from: "A".into(), to: "D".into() })
        );
    }

    #[test]
    fn id_checks() {
        let mut m = map(&[("A", "B", 1, 1)]);
        assert_eq!(m.new_route(0, "A", "B"), Err(MapError::RouteIdOutOfRange(0)));
        assert_eq!(m.new_route(1000, "A", "B"), Err(MapError::RouteIdOutOfRange(1000)));
        m.new_route(999, "A", "B").unwrap();
        assert_eq!(m.new_route(999, "B", "A"), Err(MapError::RouteExists(RouteId(999))));
    }

    #[test]
    fn configured_id_range() {
        let mut m = RoadMap::with_config(MapConfig { max_route_id: 2_000, ..MapConfig::default() });
        m.add_road("A", "B", 1, 1).unwrap();
        m.new_route(1_500, "A", "B").unwrap();
        assert_eq!(m.route_description(1_500), "1500;A;1;1;B");
    }

    #[test]
    fn city_checks() {
        let mut m = map(&[("A", "B", 1, 1)]);
        assert_eq!(m.new_route(1, "A", "A"), Err(MapError::SameCity("A".into())));
        assert_eq!(m.new_route(1, "A", "X"), Err(MapError::CityNotFound("X".into())));
        assert_eq!(m.new_route(1, "", "A"), Err(MapError::InvalidCityName(String::new())));
        assert_eq!(m.route_ids().count(), 0);
    }

    #[test]
    fn unknown_route_has_empty_description() {
        let m = RoadMap::new();
        assert_eq!(m.route_description(42), "");
        assert!(m.route_cities(42).is_none());
    }
}

// ── extend_route ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod extend_route {
    use nr_core::{ErrorKind, MapError, RouteId};

    use super::helpers::{assert_consistent, map};

    fn abc() -> crate::RoadMap {
        let mut m = map(&[("A", "B", 10, 2000), ("B", "C", 10, 2000)]);
        m.new_route(1, "A", "C").unwrap();
        m
    }

    #[test]
    fn extends_at_the_end() {
        let mut m = abc();
        m.add_road("C", "D", 7, 1999).unwrap();
        m.extend_route(1, "D").unwrap();
        assert_eq!(m.route_description(1), "1;A;10;2000;B;10;2000;C;7;1999;D");
    }

    #[test]
    fn extends_at_the_start() {
        let mut m = abc();
        m.add_road("Z", "A", 5, 2010).unwrap();
        m.extend_route(1, "Z").unwrap();
        assert_eq!(m.route_description(1), "1;Z;5;2010;A;10;2000;B;10;2000;C");
    }

    #[test]
    fn multi_city_stretch_keeps_its_order() {
        let mut m = abc();
        m.add_road("C", "E", 1, 2000).unwrap();
        m.add_road("E", "F", 1, 2000).unwrap();
        m.extend_route(1, "F").unwrap();
        assert_eq!(m.route_cities(1).unwrap(), ["A", "B", "C", "E", "F"]);

        m.add_road("A", "X", 2, 2000).unwrap();
        m.add_road("X", "Y", 2, 2000).unwrap();
        m.extend_route(1, "Y").unwrap();
        assert_eq!(m.route_cities(1).unwrap(), ["Y", "X", "A", "B", "C", "E", "F"]);
        assert_consistent(&m);
    }

    #[test]
    fn does_not_pass_through_route_interior() {
        let mut m = abc();
        // D is closest to B, but B is inside the route.
        m.add_road("D", "B", 1, 2000).unwrap();
        m.add_road("D", "C", 5, 2000).unwrap();
        m.extend_route(1, "D").unwrap();
        assert_eq!(m.route_description(1), "1;A;10;2000;B;10;2000;C;5;2000;D");
    }

    #[test]
    fn nearer_end_wins() {
        let mut m = abc();
        m.add_road("D", "A", 3, 2000).unwrap();
        m.add_road("D", "C", 4, 2000).unwrap();
        m.extend_route(1, "D").unwrap();
        assert_eq!(m.route_cities(1).unwrap(), ["D", "A", "B", "C"]);
    }

    #[test]
    fn tie_between_ends_fails_unchanged() {
        let mut m = abc();
        m.add_road("D", "A", 3, 2000).unwrap();
        m.add_road("D", "C", 3, 2000).unwrap();
        let before = m.route_description(1);
        let err = m.extend_route(1, "D").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Ambiguous);
        assert_eq!(m.route_description(1), before);
    }

    #[test]
    fn city_already_on_route() {
        let mut m = abc();
        assert_eq!(
            m.extend_route(1, "B"),
            Err(MapError::CityOnRoute { route: RouteId(1), city: "B".into() })
        );
    }

    #[test]
    fn unknown_route_or_city() {
        let mut m = abc();
        m.add_road("P", "Q", 1, 1).unwrap();
        assert_eq!(m.extend_route(7, "P"), Err(MapError::RouteNotFound(RouteId(7))));
        assert_eq!(m.extend_route(1, "W"), Err(MapError::CityNotFound("W".into())));
        assert_eq!(
            m.extend_route(1, "P"),
            Err(MapError::NoPath { from: "P".into(), to: "A".into() })
        );
    }
}

// ── remove_road ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod remove_road {
    use nr_core::{ErrorKind, MapError};

    use super::helpers::{assert_consistent, descriptions, map};
    use crate::Hop;

    #[test]
    fn no_detour_fails_unchanged() {
        let mut m = map(&[("A", "B", 10, 2000), ("B", "C", 10, 2000)]);
        m.new_route(1, "A", "C").unwrap();
        let err = m.remove_road("B", "C").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(m.route_description(1), "1;A;10;2000;B;10;2000;C");
        // The road is back in service, not left soft-deleted.
        assert!(m.road("B", "C").is_some());
        assert!(!m.network().road(
            m.network().find_city("B").unwrap(),
            m.network().find_city("C").unwrap()
        ).unwrap().deleted);
    }

    #[test]
    fn detour_is_spliced_in() {
        let mut m = map(&[
            ("A", "B", 1, 2000),
            ("B", "C", 1, 2000),
            ("B", "E", 2, 2001),
            ("E", "C", 2, 2002),
        ]);
        m.new_route(1, "A", "C").unwrap();
        m.remove_road("C", "B").unwrap();
        assert_eq!(m.route_description(1), "1;A;1;2000;B;2;2001;E;2;2002;C");
        assert!(m.road("B", "C").is_none());
        assert_consistent(&m);
    }

    #[test]
    fn detour_avoids_the_rest_of_the_route() {
        // Without the avoidance rule B→A→D→C would be a detour for B–C.
        let mut m = map(&[
            ("A", "B", 1, 2000),
            ("B", "C", 1, 2000),
            ("A", "D", 1, 2000),
            ("D", "C", 9, 2000),
            ("B", "F", 6, 2000),
            ("F", "C", 6, 2000),
        ]);
        m.new_route(1, "A", "C").unwrap();
        m.remove_road("B", "C").unwrap();
        assert_eq!(m.route_cities(1).unwrap(), ["A", "B", "F", "C"]);
    }

    #[test]
    fn ambiguous_detour_fails_unchanged() {
        let mut m = map(&[
            ("A", "B", 1, 2000),
            ("A", "C", 2, 2000),
            ("C", "B", 2, 2000),
            ("A", "D", 2, 2000),
            ("D", "B", 2, 2000),
        ]);
        m.new_route(1, "A", "B").unwrap();
        let err = m.remove_road("A", "B").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Ambiguous);
        assert_eq!(m.route_description(1), "1;A;1;2000;B");
    }

    #[test]
    fn road_off_every_route_is_just_removed() {
        let mut m = map(&[("A", "B", 1, 2000), ("B", "C", 1, 2000)]);
        m.new_route(1, "A", "B").unwrap();
        m.remove_road("B", "C").unwrap();
        assert!(m.road("B", "C").is_none());
        assert_eq!(m.route_description(1), "1;A;1;2000;B");
    }

    #[test]
    fn input_checks() {
        let mut m = map(&[("A", "B", 1, 2000), ("C", "D", 1, 2000)]);
        assert_eq!(m.remove_road("A", "A"), Err(MapError::SameCity("A".into())));
        assert_eq!(m.remove_road("A", "Q"), Err(MapError::CityNotFound("Q".into())));
        assert_eq!(
            m.remove_road("A", "C"),
            Err(MapError::RoadNotFound("A".into(), "C".into()))
        );
        assert_eq!(m.network().road_count(), 2);
    }

    #[test]
    fn earlier_repairs_roll_back_when_a_later_route_fails() {
        let mut m = map(&[
            ("X", "Y", 1, 2000),
            ("X", "W", 2, 2000),
            ("W", "Y", 2, 2000),
            ("P", "Q", 3, 1990),
        ]);
        // Route 1 can detour through W; route 2 already contains W.
        m.new_route(1, "X", "Y").unwrap();
        m.add_route_from_description(2, "W", &[
            Hop { length: 2, year: 2000, city: "X" },
            Hop { length: 1, year: 2000, city: "Y" },
        ])
        .unwrap();
        m.new_route(3, "P", "Q").unwrap();
        let before = descriptions(&m);

        let err = m.remove_road("X", "Y").unwrap_err();
        assert_eq!(err, MapError::NoPath { from: "X".into(), to: "Y".into() });
        assert_eq!(descriptions(&m), before);
        assert!(m.road("X", "Y").is_some());
        assert_consistent(&m);

        // Without route 2 the same removal goes through.
        m.remove_route(2).unwrap();
        m.remove_road("X", "Y").unwrap();
        assert_eq!(m.route_description(1), "1;X;2;2000;W;2;2000;Y");
    }

    #[test]
    fn several_routes_repaired_together() {
        let mut m = map(&[
            ("A", "B", 1, 2000),
            ("B", "C", 1, 2000),
            ("C", "D", 1, 2000),
            ("B", "E", 1, 2001),
            ("E", "C", 1, 2001),
        ]);
        m.new_route(1, "A", "C").unwrap();
        m.new_route(2, "B", "D").unwrap();
        m.remove_road("B", "C").unwrap();
        assert_eq!(m.route_cities(1).unwrap(), ["A", "B", "E", "C"]);
        assert_eq!(m.route_cities(2).unwrap(), ["B", "E", "C", "D"]);
        assert_consistent(&m);
    }
}

// ── add_route_from_description / remove_route ─────────────────────────────────

#[cfg(test)]
mod described_routes {
    use nr_core::{MapError, RouteId};

    use super::helpers::map;
    use crate::{Hop, RoadInfo, RoadMap};

    fn hop(length: u32, year: i32, city: &str) -> Hop<'_> {
        Hop { length, year, city }
    }

    #[test]
    fn creates_cities_and_roads() {
        let mut m = RoadMap::new();
        m.add_route_from_description(7, "A", &[hop(3, 1999, "B"), hop(4, -20, "C")])
            .unwrap();
        assert_eq!(m.route_description(7), "7;A;3;1999;B;4;-20;C");
        assert_eq!(m.road("C", "B"), Some(RoadInfo { length: 4, year: -20 }));
        assert_eq!(m.city_count(), 3);
    }

    #[test]
    fn repairs_existing_roads() {
        let mut m = map(&[("A", "B", 3, 1990)]);
        m.add_route_from_description(1, "A", &[hop(3, 2005, "B")]).unwrap();
        assert_eq!(m.road("A", "B"), Some(RoadInfo { length: 3, year: 2005 }));
    }

    #[test]
    fn conflicting_descriptions_change_nothing() {
        let mut m = map(&[("A", "B", 3, 1990)]);
        assert!(matches!(
            m.add_route_from_description(1, "A", &[hop(4, 2000, "B")]),
            Err(MapError::LengthMismatch { stored: 3, given: 4, .. })
        ));
        assert_eq!(
            m.add_route_from_description(1, "N", &[hop(1, 1, "A"), hop(3, 1980, "B")]),
            Err(MapError::RepairYearTooOld { current: 1990, requested: 1980 })
        );
        assert_eq!(
            m.add_route_from_description(1, "A", &[hop(1, 1, "N"), hop(1, 1, "A")]),
            Err(MapError::RepeatedCity("A".into()))
        );
        assert_eq!(
            m.add_route_from_description(1, "A", &[]),
            Err(MapError::MalformedRoute("a route needs at least two cities".into()))
        );
        assert_eq!(
            m.add_route_from_description(0, "A", &[hop(1, 1, "N")]),
            Err(MapError::RouteIdOutOfRange(0))
        );
        assert_eq!(m.city_count(), 2);
        assert_eq!(m.road("A", "B"), Some(RoadInfo { length: 3, year: 1990 }));
        assert!(m.route(1).is_none());
    }

    #[test]
    fn existing_id_is_rejected() {
        let mut m = map(&[("A", "B", 3, 1990)]);
        m.new_route(5, "A", "B").unwrap();
        assert_eq!(
            m.add_route_from_description(5, "B", &[hop(1, 1, "C")]),
            Err(MapError::RouteExists(RouteId(5)))
        );
    }

    #[test]
    fn remove_route_keeps_roads() {
        let mut m = map(&[("A", "B", 3, 1990)]);
        m.new_route(5, "A", "B").unwrap();
        m.remove_route(5).unwrap();
        assert_eq!(m.route_description(5), "");
        assert!(m.road("A", "B").is_some());
        assert_eq!(m.remove_route(5), Err(MapError::RouteNotFound(RouteId(5))));
    }
}

// ── Router seam ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod router_seam {
    use nr_core::{CityId, MapConfig, MapResult};
    use nr_graph::{PathQuery, RoadNetwork, Router, UniqueDijkstra};

    use crate::RoadMap;

    /// Counts searches while delegating to the real engine.
    #[derive(Default)]
    struct Counting {
        inner:    UniqueDijkstra,
        searches: usize,
    }

    impl Router for Counting {
        fn find_path(&mut self, network: &RoadNetwork, query: &PathQuery<'_>) -> MapResult<Vec<CityId>> {
            self.searches += 1;
            self.inner.find_path(network, query)
        }
    }

    #[test]
    fn only_affected_routes_are_searched() {
        let mut m = RoadMap::with_router(MapConfig::default(), Counting::default());
        m.add_road("A", "B", 1, 2000).unwrap();
        m.add_road("B", "C", 1, 2000).unwrap();
        m.add_road("C", "D", 1, 2000).unwrap();
        m.add_road("D", "A", 5, 2000).unwrap();
        m.new_route(1, "A", "B").unwrap();
        m.new_route(2, "C", "D").unwrap();
        assert_eq!(m.router.searches, 2);

        // A–B lies on route 1 only.
        m.remove_road("A", "B").unwrap();
        assert_eq!(m.router.searches, 3);
        assert_eq!(m.route_cities(1).unwrap(), ["A", "D", "C", "B"]);
        assert_eq!(m.route_cities(2).unwrap(), ["C", "D"]);
    }
}

// ── Randomised edit sequences ─────────────────────────────────────────────────

#[cfg(test)]
mod random_edits {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::helpers::{assert_consistent, descriptions};
    use crate::RoadMap;

    const CITIES: [&str; 6] = ["Kraków", "Tarnów", "Rzeszów", "Kielce", "Radom", "Lublin"];

    #[derive(Clone, Debug)]
    enum Op {
        Add(usize, usize, u32, i32),
        Repair(usize, usize, i32),
        New(u32, usize, usize),
        Extend(u32, usize),
        Remove(usize, usize),
    }

    fn random_op(rng: &mut SmallRng) -> Op {
        let a = rng.gen_range(0..CITIES.len());
        let b = rng.gen_range(0..CITIES.len());
        match rng.gen_range(0..10) {
            0..=3 => Op::Add(a, b, rng.gen_range(1..=4), rng.gen_range(1990..=1994)),
            4 => Op::Repair(a, b, rng.gen_range(1990..=1996)),
            5 | 6 => Op::New(rng.gen_range(1..=4), a, b),
            7 => Op::Extend(rng.gen_range(1..=4), a),
            _ => Op::Remove(a, b),
        }
    }

    fn apply(m: &mut RoadMap, op: &Op) -> bool {
        let r = match *op {
            Op::Add(a, b, len, year) => m.add_road(CITIES[a], CITIES[b], len, year),
            Op::Repair(a, b, year) => m.repair_road(CITIES[a], CITIES[b], year),
            Op::New(id, a, b) => m.new_route(id, CITIES[a], CITIES[b]),
            Op::Extend(id, a) => m.extend_route(id, CITIES[a]),
            Op::Remove(a, b) => m.remove_road(CITIES[a], CITIES[b]),
        };
        r.is_ok()
    }

    #[test]
    fn failed_edits_change_nothing_and_routes_stay_valid() {
        let mut rng = SmallRng::seed_from_u64(2019);
        for _ in 0..40 {
            let mut m = RoadMap::new();
            let mut ops = Vec::new();
            for _ in 0..60 {
                let op = random_op(&mut rng);
                let before = descriptions(&m);
                let roads_before = m.network().road_count();
                if !apply(&mut m, &op) {
                    assert_eq!(descriptions(&m), before, "failed {op:?} changed a route");
                    assert_eq!(m.network().road_count(), roads_before);
                }
                assert_consistent(&m);
                ops.push(op);
            }

            // Same edits, same outcome.
            let mut replay = RoadMap::new();
            for op in &ops {
                apply(&mut replay, op);
            }
            assert_eq!(descriptions(&replay), descriptions(&m));
        }
    }
}
