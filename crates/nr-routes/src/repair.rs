//! Road removal with all-or-nothing route repair.
//!
//! # Protocol
//!
//! ```text
//! ① Stage    — soft-delete the road so searches no longer see it.
//! ② Repair   — for every route (ascending id) that uses the road, find the
//!              unique best detour between the road's ends that avoids the
//!              rest of the route, splice it in, and log the spliced slots.
//! ③ Commit   — all repairs succeeded: unlink the road for good.
//!    Abort   — some route has no unique detour: erase every logged splice
//!              in reverse order and clear the soft-delete flag.
//! ```
//!
//! After an abort every route is node-for-node what it was before the call.

use std::collections::BTreeMap;

use log::debug;

use nr_core::{CityId, MapError, MapResult, RouteId};
use nr_graph::{PathQuery, RoadNetwork, Router, Sequence, Slot};

use crate::map::RoadMap;
use crate::route::Route;

/// Cities spliced into one route by one repair.
struct Patch {
    route: RouteId,
    slots: Vec<Slot>,
}

/// Undo log of a removal in progress.
#[derive(Default)]
struct RepairLog {
    patches: Vec<Patch>,
}

impl RepairLog {
    fn record(&mut self, patch: Patch) {
        self.patches.push(patch);
    }

    /// Erase every logged splice, newest first.
    fn roll_back(self, routes: &mut BTreeMap<RouteId, Route>) {
        for patch in self.patches.into_iter().rev() {
            let Some(route) = routes.get_mut(&patch.route) else { continue };
            for slot in patch.slots {
                route.cities_mut().erase(slot);
            }
        }
    }
}

impl<R: Router> RoadMap<R> {
    /// Remove the road between two cities, rerouting every route that used
    /// it.
    ///
    /// # Errors
    ///
    /// Invalid names, unknown cities or road, or the first route (by id)
    /// for which no unique detour exists.  On error nothing has changed.
    pub fn remove_road(&mut self, city1: &str, city2: &str) -> MapResult<()> {
        let (a, b) = self.require_pair(city1, city2)?;
        if self.network.road(a, b).is_none() {
            return Err(MapError::RoadNotFound(city1.to_owned(), city2.to_owned()));
        }

        // ① Stage
        self.network.set_deleted(a, b, true)?;

        // ② Repair
        let mut log = RepairLog::default();
        let mut failure = None;
        for route in self.routes.values_mut() {
            match reroute(&self.network, &mut self.router, route, a, b) {
                Ok(Some(patch)) => log.record(patch),
                Ok(None) => {}
                Err(e) => {
                    failure = Some((route.id(), e));
                    break;
                }
            }
        }

        // ③ Abort
        if let Some((blocking, err)) = failure {
            let rolled_back = log.patches.len();
            log.roll_back(&mut self.routes);
            self.network.set_deleted(a, b, false)?;
            debug!(
                "removal of {city1} - {city2} blocked by route {blocking}; {rolled_back} repaired routes rolled back"
            );
            return Err(err);
        }

        // ③ Commit
        let repaired = log.patches.len();
        self.network.unlink_road(a, b)?;
        debug!("road {city1} - {city2} removed; {repaired} routes rerouted");
        Ok(())
    }
}

/// Replace the `a`–`b` hop of `route`, if it has one, by the best detour.
fn reroute<R: Router>(
    network: &RoadNetwork,
    router:  &mut R,
    route:   &mut Route,
    a:       CityId,
    b:       CityId,
) -> MapResult<Option<Patch>> {
    let Some((first, second)) = route.adjacent_slots(a, b) else {
        return Ok(None);
    };
    let (from, to) = match (route.cities().get(first), route.cities().get(second)) {
        (Some(&f), Some(&t)) => (f, t),
        _ => return Ok(None),
    };

    let avoid = route.city_ids();
    let path = router.find_path(network, &PathQuery::new(from, to).avoiding(&avoid))?;

    // Keep only the interior: both ends are already on the route.
    let interior = path.len().saturating_sub(1);
    let mut detour: Sequence<CityId> = path.into_iter().take(interior).skip(1).collect();
    let slots = route.cities_mut().splice_before(second, &mut detour);
    debug!("route {} rerouted through {} new cities", route.id(), slots.len());
    Ok(Some(Patch { route: route.id(), slots }))
}
