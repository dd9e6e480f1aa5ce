//! Road-map configuration.

// ── MapConfig ─────────────────────────────────────────────────────────────────

/// Tunable limits of a road map.
///
/// Typically left at its defaults; the text interface lets the user widen the
/// route-id range on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapConfig {
    /// Smallest accepted route id (inclusive).  Default: 1.
    pub min_route_id: u32,

    /// Largest accepted route id (inclusive).  Default: 999.
    pub max_route_id: u32,
}

impl MapConfig {
    /// `true` if `id` lies in `min_route_id ..= max_route_id`.
    #[inline]
    pub fn accepts_route_id(&self, id: u32) -> bool {
        (self.min_route_id..=self.max_route_id).contains(&id)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self { min_route_id: 1, max_route_id: 999 }
    }
}
