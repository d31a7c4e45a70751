// src/generator/connector.rs
//! Lane topology: decides which zone pairs get a corridor.
//!
//! The lane count parsed from the connectivity style selects one of three
//! wiring rules (2, 3, or 4+ lanes). Mid areas are first linked to each other.
//! Roles missing from the zone table are skipped, never treated as errors.

use crate::generator::router::CorridorRouter;
use crate::map::{Grid, Team, Zone, ZoneTable};
use crate::spec::{Connectivity, SightlineControl};
use log::{debug, info};
use rand::Rng;

/// Each zone links to at most this many nearby mid areas.
const NEAREST_MIDS: usize = 2;

/// Chance of an extra direct site-to-site link on three-lane maps.
const THREE_LANE_SITE_LINK_CHANCE: f64 = 0.3;

/// A corridor that was requested between two named zones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub from: String,
    pub to: String,
    /// Cells newly stamped for this corridor.
    pub cells: usize,
}

impl Connection {
    /// True if this connection joins `a` and `b`, in either direction.
    pub fn joins(&self, a: &str, b: &str) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

/// The zone among `targets` whose center is closest (Manhattan) to `from`.
/// Ties keep the earlier target.
pub fn find_closest<'z>(from: &Zone, targets: &[&'z Zone]) -> Option<&'z Zone> {
    find_n_closest(from, targets, 1).into_iter().next()
}

/// Up to `n` targets ordered by center distance from `from`, ties kept in
/// table order.
pub fn find_n_closest<'z>(from: &Zone, targets: &[&'z Zone], n: usize) -> Vec<&'z Zone> {
    let mut ranked: Vec<(i32, &'z Zone)> = targets
        .iter()
        .map(|z| (from.bounds.center_distance(&z.bounds), *z))
        .collect();
    ranked.sort_by_key(|(d, _)| *d);
    ranked.into_iter().take(n).map(|(_, z)| z).collect()
}

struct Wiring<'a, 'g, R: Rng> {
    router: CorridorRouter<'g, R>,
    width: i32,
    max_segment: i32,
    made: &'a mut Vec<Connection>,
}

impl<'a, 'g, R: Rng> Wiring<'a, 'g, R> {
    fn link(&mut self, a: &Zone, b: &Zone) {
        debug!("Connecting {} -> {}", a.name, b.name);
        let cells = self.router.route(&a.bounds, &b.bounds, self.width, self.max_segment);
        self.made.push(Connection {
            from: a.name.clone(),
            to: b.name.clone(),
            cells,
        });
    }

    fn link_nearest(&mut self, from: &Zone, targets: &[&Zone], n: usize) {
        for target in find_n_closest(from, targets, n) {
            self.link(from, target);
        }
    }
}

/// Links every mid area to its nearest other mids, each unordered pair once.
/// Pairs are discovered in table order.
fn mid_network_pairs(mids: &[&Zone]) -> Vec<(usize, usize)> {
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    for (i, mid) in mids.iter().enumerate() {
        let others: Vec<&Zone> = mids
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, m)| *m)
            .collect();
        for close in find_n_closest(mid, &others, NEAREST_MIDS) {
            let Some(j) = mids.iter().position(|m| m.name == close.name) else {
                continue;
            };
            let pair = (i.min(j), i.max(j));
            if !pairs.contains(&pair) {
                pairs.push(pair);
            }
        }
    }
    pairs
}

/// Routes every corridor the lane topology calls for.
///
/// Returns the connections in the order they were drawn.
pub fn connect_zones<R: Rng>(
    grid: &mut Grid,
    zones: &ZoneTable,
    connectivity: &Connectivity,
    sightline: &SightlineControl,
    rng: &mut R,
) -> Vec<Connection> {
    let lanes = connectivity.lane_count();
    let t_spawn = zones.spawn(Team::T);
    let ct_spawn = zones.spawn(Team::CT);
    let sites = zones.sites();
    let mids = zones.mids();
    info!(
        "Connecting zones: {} lanes, width {}, segment limit {}, T={} CT={} sites={} mids={}",
        lanes,
        connectivity.max_chokepoint_width,
        sightline.segment_limit(),
        t_spawn.is_some(),
        ct_spawn.is_some(),
        sites.len(),
        mids.len()
    );

    let mut made = Vec::new();
    let mut wiring = Wiring {
        router: CorridorRouter::new(grid, rng),
        width: connectivity.max_chokepoint_width,
        max_segment: sightline.segment_limit(),
        made: &mut made,
    };

    if mids.len() > 1 {
        for (i, j) in mid_network_pairs(&mids) {
            wiring.link(mids[i], mids[j]);
        }
    }

    match lanes {
        2 => {
            for site in &sites {
                if let Some(t) = t_spawn {
                    wiring.link(t, site);
                }
                if let Some(ct) = ct_spawn {
                    wiring.link(site, ct);
                }
            }
        }
        3 => {
            for site in &sites {
                if let Some(t) = t_spawn {
                    wiring.link(t, site);
                }
                if let Some(ct) = ct_spawn {
                    wiring.link(ct, site);
                }
            }
            if !mids.is_empty() {
                for spawn in [t_spawn, ct_spawn].into_iter().flatten() {
                    if let Some(mid) = find_closest(spawn, &mids) {
                        wiring.link(spawn, mid);
                    }
                }
                for site in &sites {
                    wiring.link_nearest(site, &mids, NEAREST_MIDS);
                }
            }
            if sites.len() >= 2 && wiring.router.chance(THREE_LANE_SITE_LINK_CHANCE) {
                debug!("Adding extra link between {} and {}", sites[0].name, sites[1].name);
                wiring.link(sites[0], sites[1]);
            }
        }
        n if n >= 4 => {
            for spawn in [t_spawn, ct_spawn].into_iter().flatten() {
                for site in &sites {
                    wiring.link(spawn, site);
                }
                wiring.link_nearest(spawn, &mids, NEAREST_MIDS);
            }
            for (i, a) in sites.iter().enumerate() {
                for b in sites.iter().skip(i + 1) {
                    wiring.link(a, b);
                }
            }
            for site in &sites {
                wiring.link_nearest(site, &mids, NEAREST_MIDS);
            }
        }
        other => debug!("No lane backbone for a {}-lane style", other),
    }

    info!("Total connections created: {}", made.len());
    made
}
