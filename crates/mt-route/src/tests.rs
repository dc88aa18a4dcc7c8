//! Unit and property tests for mt-route.
//!
//! Property tests use seeded `SmallRng` graphs so every run sees the same
//! instances.

#[cfg(test)]
mod helpers {
    use std::cmp::Reverse;
    use std::collections::BinaryHeap;

    use mt_core::{GeoPoint, NodeId};
    use mt_graph::{Blockades, Chokepoint, Edge, GraphBuilder, GraphIndex, LaneKind};
    use ordered_float::OrderedFloat;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::DelayPenalties;

    /// N1 - N2 - N3 along the equator; L2 passes "Strait" and its geometry
    /// is stored end-to-start.  Port PM sits on the middle node.
    pub const LINE_JSON: &str = r#"{
        "nodes": {
            "N1": { "lat": 0.0, "lon": 0.0 },
            "N2": { "lat": 0.0, "lon": 1.0 },
            "N3": { "lat": 0.0, "lon": 2.0 }
        },
        "edges": [
            { "source": "N1", "target": "N2", "dist_km": 100.0,
              "geometry": [[0.0, 0.0], [0.5, 0.0], [1.0, 0.0]],
              "chokepoints": [], "lane_id": "L1" },
            { "source": "N2", "target": "N3", "dist_km": 100.0,
              "geometry": [[2.0, 0.0], [1.0, 0.0]],
              "chokepoints": ["Strait"], "lane_id": "L2" }
        ],
        "ports": {
            "PA": { "name": "Alpha", "lat": 0.0, "lon": 0.0, "node_id": "N1" },
            "PM": { "name": "Mid",   "lat": 0.0, "lon": 1.0, "node_id": "N2" },
            "PB": { "name": "Bravo", "lat": 0.0, "lon": 2.0, "node_id": "N3" }
        },
        "chokepoints": { "Strait": { "lat": 0.0, "lon": 1.5 } }
    }"#;

    pub fn line() -> GraphIndex {
        GraphIndex::from_json_str(LINE_JSON).unwrap()
    }

    /// A → D by a short northern pair of lanes through "North", or a
    /// longer southern pair with no chokepoint.
    pub fn diamond() -> GraphIndex {
        let mut b = GraphBuilder::new();
        let a = b.add_node("A", GeoPoint::new(0.0, 0.0));
        let n = b.add_node("B", GeoPoint::new(1.0, 1.0));
        let s = b.add_node("C", GeoPoint::new(-1.0, 1.0));
        let d = b.add_node("D", GeoPoint::new(0.0, 2.0));
        b.add_simple_lane("AB", a, n, 160.0, &["North"]);
        b.add_simple_lane("BD", n, d, 160.0, &["North"]);
        b.add_simple_lane("AC", a, s, 170.0, &[]);
        b.add_simple_lane("CD", s, d, 170.0, &[]);
        b.add_port_at("PA", "Alpha", a);
        b.add_port_at("PD", "Delta", d);
        b.add_chokepoint(Chokepoint { name: "North".into(), pos: GeoPoint::new(1.0, 1.0) });
        b.build()
    }

    /// A lane from `a` to `c` with a point every ~0.1° of longitude.
    pub fn dense_lane(b: &mut GraphBuilder, id: &str, a: NodeId, c: NodeId) {
        let (pa, pc) = (b.node_pos(a), b.node_pos(c));
        let steps = ((pc.lon - pa.lon).abs() / 0.1).ceil().max(1.0) as usize;
        let geometry: Vec<GeoPoint> = (0..=steps)
            .map(|i| {
                let t = i as f64 / steps as f64;
                GeoPoint::new(pa.lat + (pc.lat - pa.lat) * t, pa.lon + (pc.lon - pa.lon) * t)
            })
            .collect();
        b.add_lane(Edge {
            source: a,
            target: c,
            distance_km: pa.distance_km(pc),
            geometry,
            chokepoints: vec![],
            lane_id: id.to_string(),
            kind: LaneKind::Lane,
        });
    }

    /// Ports on both sides of the antimeridian, joined only through a
    /// bridge or by a very long lane the other way round the world.
    pub fn pacific() -> GraphIndex {
        let mut b = GraphBuilder::new();
        let west_port = b.add_node("WP", GeoPoint::new(10.0, -170.0));
        let west_edge = b.add_node("WE", GeoPoint::new(10.0, -179.8));
        let east_edge = b.add_node("EE", GeoPoint::new(10.0, 179.8));
        let east_port = b.add_node("EP", GeoPoint::new(10.0, 170.0));
        dense_lane(&mut b, "west", west_port, west_edge);
        dense_lane(&mut b, "east", east_edge, east_port);
        b.add_simple_lane("long-way", west_port, east_port, 38_000.0, &[]);
        b.add_port_at("PW", "West", west_port);
        b.add_port_at("PE", "East", east_port);
        b.build()
    }

    pub const CHOKES: [&str; 3] = ["C0", "C1", "C2"];

    /// A connected random graph: a random spanning tree plus `extra` lanes.
    /// Lane cost is haversine times a factor in `[1, 1.3)`; about a third
    /// of lanes pass one of [`CHOKES`].  Every node carries port `P{i}`.
    pub fn random_graph(seed: u64, n: usize, extra: usize) -> GraphIndex {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut b = GraphBuilder::with_capacity(n, n + extra);
        let ids: Vec<NodeId> = (0..n)
            .map(|i| {
                let pos = GeoPoint::new(rng.gen_range(-30.0..30.0), rng.gen_range(-60.0..60.0));
                b.add_node(format!("N{i}"), pos)
            })
            .collect();

        let lane = |b: &mut GraphBuilder, rng: &mut SmallRng, i: usize, j: usize, k: usize| {
            let km = b.node_pos(ids[i]).distance_km(b.node_pos(ids[j])) * rng.gen_range(1.0..1.3);
            let chokes: Vec<&str> = if rng.gen_bool(0.3) {
                vec![CHOKES[rng.gen_range(0..CHOKES.len())]]
            } else {
                vec![]
            };
            b.add_simple_lane(&format!("L{k}"), ids[i], ids[j], km, &chokes);
        };

        for i in 1..n {
            let j = rng.gen_range(0..i);
            lane(&mut b, &mut rng, i, j, i);
        }
        for k in 0..extra {
            let i = rng.gen_range(0..n);
            let j = rng.gen_range(0..n);
            if i != j {
                lane(&mut b, &mut rng, i, j, n + k);
            }
        }
        for (i, &id) in ids.iter().enumerate() {
            b.add_port_at(&format!("P{i}"), &format!("Port {i}"), id);
        }
        for (k, name) in CHOKES.iter().enumerate() {
            b.add_chokepoint(Chokepoint {
                name: name.to_string(),
                pos:  GeoPoint::new(0.0, k as f64),
            });
        }
        b.build()
    }

    /// Plain Dijkstra over the same cost model, for cross-checking.
    pub fn reference_cost(
        g: &GraphIndex,
        from: NodeId,
        to: NodeId,
        blockades: &Blockades,
        penalties: &DelayPenalties,
        speed_kmh: f64,
    ) -> Option<f64> {
        let mut dist = vec![f64::INFINITY; g.node_count()];
        dist[from.index()] = 0.0;
        let mut heap = BinaryHeap::new();
        heap.push(Reverse((OrderedFloat(0.0), from)));
        while let Some(Reverse((OrderedFloat(cost), node))) = heap.pop() {
            if node == to {
                return Some(cost);
            }
            if cost > dist[node.index()] {
                continue;
            }
            for (e, next) in g.neighbours(node) {
                let edge = g.edge(e);
                if blockades.is_edge_disabled(edge) {
                    continue;
                }
                let c = cost + edge.distance_km + penalties.penalty_km(edge, speed_kmh);
                if c < dist[next.index()] {
                    dist[next.index()] = c;
                    heap.push(Reverse((OrderedFloat(c), next)));
                }
            }
        }
        None
    }

    pub fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
    }
}

// ── Basic routing ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use mt_core::GeoPoint;
    use mt_graph::Blockades;

    use super::helpers::line;
    use crate::{AStarRouter, DelayPenalties, RouteNotFound, Router};

    fn solve(
        blockades: &Blockades,
        origin: &str,
        destination: &str,
    ) -> Result<crate::RouteResult, RouteNotFound> {
        AStarRouter::default().find_path(
            &line(),
            origin,
            destination,
            blockades,
            &DelayPenalties::new(),
        )
    }

    #[test]
    fn line_route() {
        let r = solve(&Blockades::new(), "PA", "PB").unwrap();
        let g = line();
        assert!((r.total_distance_km - 200.0).abs() < 1e-9);
        assert_eq!(r.weighted_cost_km, r.total_distance_km);
        assert_eq!(
            r.node_ids,
            vec![g.node_id("N1").unwrap(), g.node_id("N2").unwrap(), g.node_id("N3").unwrap()]
        );
        assert_eq!(r.lane_ids, vec!["L1", "L2"]);
        assert_eq!(r.chokepoints, vec!["Strait"]);
        assert!(r.passes("Strait"));
        assert!(!r.crosses_dateline());
        assert_eq!(r.origin, g.port_id("PA").unwrap());
        assert_eq!(r.destination, g.port_id("PB").unwrap());
    }

    #[test]
    fn line_geometry_is_oriented_and_deduplicated() {
        let r = solve(&Blockades::new(), "PA", "PB").unwrap();
        assert_eq!(r.segments.len(), 2);
        assert_eq!(r.segments[1], vec![GeoPoint::new(0.0, 1.0), GeoPoint::new(0.0, 2.0)]);
        assert_eq!(
            r.full_geometry,
            vec![
                GeoPoint::new(0.0, 0.0),
                GeoPoint::new(0.0, 0.5),
                GeoPoint::new(0.0, 1.0),
                GeoPoint::new(0.0, 2.0),
            ]
        );
    }

    #[test]
    fn reverse_direction_orients_from_origin() {
        let r = solve(&Blockades::new(), "PB", "PA").unwrap();
        assert_eq!(r.full_geometry.first(), Some(&GeoPoint::new(0.0, 2.0)));
        assert_eq!(r.full_geometry.last(), Some(&GeoPoint::new(0.0, 0.0)));
        assert_eq!(r.lane_ids, vec!["L2", "L1"]);
    }

    #[test]
    fn blocked_chokepoint_makes_route_unreachable() {
        let mut b = Blockades::new();
        b.toggle_chokepoint("Strait");
        assert_eq!(
            solve(&b, "PA", "PB"),
            Err(RouteNotFound::Unreachable { from: "PA".into(), to: "PB".into() })
        );
        // The first lane does not pass the strait.
        assert!(solve(&b, "PA", "PM").is_ok());

        b.toggle_chokepoint("Strait");
        assert!(solve(&b, "PA", "PB").is_ok());
    }

    #[test]
    fn blocked_endpoints() {
        let mut b = Blockades::new();
        b.block_port("PA");
        assert_eq!(solve(&b, "PA", "PB"), Err(RouteNotFound::OriginBlocked("PA".into())));
        assert_eq!(solve(&b, "PB", "PA"), Err(RouteNotFound::DestinationBlocked("PA".into())));
    }

    #[test]
    fn blocked_port_node_can_be_transited() {
        let mut b = Blockades::new();
        b.block_port("PM");
        let r = solve(&b, "PA", "PB").unwrap();
        assert_eq!(r.node_ids.len(), 3);
    }

    #[test]
    fn unknown_port() {
        assert_eq!(
            solve(&Blockades::new(), "PA", "nowhere"),
            Err(RouteNotFound::UnknownPort("nowhere".into()))
        );
    }

    #[test]
    fn same_node_is_trivial() {
        let r = solve(&Blockades::new(), "PA", "PA").unwrap();
        assert!(r.is_trivial());
        assert_eq!(r.total_distance_km, 0.0);
        assert_eq!(r.node_ids.len(), 1);
        assert!(r.segments.is_empty());
        assert_eq!(r.full_geometry, vec![GeoPoint::new(0.0, 0.0)]);
    }

    #[test]
    fn duration_at_speed() {
        let r = solve(&Blockades::new(), "PA", "PB").unwrap();
        assert!((r.duration_hours(40.0) - 5.0).abs() < 1e-9);
    }
}

// ── Delay penalties ───────────────────────────────────────────────────────────

#[cfg(test)]
mod penalties {
    use mt_graph::Blockades;

    use super::helpers::{diamond, line};
    use crate::{AStarRouter, DelayPenalties, Router};

    #[test]
    fn penalty_reroutes_without_changing_reported_distance() {
        let g = diamond();
        let router = AStarRouter::default();
        let free = router
            .find_path(&g, "PA", "PD", &Blockades::new(), &DelayPenalties::new())
            .unwrap();
        assert_eq!(free.lane_ids, vec!["AB", "BD"]);
        assert!((free.total_distance_km - 320.0).abs() < 1e-9);

        let delayed: DelayPenalties = [("North", 10.0)].into_iter().collect();
        let r = router.find_path(&g, "PA", "PD", &Blockades::new(), &delayed).unwrap();
        assert_eq!(r.lane_ids, vec!["AC", "CD"]);
        assert!((r.total_distance_km - 340.0).abs() < 1e-9);
        assert!((r.weighted_cost_km - 340.0).abs() < 1e-9);
    }

    #[test]
    fn small_penalty_keeps_route_and_adds_cost() {
        let router = AStarRouter { speed_kmh: 40.0, stitch_epsilon_m: 10.0 };
        let mut p = DelayPenalties::new();
        p.set("Strait", 2.0);
        let r = router.find_path(&line(), "PA", "PB", &Blockades::new(), &p).unwrap();
        assert!((r.total_distance_km - 200.0).abs() < 1e-9);
        assert!((r.weighted_cost_km - 280.0).abs() < 1e-9);
        assert!((r.delay_hours(40.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn non_positive_penalties_are_ignored() {
        let mut p = DelayPenalties::new();
        p.set("Strait", -3.0);
        p.set("Elsewhere", f64::NAN);
        assert_eq!(p.hours("Strait"), 0.0);
        assert_eq!(p.hours("Elsewhere"), 0.0);
        let r = AStarRouter::default()
            .find_path(&line(), "PA", "PB", &Blockades::new(), &p)
            .unwrap();
        assert_eq!(r.weighted_cost_km, r.total_distance_km);
    }

    #[test]
    fn penalties_accumulate_per_lane() {
        let g = diamond();
        let p: DelayPenalties = [("North", 1.0)].into_iter().collect();
        let ab = g.edges().iter().find(|e| e.lane_id == "AB").unwrap();
        assert!((p.penalty_km(ab, 50.0) - 50.0).abs() < 1e-9);

        let r = AStarRouter { speed_kmh: 5.0, stitch_epsilon_m: 10.0 }
            .find_path(&g, "PA", "PD", &Blockades::new(), &p)
            .unwrap();
        assert_eq!(r.lane_ids, vec!["AB", "BD"]);
        assert!((r.weighted_cost_km - 330.0).abs() < 1e-9);
    }

    #[test]
    fn deserializes_from_hours_map() {
        let p: DelayPenalties =
            serde_json::from_str(r#"{ "Suez Canal": 12.5, "Panama Canal": 0 }"#).unwrap();
        assert_eq!(p.hours("Suez Canal"), 12.5);
        assert_eq!(p.hours("Panama Canal"), 0.0);
        assert_eq!(p.names().count(), 2);

        let mut p = p;
        assert_eq!(p.remove("Suez Canal"), Some(12.5));
        assert_eq!(p.hours("Suez Canal"), 0.0);
        assert!(!p.is_empty());
    }
}

// ── Antimeridian ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod dateline {
    use mt_graph::Blockades;

    use super::helpers::pacific;
    use crate::{AStarRouter, DelayPenalties, Router};

    #[test]
    fn crosses_by_bridge_with_continuous_geometry() {
        let g = pacific();
        assert_eq!(g.bridge_count(), 1);
        let r = AStarRouter::default()
            .find_path(&g, "PW", "PE", &Blockades::new(), &DelayPenalties::new())
            .unwrap();

        assert!(r.crosses_dateline());
        assert!(!r.lane_ids.iter().any(|l| l == "long-way"));
        assert!(r.total_distance_km < 3_000.0);

        for w in r.full_geometry.windows(2) {
            assert!((w[1].lon - w[0].lon).abs() < 180.0);
            assert!(w[0].distance_km(w[1]) < 50.0, "gap between {} and {}", w[0], w[1]);
        }
        let last = r.full_geometry.last().unwrap();
        assert!((last.lon - -190.0).abs() < 1e-9);
    }

    #[test]
    fn east_to_west_unwraps_the_other_way() {
        let r = AStarRouter::default()
            .find_path(&pacific(), "PE", "PW", &Blockades::new(), &DelayPenalties::new())
            .unwrap();
        assert!((r.full_geometry[0].lon - 170.0).abs() < 1e-9);
        assert!((r.full_geometry.last().unwrap().lon - 190.0).abs() < 1e-9);
    }

    #[test]
    fn segments_keep_raw_longitudes() {
        let r = AStarRouter::default()
            .find_path(&pacific(), "PW", "PE", &Blockades::new(), &DelayPenalties::new())
            .unwrap();
        assert!(r.segments.iter().flatten().all(|p| p.is_valid()));
    }
}

// ── Stitching ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stitching {
    use mt_core::{GeoPoint, NodeId};
    use mt_graph::{Edge, LaneKind};

    use crate::{stitch, unwrap_antimeridian};

    fn lane(points: &[(f64, f64)]) -> Edge {
        Edge {
            source: NodeId(0),
            target: NodeId(1),
            distance_km: 1.0,
            geometry: points.iter().map(|&(lat, lon)| GeoPoint::new(lat, lon)).collect(),
            chokepoints: vec![],
            lane_id: "x".into(),
            kind: LaneKind::Lane,
        }
    }

    #[test]
    fn first_lane_flipped_toward_anchor() {
        let a = lane(&[(0.0, 3.0), (0.0, 2.0), (0.0, 1.0)]);
        let s = stitch(&[&a], GeoPoint::new(0.0, 1.0), 10.0);
        assert_eq!(s.segments[0][0], GeoPoint::new(0.0, 1.0));
        assert_eq!(s.merged.len(), 3);
    }

    #[test]
    fn later_lanes_follow_previous_end() {
        let a = lane(&[(0.0, 0.0), (0.0, 1.0)]);
        let b = lane(&[(1.0, 1.0), (0.0, 1.0)]);
        let c = lane(&[(1.0, 1.0), (1.0, 2.0)]);
        let s = stitch(&[&a, &b, &c], GeoPoint::new(0.0, 0.0), 10.0);
        assert_eq!(
            s.merged,
            vec![
                GeoPoint::new(0.0, 0.0),
                GeoPoint::new(0.0, 1.0),
                GeoPoint::new(1.0, 1.0),
                GeoPoint::new(1.0, 2.0),
            ]
        );
        assert_eq!(s.segments.len(), 3);
    }

    #[test]
    fn gaps_become_connectors() {
        let a = lane(&[(0.0, 0.0), (0.0, 1.0)]);
        let b = lane(&[(0.0, 1.01), (0.0, 2.0)]);
        let s = stitch(&[&a, &b], GeoPoint::new(0.0, 0.0), 10.0);
        assert_eq!(s.merged.len(), 4);
    }

    #[test]
    fn near_duplicates_within_epsilon_dropped() {
        let a = lane(&[(0.0, 0.0), (0.0, 1.0)]);
        // ~5.5 m east of a's end.
        let b = lane(&[(0.0, 1.00005), (0.0, 2.0)]);
        let s = stitch(&[&a, &b], GeoPoint::new(0.0, 0.0), 10.0);
        assert_eq!(s.merged.len(), 3);
        assert_eq!(s.segments[1].len(), 2);
    }

    #[test]
    fn empty_geometries_skipped() {
        let a = lane(&[(0.0, 0.0), (0.0, 1.0)]);
        let empty = lane(&[]);
        let s = stitch(&[&empty, &a], GeoPoint::new(0.0, 0.0), 10.0);
        assert_eq!(s.segments.len(), 1);
        assert_eq!(s.merged.len(), 2);
    }

    #[test]
    fn unwrap_eastward_and_westward() {
        let pts = [GeoPoint::new(0.0, 179.0), GeoPoint::new(0.0, -179.0), GeoPoint::new(0.0, -178.0)];
        let lons: Vec<f64> = unwrap_antimeridian(&pts).iter().map(|p| p.lon).collect();
        assert_eq!(lons, vec![179.0, 181.0, 182.0]);

        let pts = [GeoPoint::new(0.0, -179.0), GeoPoint::new(0.0, 179.0), GeoPoint::new(0.0, -179.5)];
        let lons: Vec<f64> = unwrap_antimeridian(&pts).iter().map(|p| p.lon).collect();
        assert_eq!(lons, vec![-179.0, -181.0, -179.5]);
    }

    #[test]
    fn unwrap_leaves_continuous_lines_alone() {
        let pts = [GeoPoint::new(5.0, 10.0), GeoPoint::new(6.0, 100.0), GeoPoint::new(7.0, -60.0)];
        assert_eq!(unwrap_antimeridian(&pts), pts.to_vec());
        assert!(unwrap_antimeridian(&[]).is_empty());
    }
}

// ── Properties on random graphs ───────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use mt_core::haversine_km;
    use mt_graph::Blockades;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::helpers::{CHOKES, approx, random_graph, reference_cost};
    use crate::{AStarRouter, DelayPenalties, RouteNotFound, Router};

    const N: usize = 40;

    fn pairs(seed: u64, count: usize) -> Vec<(String, String)> {
        let mut rng = SmallRng::seed_from_u64(seed);
        (0..count)
            .map(|_| (format!("P{}", rng.gen_range(0..N)), format!("P{}", rng.gen_range(0..N))))
            .collect()
    }

    fn cost(r: &Result<crate::RouteResult, RouteNotFound>) -> Option<f64> {
        r.as_ref().ok().map(|r| r.weighted_cost_km)
    }

    #[test]
    fn matches_reference_dijkstra() {
        let router = AStarRouter::default();
        for seed in 0..6 {
            let g = random_graph(seed, N, 60);
            let mut blockades = Blockades::new();
            if seed % 2 == 1 {
                blockades.block_chokepoint(CHOKES[0]);
            }
            let penalties: DelayPenalties = [(CHOKES[1], 6.0)].into_iter().collect();
            for (a, b) in pairs(seed + 100, 25) {
                let got = cost(&router.find_path(&g, &a, &b, &blockades, &penalties));
                let from = g.port_by_id(&a).unwrap().node;
                let to = g.port_by_id(&b).unwrap().node;
                let want = reference_cost(&g, from, to, &blockades, &penalties, router.speed_kmh);
                match (got, want) {
                    (Some(x), Some(y)) => assert!(approx(x, y), "seed {seed} {a}->{b}: {x} vs {y}"),
                    (None, None) => {}
                    other => panic!("seed {seed} {a}->{b}: {other:?}"),
                }
            }
        }
    }

    #[test]
    fn symmetric() {
        let router = AStarRouter::default();
        for seed in 0..4 {
            let g = random_graph(seed, N, 50);
            let mut blockades = Blockades::new();
            blockades.block_chokepoint(CHOKES[2]);
            let penalties: DelayPenalties = [(CHOKES[0], 3.0)].into_iter().collect();
            for (a, b) in pairs(seed, 20) {
                let ab = cost(&router.find_path(&g, &a, &b, &blockades, &penalties));
                let ba = cost(&router.find_path(&g, &b, &a, &blockades, &penalties));
                match (ab, ba) {
                    (Some(x), Some(y)) => assert!(approx(x, y), "{a}<->{b}: {x} vs {y}"),
                    (None, None) => {}
                    other => panic!("{a}<->{b}: {other:?}"),
                }
            }
        }
    }

    #[test]
    fn blocking_never_shortens() {
        let router = AStarRouter::default();
        let none = DelayPenalties::new();
        for seed in 0..4 {
            let g = random_graph(seed, N, 50);
            for (a, b) in pairs(seed + 7, 20) {
                let mut blockades = Blockades::new();
                let mut last = cost(&router.find_path(&g, &a, &b, &blockades, &none));
                for c in CHOKES {
                    blockades.block_chokepoint(c);
                    let now = cost(&router.find_path(&g, &a, &b, &blockades, &none));
                    match (last, now) {
                        (Some(x), Some(y)) => assert!(y >= x - 1e-9),
                        (None, Some(_)) => panic!("blocking {c} opened a route"),
                        _ => {}
                    }
                    last = now;
                }
            }
        }
    }

    #[test]
    fn deterministic() {
        let router = AStarRouter::default();
        let g = random_graph(42, N, 60);
        let penalties: DelayPenalties = [(CHOKES[1], 1.5)].into_iter().collect();
        for (a, b) in pairs(42, 15) {
            let first = router.find_path(&g, &a, &b, &Blockades::new(), &penalties);
            let second = router.find_path(&g, &a, &b, &Blockades::new(), &penalties);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn routes_are_well_formed() {
        let router = AStarRouter::default();
        for seed in 0..3 {
            let g = random_graph(seed, N, 40);
            for (a, b) in pairs(seed + 50, 20) {
                let Ok(r) = router.find_path(&g, &a, &b, &Blockades::new(), &DelayPenalties::new())
                else {
                    continue;
                };
                assert_eq!(r.node_ids.len(), r.edges.len() + 1);
                assert_eq!(r.segments.len(), r.edges.len());

                let (pa, pb) = (g.port_by_id(&a).unwrap(), g.port_by_id(&b).unwrap());
                assert_eq!(r.node_ids[0], pa.node);
                assert_eq!(*r.node_ids.last().unwrap(), pb.node);
                let crow = haversine_km(pa.pos.lat, pa.pos.lon, pb.pos.lat, pb.pos.lon);
                assert!(r.total_distance_km >= crow - 1e-6);

                // Each lane joins the node pair it sits between.
                for (i, &e) in r.edges.iter().enumerate() {
                    let edge = g.edge(e);
                    assert_eq!(edge.other(r.node_ids[i]), r.node_ids[i + 1]);
                }
                // Consecutive segments meet end to start.
                for w in r.segments.windows(2) {
                    let (end, start) = (*w[0].last().unwrap(), w[1][0]);
                    assert!(end.distance_m(start) < 1.0);
                }
                assert_eq!(r.full_geometry[0], g.node(pa.node).pos);
            }
        }
    }
}
