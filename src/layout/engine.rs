use itertools::Itertools;
use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::f64::consts::TAU;
use std::time::Duration;

use super::force::{apply_center, apply_charge, apply_collision};
use super::node::{LayoutNode, Point};
use super::scale::SqrtScale;
use crate::config::{
    ALPHA_DECAY_TICKS, ALPHA_MIN, CENTER_STRENGTH, CHARGE_STRENGTH, COLLISION_ITERATIONS,
    COLLISION_MARGIN, COLLISION_STRENGTH, DRAG_ALPHA_TARGET, DRIFT_ALPHA, DRIFT_AMPLITUDE,
    DRIFT_SPEED, DRIFT_X_SPEED_RATIO, RESIZE_ALPHA, VELOCITY_DECAY,
};
use crate::data::Coin;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceParams {
    pub charge_strength: f64,
    pub center_strength: f64,
    pub collision_margin: f64,
    pub collision_strength: f64,
    pub collision_iterations: usize,
    pub alpha_min: f64,
    pub alpha_decay: f64,
    pub velocity_decay: f64,
    pub drag_alpha_target: f64,
    pub resize_alpha: f64,
    pub drift_alpha: f64,
    pub drift_speed: f64,
    pub drift_x_speed_ratio: f64,
    pub drift_amplitude: f64,
}

impl Default for ForceParams {
    fn default() -> Self {
        Self {
            charge_strength: CHARGE_STRENGTH,
            center_strength: CENTER_STRENGTH,
            collision_margin: COLLISION_MARGIN,
            collision_strength: COLLISION_STRENGTH,
            collision_iterations: COLLISION_ITERATIONS,
            alpha_min: ALPHA_MIN,
            // Cools from 1 to alpha_min in ALPHA_DECAY_TICKS ticks.
            alpha_decay: 1.0 - ALPHA_MIN.powf(1.0 / ALPHA_DECAY_TICKS),
            velocity_decay: VELOCITY_DECAY,
            drag_alpha_target: DRAG_ALPHA_TARGET,
            resize_alpha: RESIZE_ALPHA,
            drift_alpha: DRIFT_ALPHA,
            drift_speed: DRIFT_SPEED,
            drift_x_speed_ratio: DRIFT_X_SPEED_RATIO,
            drift_amplitude: DRIFT_AMPLITUDE,
        }
    }
}

/// Owns the bubble nodes and steps the force simulation.
///
/// `alpha` is the simulation's energy: every force is scaled by it (except
/// collision) and it decays toward `alpha_target` each tick.
pub struct BubbleEngine<R: Rng = StdRng> {
    nodes: Vec<LayoutNode>,
    params: ForceParams,
    width: f64,
    height: f64,
    center: Point,
    alpha: f64,
    alpha_target: f64,
    running: bool,
    generation: u64,
    rng: R,
}

impl BubbleEngine<StdRng> {
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_rng(width, height, ForceParams::default(), StdRng::from_entropy())
    }
}

impl<R: Rng> BubbleEngine<R> {
    pub fn with_rng(width: f64, height: f64, params: ForceParams, rng: R) -> Self {
        Self {
            nodes: Vec::new(),
            params,
            width,
            height,
            center: Point::new(width / 2.0, height / 2.0),
            alpha: 1.0,
            alpha_target: 0.0,
            running: false,
            generation: 0,
            rng,
        }
    }

    /// Replace every node with a fresh one per coin. Nothing from the
    /// previous list survives: positions, phases, pins and energy restart.
    pub fn update(&mut self, coins: &[Coin]) {
        let max_cap = coins
            .iter()
            .map(|c| c.market_cap)
            .filter(|cap| cap.is_finite())
            .fold(0.0, f64::max);
        let scale = SqrtScale::radius_scale(max_cap);

        let mut nodes = Vec::with_capacity(coins.len());
        for coin in coins {
            let position = Point::new(
                self.rng.gen_range(0.0..1.0) * self.width,
                self.rng.gen_range(0.0..1.0) * self.height,
            );
            let phase = self.rng.gen_range(0.0..TAU);
            nodes.push(LayoutNode::new(
                coin.id.clone(),
                scale.apply(coin.market_cap),
                position,
                phase,
            ));
        }

        self.nodes = nodes;
        self.alpha = 1.0;
        self.alpha_target = 0.0;
        self.running = true;
        self.generation += 1;
        debug!(
            "Reseeded layout with {} nodes (generation {})",
            self.nodes.len(),
            self.generation
        );
    }

    /// Advance the simulation by one step. Returns whether it is still warm.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        let p = self.params;

        self.alpha += (self.alpha_target - self.alpha) * p.alpha_decay;

        apply_charge(&mut self.nodes, p.charge_strength, self.alpha, &mut self.rng);
        apply_center(&mut self.nodes, self.center.x, self.center.y, p.center_strength);
        apply_collision(
            &mut self.nodes,
            p.collision_margin,
            p.collision_strength,
            p.collision_iterations,
            &mut self.rng,
        );

        let keep = 1.0 - p.velocity_decay;
        for node in &mut self.nodes {
            match node.fx {
                Some(fx) => {
                    node.x = fx;
                    node.vx = 0.0;
                }
                None => {
                    node.vx *= keep;
                    node.x += node.vx;
                }
            }
            match node.fy {
                Some(fy) => {
                    node.y = fy;
                    node.vy = 0.0;
                }
                None => {
                    node.vy *= keep;
                    node.y += node.vy;
                }
            }
        }

        self.alpha >= p.alpha_min
    }

    /// Nudge free nodes along a slow per-node wave and keep the simulation warm.
    pub fn drift(&mut self, elapsed: Duration) {
        if !self.running {
            return;
        }
        let t = elapsed.as_secs_f64() * 1000.0 * self.params.drift_speed;
        let amplitude = self.params.drift_amplitude;
        let x_ratio = self.params.drift_x_speed_ratio;
        for node in self.nodes.iter_mut().filter(|n| !n.is_pinned()) {
            node.y += (t + node.phase).sin() * amplitude;
            node.x += (t * x_ratio + node.phase).cos() * amplitude;
        }
        self.alpha = self.params.drift_alpha;
    }

    /// Fix a node at `pos` until `unpin`. Returns false for unknown ids.
    pub fn pin(&mut self, id: &str, pos: Point) -> bool {
        let was_dragging = self.nodes.iter().any(|n| n.is_pinned());
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        node.fx = Some(pos.x);
        node.fy = Some(pos.y);
        node.x = pos.x;
        node.y = pos.y;
        node.vx = 0.0;
        node.vy = 0.0;

        if !was_dragging {
            debug!("Pinned {} at ({:.1}, {:.1})", id, pos.x, pos.y);
            self.alpha_target = self.params.drag_alpha_target;
        }
        true
    }

    pub fn unpin(&mut self, id: &str) -> bool {
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        node.fx = None;
        node.fy = None;

        if !self.nodes.iter().any(|n| n.is_pinned()) {
            debug!("Released {}", id);
            self.alpha_target = 0.0;
        }
        true
    }

    /// Re-aim the centering force at the new midpoint and reheat. Radii and
    /// positions are left alone.
    pub fn resize(&mut self, width: f64, height: f64) {
        if width == self.width && height == self.height {
            return;
        }
        debug!(
            "Viewport resized {:.0}x{:.0} -> {:.0}x{:.0}",
            self.width, self.height, width, height
        );
        self.width = width;
        self.height = height;
        self.center = Point::new(width / 2.0, height / 2.0);
        self.alpha = self.alpha.max(self.params.resize_alpha);
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Topmost node under `p`; later nodes are drawn over earlier ones.
    pub fn hit_test(&self, p: Point) -> Option<&LayoutNode> {
        self.nodes.iter().rev().find(|n| n.contains(p))
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn alpha_target(&self) -> f64 {
        self.alpha_target
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn params(&self) -> &ForceParams {
        &self.params
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Deepest intrusion of any pair into its `r_a + r_b + margin` clearance.
    pub fn max_overlap(&self) -> f64 {
        let margin = self.params.collision_margin;
        self.nodes
            .iter()
            .tuple_combinations()
            .map(|(a, b)| a.radius + b.radius + margin - a.position().distance(b.position()))
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f64 = 1300.0;
    const H: f64 = 800.0;

    fn engine(seed: u64) -> BubbleEngine<StdRng> {
        BubbleEngine::with_rng(W, H, ForceParams::default(), StdRng::seed_from_u64(seed))
    }

    fn coins(caps: &[f64]) -> Vec<Coin> {
        caps.iter()
            .enumerate()
            .map(|(i, &cap)| Coin::new(format!("coin-{i}"), format!("c{i}"), cap))
            .collect()
    }

    fn settle<R: Rng>(engine: &mut BubbleEngine<R>) {
        for _ in 0..2000 {
            if !engine.tick() {
                break;
            }
        }
    }

    #[test]
    fn three_coins_scenario() {
        let mut engine = engine(7);
        engine.update(&coins(&[1_000_000.0, 500_000.0, 100.0]));

        let r: Vec<f64> = engine.nodes().iter().map(|n| n.radius).collect();
        assert!(r[0] > r[1] && r[1] > r[2], "radii not decreasing: {r:?}");

        for _ in 0..200 {
            engine.tick();
        }
        assert!(engine.max_overlap() < 0.5, "overlap {}", engine.max_overlap());
    }

    #[test]
    fn settled_layout_has_no_overlap() {
        let caps: Vec<f64> = (0..40).map(|i| 1e12 / (i as f64 + 1.0).powi(2)).collect();
        let mut engine = engine(11);
        engine.update(&coins(&caps));
        settle(&mut engine);

        assert!(engine.alpha() < engine.params().alpha_min);
        assert!(engine.max_overlap() < 0.5, "overlap {}", engine.max_overlap());
    }

    #[test]
    fn missing_caps_get_min_radius() {
        let mut engine = engine(3);
        engine.update(&coins(&[0.0, f64::NAN, 5e9]));
        let nodes = engine.nodes();
        assert_eq!(nodes[0].radius, crate::config::MIN_RADIUS);
        assert_eq!(nodes[1].radius, crate::config::MIN_RADIUS);
        assert_eq!(nodes[2].radius, crate::config::MAX_RADIUS);

        engine.update(&coins(&[0.0, 0.0]));
        assert!(engine.nodes().iter().all(|n| n.radius == crate::config::MIN_RADIUS));

        engine.update(&[]);
        assert!(engine.nodes().is_empty());
        engine.tick();
        assert_eq!(engine.max_overlap(), 0.0);
    }

    #[test]
    fn update_discards_previous_state() {
        let first = coins(&[5e9, 3e9, 1e9, 2e8]);
        let second: Vec<Coin> = coins(&[8e9, 4e8, 6e7])
            .into_iter()
            .map(|mut c| {
                c.id = format!("next-{}", c.id);
                c
            })
            .collect();

        let mut engine = engine(21);
        engine.update(&first);
        engine.pin("coin-0", Point::new(10.0, 10.0));
        for _ in 0..50 {
            engine.tick();
        }

        let rng = engine.rng.clone();
        engine.update(&second);

        let mut fresh = BubbleEngine::with_rng(W, H, ForceParams::default(), rng);
        fresh.update(&second);

        assert_eq!(engine.nodes(), fresh.nodes());
        assert_eq!(engine.alpha(), 1.0);
        assert_eq!(engine.alpha_target(), 0.0);
        assert!(engine.nodes().iter().all(|n| !n.is_pinned() && n.vx == 0.0));
        assert_eq!(engine.generation(), 2);

        for _ in 0..30 {
            engine.tick();
            fresh.tick();
        }
        assert_eq!(engine.nodes(), fresh.nodes());
    }

    #[test]
    fn one_node_per_coin_in_order() {
        let list = coins(&[3.0, 2.0, 1.0]);
        let mut engine = engine(5);
        engine.update(&list);
        let ids: Vec<&str> = engine.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["coin-0", "coin-1", "coin-2"]);
        for node in engine.nodes() {
            assert!((0.0..W).contains(&node.x) && (0.0..H).contains(&node.y));
            assert!((0.0..TAU).contains(&node.phase));
        }
    }

    #[test]
    fn pin_holds_position_through_ticks() {
        let mut engine = engine(9);
        engine.update(&coins(&[9e9, 5e9, 1e9, 1e8, 1e7]));
        let target = Point::new(200.0, 150.0);

        assert!(engine.pin("coin-2", target));
        assert_eq!(engine.alpha_target(), engine.params().drag_alpha_target);
        assert_eq!(engine.node("coin-2").unwrap().position(), target);

        for i in 0..100 {
            engine.drift(Duration::from_millis(i * 16));
            engine.tick();
            assert_eq!(engine.node("coin-2").unwrap().position(), target);
        }

        let moved = Point::new(420.0, 380.0);
        engine.pin("coin-2", moved);
        engine.tick();
        assert_eq!(engine.node("coin-2").unwrap().position(), moved);

        assert!(engine.unpin("coin-2"));
        assert_eq!(engine.alpha_target(), 0.0);
        for _ in 0..20 {
            engine.tick();
        }
        let node = engine.node("coin-2").unwrap();
        assert!(!node.is_pinned());
        assert_ne!(node.position(), moved);
    }

    #[test]
    fn drag_target_held_while_any_node_pinned() {
        let mut engine = engine(13);
        engine.update(&coins(&[3e9, 2e9, 1e9]));
        engine.pin("coin-0", Point::new(100.0, 100.0));
        engine.pin("coin-1", Point::new(500.0, 500.0));
        engine.unpin("coin-0");
        assert_eq!(engine.alpha_target(), engine.params().drag_alpha_target);
        engine.unpin("coin-1");
        assert_eq!(engine.alpha_target(), 0.0);

        assert!(!engine.pin("unknown", Point::new(0.0, 0.0)));
        assert!(!engine.unpin("unknown"));
    }

    #[test]
    fn resize_recenters_and_reheats() {
        let mut engine = engine(17);
        engine.update(&coins(&[4e9, 2e9, 1e9]));
        settle(&mut engine);
        let before: Vec<LayoutNode> = engine.nodes().to_vec();

        engine.resize(2000.0, 1000.0);

        assert_eq!(engine.center(), Point::new(1000.0, 500.0));
        assert!(engine.alpha() >= engine.params().resize_alpha);
        assert_eq!(engine.nodes(), before.as_slice());

        for _ in 0..300 {
            engine.tick();
        }
        let n = engine.nodes().len() as f64;
        let cx = engine.nodes().iter().map(|n| n.x).sum::<f64>() / n;
        let cy = engine.nodes().iter().map(|n| n.y).sum::<f64>() / n;
        assert!((cx - 1000.0).abs() < 1.0 && (cy - 500.0).abs() < 1.0);
        let radii: Vec<f64> = engine.nodes().iter().map(|n| n.radius).collect();
        let radii_before: Vec<f64> = before.iter().map(|n| n.radius).collect();
        assert_eq!(radii, radii_before);
    }

    #[test]
    fn drift_keeps_simulation_warm() {
        let mut engine = engine(19);
        engine.update(&coins(&[4e9, 2e9]));
        settle(&mut engine);
        let before = engine.nodes()[0].position();

        engine.drift(Duration::from_millis(500));
        assert_eq!(engine.alpha(), engine.params().drift_alpha);
        assert!(engine.tick());
        assert_ne!(engine.nodes()[0].position(), before);
    }

    #[test]
    fn drift_x_speed_comes_from_params() {
        let params = ForceParams {
            drift_x_speed_ratio: 0.0,
            ..ForceParams::default()
        };
        let mut engine = BubbleEngine::with_rng(W, H, params, StdRng::seed_from_u64(21));
        engine.update(&coins(&[4e9]));
        let phase = engine.nodes()[0].phase;
        let step = phase.cos() * params.drift_amplitude;

        // A zero ratio freezes the horizontal wave at its phase.
        for ms in [0, 700, 5_000] {
            let x = engine.nodes()[0].x;
            engine.drift(Duration::from_millis(ms));
            assert!((engine.nodes()[0].x - x - step).abs() < 1e-12);
        }
    }

    #[test]
    fn stopped_engine_does_not_move() {
        let mut engine = engine(23);
        engine.update(&coins(&[4e9, 2e9]));
        engine.stop();
        let before = engine.nodes().to_vec();
        assert!(!engine.tick());
        engine.drift(Duration::from_millis(100));
        assert_eq!(engine.nodes(), before.as_slice());
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let mut engine = engine(29);
        engine.update(&coins(&[4e9, 4e9]));
        engine.pin("coin-0", Point::new(300.0, 300.0));
        engine.pin("coin-1", Point::new(310.0, 300.0));

        assert_eq!(engine.hit_test(Point::new(305.0, 300.0)).unwrap().id, "coin-1");
        assert!(engine.hit_test(Point::new(1200.0, 50.0)).is_none());
    }
}
