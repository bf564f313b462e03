//! Forces applied once per tick. Charge and collision write velocities,
//! centering translates positions directly.

use rand::Rng;

use super::node::LayoutNode;

/// Tiny random offset that separates exactly coincident nodes.
fn jiggle<R: Rng>(rng: &mut R) -> f64 {
    (rng.gen_range(0.0..1.0) - 0.5) * 1e-6
}

/// Pairwise inverse-distance force. Negative strength repels, positive attracts.
pub fn apply_charge<R: Rng>(nodes: &mut [LayoutNode], strength: f64, alpha: f64, rng: &mut R) {
    if strength == 0.0 {
        return;
    }
    let positions: Vec<(f64, f64)> = nodes.iter().map(|n| (n.x, n.y)).collect();

    for (i, node) in nodes.iter_mut().enumerate() {
        for (j, &(xj, yj)) in positions.iter().enumerate() {
            if i == j {
                continue;
            }
            let mut x = xj - positions[i].0;
            let mut y = yj - positions[i].1;
            let mut l = x * x + y * y;
            if x == 0.0 {
                x = jiggle(rng);
                l += x * x;
            }
            if y == 0.0 {
                y = jiggle(rng);
                l += y * y;
            }
            // Soften the singularity below unit distance.
            if l < 1.0 {
                l = l.sqrt();
            }
            let w = strength * alpha / l;
            node.vx += x * w;
            node.vy += y * w;
        }
    }
}

/// Shift every node so the centroid lands on `(cx, cy)`.
pub fn apply_center(nodes: &mut [LayoutNode], cx: f64, cy: f64, strength: f64) {
    if nodes.is_empty() {
        return;
    }
    let n = nodes.len() as f64;
    let (sx, sy) = nodes
        .iter()
        .fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
    let dx = (sx / n - cx) * strength;
    let dy = (sy / n - cy) * strength;
    for node in nodes.iter_mut() {
        node.x -= dx;
        node.y -= dy;
    }
}

/// Push apart nodes whose predicted positions overlap, treating each node as
/// a circle of `radius + margin`. The correction does not scale with alpha.
pub fn apply_collision<R: Rng>(
    nodes: &mut [LayoutNode],
    margin: f64,
    strength: f64,
    iterations: usize,
    rng: &mut R,
) {
    let n = nodes.len();
    for _ in 0..iterations {
        for i in 0..n {
            let ri = nodes[i].radius + margin;
            let ri2 = ri * ri;
            let xi = nodes[i].x + nodes[i].vx;
            let yi = nodes[i].y + nodes[i].vy;

            for j in (i + 1)..n {
                let rj = nodes[j].radius + margin;
                let r = ri + rj;
                let mut x = xi - nodes[j].x - nodes[j].vx;
                let mut y = yi - nodes[j].y - nodes[j].vy;
                let mut l = x * x + y * y;
                if l >= r * r {
                    continue;
                }
                if x == 0.0 {
                    x = jiggle(rng);
                    l += x * x;
                }
                if y == 0.0 {
                    y = jiggle(rng);
                    l += y * y;
                }
                let l = l.sqrt();
                let k = (r - l) / l * strength;
                x *= k;
                y *= k;

                let rj2 = rj * rj;
                let share = rj2 / (ri2 + rj2);
                nodes[i].vx += x * share;
                nodes[i].vy += y * share;
                nodes[j].vx -= x * (1.0 - share);
                nodes[j].vy -= y * (1.0 - share);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Point;
    use rand::{SeedableRng, rngs::StdRng};

    fn node(id: &str, r: f64, x: f64, y: f64) -> LayoutNode {
        LayoutNode::new(id, r, Point::new(x, y), 0.0)
    }

    #[test]
    fn center_moves_centroid_only() {
        let mut nodes = vec![node("a", 1.0, 0.0, 0.0), node("b", 1.0, 10.0, 20.0)];
        apply_center(&mut nodes, 100.0, 100.0, 1.0);

        assert_eq!(nodes[0].position(), Point::new(95.0, 90.0));
        assert_eq!(nodes[1].position(), Point::new(105.0, 110.0));
    }

    #[test]
    fn charge_sign_selects_direction() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut attract = vec![node("a", 1.0, 0.0, 0.0), node("b", 1.0, 10.0, 0.0)];
        apply_charge(&mut attract, 12.0, 1.0, &mut rng);
        assert!(attract[0].vx > 0.0 && attract[1].vx < 0.0);

        let mut repel = vec![node("a", 1.0, 0.0, 0.0), node("b", 1.0, 10.0, 0.0)];
        apply_charge(&mut repel, -12.0, 1.0, &mut rng);
        assert!(repel[0].vx < 0.0 && repel[1].vx > 0.0);
    }

    #[test]
    fn collision_pushes_overlapping_pair_apart() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut nodes = vec![node("a", 10.0, 0.0, 0.0), node("b", 10.0, 15.0, 0.0)];
        apply_collision(&mut nodes, 3.0, 1.0, 1, &mut rng);

        // Equal radii split the 11 unit overlap evenly.
        assert!((nodes[0].vx + 5.5).abs() < 1e-9);
        assert!((nodes[1].vx - 5.5).abs() < 1e-9);
        // Shared y draws a sub-micro jiggle, nothing more.
        assert!(nodes[0].vy.abs() < 1e-6);
        assert!(nodes[1].vy.abs() < 1e-6);
    }

    #[test]
    fn collision_ignores_separated_pair() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut nodes = vec![node("a", 10.0, 0.0, 0.0), node("b", 10.0, 40.0, 0.0)];
        apply_collision(&mut nodes, 3.0, 1.0, 1, &mut rng);
        assert_eq!(nodes[0].vx, 0.0);
        assert_eq!(nodes[1].vx, 0.0);
    }

    #[test]
    fn coincident_nodes_are_separated() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut nodes = vec![node("a", 10.0, 5.0, 5.0), node("b", 10.0, 5.0, 5.0)];
        apply_collision(&mut nodes, 0.0, 1.0, 1, &mut rng);
        assert!(nodes[0].vx != 0.0 || nodes[0].vy != 0.0);
        assert!(nodes.iter().all(|n| n.vx.is_finite() && n.vy.is_finite()));
    }
}
