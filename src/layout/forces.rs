//! Positional forces applied on top of the physics crate's charge and springs.
//!
//! Each force nudges body positions directly and is scaled by the simulation's
//! `alpha`. Fixed bodies are never moved but still push and pull on others.

/// A node as seen by the forces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
	pub x: f32,
	pub y: f32,
	pub fixed: bool,
}

impl Body {
	pub fn new(x: f32, y: f32) -> Self {
		Self { x, y, fixed: false }
	}

	fn nudge(&mut self, dx: f32, dy: f32) {
		if !self.fixed {
			self.x += dx;
			self.y += dy;
		}
	}
}

/// Pull or push linked bodies toward `distance` apart.
pub fn link(
	bodies: &mut [Body],
	edges: &[(usize, usize)],
	distance: f32,
	strength: f32,
	alpha: f32,
) {
	for &(a, b) in edges {
		if a == b {
			continue;
		}
		let (dx, dy) = (bodies[b].x - bodies[a].x, bodies[b].y - bodies[a].y);
		let len = (dx * dx + dy * dy).sqrt();
		if len < f32::EPSILON {
			continue;
		}
		let k = (len - distance) / len * strength * alpha;
		let (mx, my) = (dx * k, dy * k);
		let (share_a, share_b) = match (bodies[a].fixed, bodies[b].fixed) {
			(true, false) => (0.0, 1.0),
			(false, true) => (1.0, 0.0),
			_ => (0.5, 0.5),
		};
		bodies[a].nudge(mx * share_a, my * share_a);
		bodies[b].nudge(-mx * share_b, -my * share_b);
	}
}

/// Translate free bodies so their centroid sits on `(cx, cy)`.
pub fn center(bodies: &mut [Body], cx: f32, cy: f32) {
	let free = bodies.iter().filter(|b| !b.fixed).count();
	if free == 0 {
		return;
	}
	let (sx, sy) = bodies
		.iter()
		.filter(|b| !b.fixed)
		.fold((0.0, 0.0), |(sx, sy), b| (sx + b.x, sy + b.y));
	let (dx, dy) = (cx - sx / free as f32, cy - sy / free as f32);
	for body in bodies.iter_mut() {
		body.nudge(dx, dy);
	}
}

/// Pull each body toward its own x target.
pub fn axis_x(bodies: &mut [Body], target: impl Fn(usize) -> f32, strength: f32, alpha: f32) {
	let k = (strength * alpha).min(1.0);
	for (i, body) in bodies.iter_mut().enumerate() {
		let dx = (target(i) - body.x) * k;
		body.nudge(dx, 0.0);
	}
}

/// Pull every body toward a common y.
pub fn axis_y(bodies: &mut [Body], target: f32, strength: f32, alpha: f32) {
	let k = (strength * alpha).min(1.0);
	for body in bodies.iter_mut() {
		let dy = (target - body.y) * k;
		body.nudge(0.0, dy);
	}
}

/// Separate bodies closer than `2 * radius`.
pub fn collide(bodies: &mut [Body], radius: f32, strength: f32) {
	let min_dist = 2.0 * radius;
	if min_dist <= 0.0 {
		return;
	}
	for i in 0..bodies.len() {
		for j in (i + 1)..bodies.len() {
			let (mut dx, dy) = (bodies[j].x - bodies[i].x, bodies[j].y - bodies[i].y);
			let mut dist = (dx * dx + dy * dy).sqrt();
			if dist >= min_dist {
				continue;
			}
			if dist < f32::EPSILON {
				// coincident: split along x, lower index to the left
				dx = 1.0;
				dist = 1.0;
			}
			let overlap = (min_dist - dist) / dist * strength;
			let (ox, oy) = (dx * overlap, dy * overlap);
			let (share_i, share_j) = match (bodies[i].fixed, bodies[j].fixed) {
				(true, false) => (0.0, 1.0),
				(false, true) => (1.0, 0.0),
				_ => (0.5, 0.5),
			};
			bodies[i].nudge(-ox * share_i, -oy * share_i);
			bodies[j].nudge(ox * share_j, oy * share_j);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn dist(a: Body, b: Body) -> f32 {
		((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
	}

	#[test]
	fn link_moves_toward_rest_length() {
		let mut bodies = [Body::new(0.0, 0.0), Body::new(200.0, 0.0)];
		link(&mut bodies, &[(0, 1)], 100.0, 1.0, 1.0);
		assert!((dist(bodies[0], bodies[1]) - 100.0).abs() < 1e-3);

		let mut bodies = [Body::new(0.0, 0.0), Body::new(10.0, 0.0)];
		link(&mut bodies, &[(0, 1)], 100.0, 0.5, 1.0);
		assert!(dist(bodies[0], bodies[1]) > 10.0);
	}

	#[test]
	fn link_leaves_fixed_end() {
		let mut bodies = [
			Body {
				fixed: true,
				..Body::new(0.0, 0.0)
			},
			Body::new(200.0, 0.0),
		];
		link(&mut bodies, &[(0, 1)], 100.0, 1.0, 1.0);
		assert_eq!(bodies[0], Body { fixed: true, ..Body::new(0.0, 0.0) });
		assert!((bodies[1].x - 100.0).abs() < 1e-3);
	}

	#[test]
	fn center_moves_centroid() {
		let mut bodies = [Body::new(0.0, 0.0), Body::new(10.0, 20.0)];
		center(&mut bodies, 100.0, 100.0);
		assert_eq!(bodies[0], Body::new(95.0, 90.0));
		assert_eq!(bodies[1], Body::new(105.0, 110.0));
	}

	#[test]
	fn axis_forces_pull_toward_targets() {
		let mut bodies = [Body::new(0.0, 0.0), Body::new(0.0, 100.0)];
		axis_x(&mut bodies, |i| i as f32 * 200.0, 1.0, 1.0);
		assert_eq!(bodies[0].x, 0.0);
		assert_eq!(bodies[1].x, 200.0);

		axis_y(&mut bodies, 50.0, 0.5, 1.0);
		assert_eq!(bodies[0].y, 25.0);
		assert_eq!(bodies[1].y, 75.0);
	}

	#[test]
	fn collide_separates_overlapping_bodies() {
		let mut bodies = [Body::new(0.0, 0.0), Body::new(5.0, 0.0), Body::new(5.0, 0.0)];
		collide(&mut bodies, 10.0, 1.0);
		collide(&mut bodies, 10.0, 1.0);
		assert!(dist(bodies[0], bodies[1]) > 5.0);
		assert!(dist(bodies[1], bodies[2]) > 0.0);
	}

	#[test]
	fn collide_never_moves_fixed() {
		let pinned = Body {
			fixed: true,
			..Body::new(0.0, 0.0)
		};
		let mut bodies = [pinned, Body::new(1.0, 0.0)];
		collide(&mut bodies, 10.0, 1.0);
		assert_eq!(bodies[0], pinned);
		assert!((bodies[1].x - 20.0).abs() < 1e-3);
	}
}
