//! Turns a flat outline into a closed, flat-shaded solid: two triangulated caps
//! joined by side walls, with optional rounded bevels on both faces.

use glam::{Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

/// Longest allowed miter, in multiples of the bevel size. Keeps sharp inner
/// corners from shooting spikes out of the glyph.
const MITER_LIMIT: f32 = 3.0;

const EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bevel {
    /// Outward growth of the outline at the widest point.
    pub size: f32,
    /// How far the bevel extends past each face along Z.
    pub thickness: f32,
    pub segments: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrudeOptions {
    pub depth: f32,
    pub bevel: Option<Bevel>,
}

/// Non-indexed triangle list with one normal per vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
}

impl Geometry {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// `[px, py, pz, nx, ny, nz]` per vertex, ready for a vertex buffer.
    pub fn interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.positions.len() * 6);
        for (p, n) in self.positions.iter().zip(&self.normals) {
            out.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z]);
        }
        out
    }

    /// Axis-aligned bounds, or `None` when empty.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p))),
        )
    }

    fn push_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, normal: Vec3) {
        self.positions.extend_from_slice(&[a, b, c]);
        self.normals.extend_from_slice(&[normal; 3]);
    }
}

/// Shoelace area; positive for counter-clockwise polygons.
pub fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum::<f32>()
        * 0.5
}

/// Drops repeated points (including a closing copy of the first point) and
/// returns the outline wound counter-clockwise.
pub fn normalize_outline(outline: &[[f32; 2]]) -> Vec<Vec2> {
    let mut points: Vec<Vec2> = Vec::with_capacity(outline.len());
    for p in outline.iter().map(|p| Vec2::from(*p)) {
        if points.last().map_or(true, |last| last.distance_squared(p) > EPSILON) {
            points.push(p);
        }
    }
    while points.len() > 1 && points[0].distance_squared(points[points.len() - 1]) <= EPSILON {
        points.pop();
    }
    if signed_area(&points) < 0.0 {
        points.reverse();
    }
    points
}

/// Ear-clipping triangulation of a simple counter-clockwise polygon. Returned
/// triangles index into `polygon` and keep its winding.
pub fn triangulate(polygon: &[Vec2]) -> Vec<[usize; 3]> {
    let mut remaining: Vec<usize> = (0..polygon.len()).collect();
    let mut triangles = Vec::with_capacity(polygon.len().saturating_sub(2));

    while remaining.len() > 3 {
        let n = remaining.len();

        if let Some(i) = (0..n).find(|&i| {
            let (a, b, c) = corner(&remaining, i);
            is_ear(polygon, &remaining, a, b, c)
        }) {
            let (a, b, c) = corner(&remaining, i);
            triangles.push([a, b, c]);
            remaining.remove(i);
            continue;
        }

        // a collinear vertex never forms an ear but is safe to drop
        if let Some(i) = (0..n).find(|&i| {
            let (a, b, c) = corner(&remaining, i);
            turn(polygon[a], polygon[b], polygon[c]).abs() <= EPSILON
        }) {
            remaining.remove(i);
            continue;
        }

        log::warn!("outline is not a simple polygon; {n} vertices left untriangulated");
        return triangles;
    }

    // the last three can be collinear once every ear is gone
    if let [a, b, c] = remaining[..] {
        if turn(polygon[a], polygon[b], polygon[c]) > EPSILON {
            triangles.push([a, b, c]);
        }
    }
    triangles
}

fn corner(ring: &[usize], i: usize) -> (usize, usize, usize) {
    let n = ring.len();
    (ring[(i + n - 1) % n], ring[i], ring[(i + 1) % n])
}

fn turn(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - b)
}

fn is_ear(polygon: &[Vec2], remaining: &[usize], a: usize, b: usize, c: usize) -> bool {
    let (pa, pb, pc) = (polygon[a], polygon[b], polygon[c]);
    if turn(pa, pb, pc) <= EPSILON {
        return false;
    }
    remaining
        .iter()
        .filter(|&&k| k != a && k != b && k != c)
        .all(|&k| !in_triangle(polygon[k], pa, pb, pc))
}

fn in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    (b - a).perp_dot(p - a) >= 0.0
        && (c - b).perp_dot(p - b) >= 0.0
        && (a - c).perp_dot(p - c) >= 0.0
}

/// Direction a vertex moves when a counter-clockwise outline grows by one unit
/// along every edge normal.
fn miter(prev: Vec2, at: Vec2, next: Vec2) -> Vec2 {
    let outward = |d: Vec2| Vec2::new(d.y, -d.x).normalize_or_zero();
    let n1 = outward(at - prev);
    let n2 = outward(next - at);
    let denom = 1.0 + n1.dot(n2);
    if denom <= EPSILON {
        return n1;
    }
    let m = (n1 + n2) / denom;
    if m.length() > MITER_LIMIT {
        m.normalize() * MITER_LIMIT
    } else {
        m
    }
}

#[derive(Debug, Clone, Copy)]
struct Layer {
    z: f32,
    grow: f32,
}

fn layers(options: &ExtrudeOptions) -> Vec<Layer> {
    let depth = options.depth;
    let Some(bevel) = options.bevel else {
        return vec![Layer { z: 0.0, grow: 0.0 }, Layer { z: depth, grow: 0.0 }];
    };

    let segments = bevel.segments.max(1);
    let step = |s: u32| {
        let theta = s as f32 / segments as f32 * FRAC_PI_2;
        (bevel.thickness * theta.cos(), bevel.size * theta.sin())
    };

    let mut out = Vec::with_capacity(2 * segments as usize + 2);
    for s in 0..segments {
        let (dz, grow) = step(s);
        out.push(Layer { z: -dz, grow });
    }
    out.push(Layer { z: 0.0, grow: bevel.size });
    out.push(Layer { z: depth, grow: bevel.size });
    for s in (0..segments).rev() {
        let (dz, grow) = step(s);
        out.push(Layer { z: depth + dz, grow });
    }
    out
}

/// Extrudes `outline` from `z = 0` to `z = depth` (bevels extend past both).
/// Degenerate outlines (fewer than three distinct points) give an empty
/// geometry.
pub fn extrude(outline: &[[f32; 2]], options: &ExtrudeOptions) -> Geometry {
    let contour = normalize_outline(outline);
    let mut geometry = Geometry::default();
    let n = contour.len();
    if n < 3 {
        return geometry;
    }

    let miters: Vec<Vec2> = (0..n)
        .map(|i| miter(contour[(i + n - 1) % n], contour[i], contour[(i + 1) % n]))
        .collect();
    let rings: Vec<Vec<Vec3>> = layers(options)
        .iter()
        .map(|layer| {
            contour
                .iter()
                .zip(&miters)
                .map(|(p, m)| (*p + *m * layer.grow).extend(layer.z))
                .collect()
        })
        .collect();

    let caps = triangulate(&contour);
    let (front, back) = (&rings[0], &rings[rings.len() - 1]);
    for &[a, b, c] in &caps {
        geometry.push_triangle(front[a], front[c], front[b], Vec3::NEG_Z);
    }
    for &[a, b, c] in &caps {
        geometry.push_triangle(back[a], back[b], back[c], Vec3::Z);
    }

    for pair in rings.windows(2) {
        let (lo, hi) = (&pair[0], &pair[1]);
        for i in 0..n {
            let j = (i + 1) % n;
            let (a, b, c, d) = (lo[i], lo[j], hi[j], hi[i]);
            let normal = (b - a)
                .cross(d - a)
                .try_normalize()
                .unwrap_or_else(|| {
                    let e = contour[j] - contour[i];
                    Vec3::new(e.y, -e.x, 0.0).normalize_or_zero()
                });
            geometry.push_triangle(a, b, c, normal);
            geometry.push_triangle(a, c, d, normal);
        }
    }

    geometry
}
