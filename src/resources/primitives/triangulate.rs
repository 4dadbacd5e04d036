//! Polygon triangulation for extrusion caps.
//!
//! Ear clipping over an outer contour with optional holes. Holes are merged
//! into the outer contour through bridge edges (mutually visible vertex
//! pairs), then the combined polygon is clipped ear by ear. Output triangle
//! indices reference the concatenation `contour ++ holes[0] ++ holes[1] ...`,
//! so callers can lay out cap vertices without re-shuffling.

use glam::Vec2;

const EPSILON: f32 = 1e-6;

/// Signed area of a closed polygon (positive for counter-clockwise winding).
#[must_use]
pub fn signed_area(path: &[Vec2]) -> f32 {
    let n = path.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = path[i];
        let b = path[(i + 1) % n];
        sum += a.x * b.y - b.x * a.y;
    }
    sum * 0.5
}

/// Point-in-polygon test (even-odd rule).
#[must_use]
pub fn point_in_polygon(p: Vec2, poly: &[Vec2]) -> bool {
    let n = poly.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = poly[i];
        let b = poly[j];
        if ((a.y > p.y) != (b.y > p.y))
            && (p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn cross2(o: Vec2, a: Vec2, b: Vec2) -> f32 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = cross2(p, a, b);
    let d2 = cross2(p, b, c);
    let d3 = cross2(p, c, a);

    let has_neg = d1 < -EPSILON || d2 < -EPSILON || d3 < -EPSILON;
    let has_pos = d1 > EPSILON || d2 > EPSILON || d3 > EPSILON;

    !(has_neg && has_pos)
}

/// Triangulates `contour` (with `holes`) into triangles indexing the
/// concatenated vertex list `contour ++ holes...`.
///
/// Winding of the inputs does not matter; contours are normalized internally
/// (outer counter-clockwise, holes clockwise). Degenerate remainders are
/// abandoned rather than looping forever.
#[must_use]
pub fn triangulate_shape(contour: &[Vec2], holes: &[Vec<Vec2>]) -> Vec<[u32; 3]> {
    if contour.len() < 3 {
        return Vec::new();
    }

    // Flattened vertex positions; indices below always point into this list.
    let mut points: Vec<Vec2> = contour.to_vec();
    let mut hole_ranges: Vec<(usize, usize)> = Vec::with_capacity(holes.len());
    for hole in holes {
        let start = points.len();
        points.extend_from_slice(hole);
        hole_ranges.push((start, hole.len()));
    }

    // Outer ring counter-clockwise.
    let mut outer: Vec<u32> = (0..contour.len() as u32).collect();
    if signed_area(contour) < 0.0 {
        outer.reverse();
    }

    // Holes clockwise, merged largest-max-x first so bridges cannot cross
    // later holes.
    let mut hole_rings: Vec<Vec<u32>> = hole_ranges
        .iter()
        .filter(|(_, len)| *len >= 3)
        .map(|&(start, len)| {
            let mut ring: Vec<u32> = (start as u32..(start + len) as u32).collect();
            if signed_area(&points[start..start + len]) > 0.0 {
                ring.reverse();
            }
            ring
        })
        .collect();
    hole_rings.sort_by(|a, b| {
        let max_x = |ring: &Vec<u32>| {
            ring.iter()
                .map(|&i| points[i as usize].x)
                .fold(f32::NEG_INFINITY, f32::max)
        };
        max_x(b).partial_cmp(&max_x(a)).unwrap_or(std::cmp::Ordering::Equal)
    });

    for ring in &hole_rings {
        merge_hole(&mut outer, ring, &points);
    }

    ear_clip(&outer, &points)
}

/// Splices a hole ring into the outer ring through a bridge at a mutually
/// visible vertex pair (David Eberly's method: rightmost hole vertex against
/// the closest +x intersection on the outer ring).
fn merge_hole(outer: &mut Vec<u32>, hole: &[u32], points: &[Vec2]) {
    // Rightmost hole vertex.
    let (mi, _) = hole
        .iter()
        .enumerate()
        .max_by(|(_, &a), (_, &b)| {
            points[a as usize]
                .x
                .partial_cmp(&points[b as usize].x)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("hole ring is non-empty");
    let m = points[hole[mi] as usize];

    // Closest intersection of the ray (m, +x) with outer edges.
    let mut best: Option<(usize, f32)> = None; // (edge start index in outer, x of hit)
    let n = outer.len();
    for i in 0..n {
        let a = points[outer[i] as usize];
        let b = points[outer[(i + 1) % n] as usize];
        if (a.y > m.y) == (b.y > m.y) {
            continue;
        }
        let t = (m.y - a.y) / (b.y - a.y);
        let x = a.x + t * (b.x - a.x);
        if x >= m.x - EPSILON {
            match best {
                Some((_, bx)) if bx <= x => {}
                _ => best = Some((i, x)),
            }
        }
    }

    let Some((edge_start, hit_x)) = best else {
        // Hole outside the contour; drop it.
        log::warn!("Hole could not be bridged to the outer contour; skipping");
        return;
    };

    // Candidate bridge endpoint: the endpoint of the hit edge with larger x.
    let ia = edge_start;
    let ib = (edge_start + 1) % n;
    let mut bridge = if points[outer[ia] as usize].x > points[outer[ib] as usize].x {
        ia
    } else {
        ib
    };

    // Any reflex outer vertex inside triangle (m, hit, candidate) would make
    // the bridge cross an edge; pick the one with the smallest angle to +x.
    let hit = Vec2::new(hit_x, m.y);
    let candidate = points[outer[bridge] as usize];
    let mut best_tan = f32::INFINITY;
    for (i, &idx) in outer.iter().enumerate() {
        if i == bridge {
            continue;
        }
        let p = points[idx as usize];
        if p.x < m.x {
            continue;
        }
        if !point_in_triangle(p, m, hit, candidate) {
            continue;
        }
        let prev = points[outer[(i + n - 1) % n] as usize];
        let next = points[outer[(i + 1) % n] as usize];
        let reflex = cross2(prev, p, next) < 0.0;
        if !reflex {
            continue;
        }
        let tan = (p.y - m.y).abs() / (p.x - m.x).max(EPSILON);
        if tan < best_tan {
            best_tan = tan;
            bridge = i;
        }
    }

    // Splice: outer[..=bridge] + hole(rotated to start at mi, closed) +
    // bridge vertex again + rest of outer.
    let mut merged: Vec<u32> = Vec::with_capacity(outer.len() + hole.len() + 2);
    merged.extend_from_slice(&outer[..=bridge]);
    for k in 0..=hole.len() {
        merged.push(hole[(mi + k) % hole.len()]);
    }
    merged.push(outer[bridge]);
    merged.extend_from_slice(&outer[bridge + 1..]);
    *outer = merged;
}

fn ear_clip(ring: &[u32], points: &[Vec2]) -> Vec<[u32; 3]> {
    let mut indices: Vec<u32> = ring.to_vec();
    let mut triangles = Vec::with_capacity(indices.len().saturating_sub(2));

    while indices.len() > 3 {
        let n = indices.len();
        let mut clipped = false;

        for i in 0..n {
            let i_prev = (i + n - 1) % n;
            let i_next = (i + 1) % n;

            let a = points[indices[i_prev] as usize];
            let b = points[indices[i] as usize];
            let c = points[indices[i_next] as usize];

            // Convex corner in a counter-clockwise ring.
            if cross2(a, b, c) <= EPSILON {
                continue;
            }

            // No other remaining vertex may sit inside the candidate ear.
            let mut contains = false;
            for (j, &idx) in indices.iter().enumerate() {
                if j == i_prev || j == i || j == i_next {
                    continue;
                }
                let p = points[idx as usize];
                // Bridge duplicates share positions with ear corners.
                if (p - a).length_squared() < EPSILON
                    || (p - b).length_squared() < EPSILON
                    || (p - c).length_squared() < EPSILON
                {
                    continue;
                }
                if point_in_triangle(p, a, b, c) {
                    contains = true;
                    break;
                }
            }
            if contains {
                continue;
            }

            triangles.push([indices[i_prev], indices[i], indices[i_next]]);
            indices.remove(i);
            clipped = true;
            break;
        }

        if !clipped {
            // Degenerate remainder (collinear runs, self-touching bridges).
            log::warn!("Ear clipping stalled with {} vertices left", indices.len());
            break;
        }
    }

    if indices.len() == 3 {
        triangles.push([indices[0], indices[1], indices[2]]);
    }

    triangles
}
