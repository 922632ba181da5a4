use crate::{ray_intersection, GeomError, Line, Pt2D, Result, Ring, SimplePath};

/// Consecutive tangents whose dot product is at or below this turn by 90 degrees or more, and
/// need an explicit join. Exact right angles count too, so they get a proper corner.
pub const JOIN_EPSILON: f64 = 1e-9;

impl SimplePath {
    /// Thickens the centerline into a ribbon `width` meters wide and returns its boundary.
    ///
    /// Each segment contributes the points offset half the width to its left and right at its
    /// start. Gentle turns (under 90 degrees) just use those directly. At sharper turns, the
    /// offset lines on the inside of the turn would overlap, so that side gets a single miter
    /// point where the two offset lines cross, while the outside gets both corners (the previous
    /// segment's offset end and the next segment's offset start). The ring is the left side
    /// followed by the right side backwards.
    ///
    /// Closed paths are already rings and can't be dilated.
    pub fn dilate(&self, width: f64) -> Result<Ring> {
        let pts = self.points();
        if pts.len() < 2 {
            return Err(GeomError::EmptyInput {
                needed: 2,
                got: pts.len(),
            });
        }
        if self.is_closed() {
            return Err(GeomError::AlreadyClosed);
        }
        if !width.is_finite() || width <= 0.0 {
            return Err(GeomError::BadWidth(width));
        }
        let half = width / 2.0;

        // Every vertex adds at least one point to each side
        let mut left_side: Vec<Pt2D> = Vec::with_capacity(pts.len() + 1);
        let mut right_side: Vec<Pt2D> = Vec::with_capacity(pts.len() + 1);
        let mut prev_dir = None;

        for (idx, pair) in pts.windows(2).enumerate() {
            let pt = pair[0];
            let degenerate = GeomError::DegenerateGeometry { idx, pt };
            if pt.approx_eq(pair[1]) {
                return Err(degenerate);
            }
            let dir = Line::new(pt, pair[1]).direction().ok_or(degenerate)?;
            let perp = dir.left_perpendicular();
            let left = pt.project_away(half, perp);
            let right = pt.project_away(-half, perp);

            match prev_dir {
                Some(prev) if dir.dot(prev) <= JOIN_EPSILON => {
                    let prev_perp = prev.left_perpendicular();
                    let singular = GeomError::SingularJoin { idx, pt };
                    let turn = prev.angle().rotation_towards(dir.angle());
                    if turn.radians() > 0.0 {
                        // Turning left, so the left side is on the inside
                        let prev_left = pt.project_away(half, prev_perp);
                        let miter = ray_intersection(prev_left, prev, left, dir).ok_or(singular)?;
                        left_side.push(miter);
                        right_side.push(pt.project_away(-half, prev_perp));
                        right_side.push(right);
                    } else {
                        let prev_right = pt.project_away(-half, prev_perp);
                        let miter =
                            ray_intersection(prev_right, prev, right, dir).ok_or(singular)?;
                        right_side.push(miter);
                        left_side.push(pt.project_away(half, prev_perp));
                        left_side.push(left);
                    }
                }
                _ => {
                    left_side.push(left);
                    right_side.push(right);
                }
            }
            prev_dir = Some(dir);
        }

        // Cap off the end, using the last segment's direction
        let last_pt = pts[pts.len() - 1];
        if let Some(dir) = prev_dir {
            let perp = dir.left_perpendicular();
            left_side.push(last_pt.project_away(half, perp));
            right_side.push(last_pt.project_away(-half, perp));
        }

        let mut ring = left_side;
        ring.extend(right_side.into_iter().rev());
        ring.push(ring[0]);
        Ring::new(ring)
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    use super::*;
    use crate::{Path, EPSILON_DIST};

    fn simple(pts: Vec<Pt2D>) -> SimplePath {
        SimplePath::new(pts)
    }

    fn assert_pts_eq(actual: &[Pt2D], expected: &[Pt2D]) {
        assert_eq!(actual.len(), expected.len(), "{:?} vs {:?}", actual, expected);
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!(a.approx_eq(*e), "{:?} vs {:?}", actual, expected);
        }
    }

    #[test]
    fn straight_line_is_a_rectangle() {
        let path = simple(vec![Pt2D::new(0.0, 0.0), Pt2D::new(10.0, 0.0)]);
        let ring = path.dilate(4.0).unwrap();
        assert_eq!(ring.len(), 5);
        assert!((ring.area() - 40.0).abs() < 1e-9);
        assert_pts_eq(
            ring.points(),
            &[
                Pt2D::new(0.0, 2.0),
                Pt2D::new(10.0, 2.0),
                Pt2D::new(10.0, -2.0),
                Pt2D::new(0.0, -2.0),
                Pt2D::new(0.0, 2.0),
            ],
        );
    }

    #[test]
    fn diagonal_rectangle_area() {
        let path = simple(vec![Pt2D::new(3.0, -2.0), Pt2D::new(-5.0, 4.0)]);
        let ring = path.dilate(2.5).unwrap();
        assert_eq!(ring.len(), 5);
        assert!((ring.area() - 10.0 * 2.5).abs() < 1e-9);
    }

    #[test]
    fn left_turn() {
        let path = simple(vec![
            Pt2D::new(0.0, 0.0),
            Pt2D::new(10.0, 0.0),
            Pt2D::new(10.0, 10.0),
        ]);
        let ring = path.dilate(2.0).unwrap();
        assert_pts_eq(
            ring.points(),
            &[
                // Left side: one miter point on the inside of the corner
                Pt2D::new(0.0, 1.0),
                Pt2D::new(9.0, 1.0),
                Pt2D::new(9.0, 10.0),
                // Right side, backwards: two corners on the outside
                Pt2D::new(11.0, 10.0),
                Pt2D::new(11.0, 0.0),
                Pt2D::new(10.0, -1.0),
                Pt2D::new(0.0, -1.0),
                Pt2D::new(0.0, 1.0),
            ],
        );
    }

    #[test]
    fn right_turn() {
        let path = simple(vec![
            Pt2D::new(0.0, 0.0),
            Pt2D::new(10.0, 0.0),
            Pt2D::new(10.0, -10.0),
        ]);
        let ring = path.dilate(2.0).unwrap();
        assert_pts_eq(
            ring.points(),
            &[
                Pt2D::new(0.0, 1.0),
                Pt2D::new(10.0, 1.0),
                Pt2D::new(11.0, 0.0),
                Pt2D::new(11.0, -10.0),
                Pt2D::new(9.0, -10.0),
                Pt2D::new(9.0, -1.0),
                Pt2D::new(0.0, -1.0),
                Pt2D::new(0.0, 1.0),
            ],
        );
    }

    #[test]
    fn gentle_turn_has_no_join() {
        let path = simple(vec![
            Pt2D::new(0.0, 0.0),
            Pt2D::new(10.0, 0.0),
            Pt2D::new(20.0, 10.0),
        ]);
        let ring = path.dilate(2.0).unwrap();
        // Two points per vertex per side, plus closing
        assert_eq!(ring.len(), 7);
    }

    #[test]
    fn sharp_turn_miter() {
        // 135 degree left turn
        let path = simple(vec![
            Pt2D::new(0.0, 0.0),
            Pt2D::new(10.0, 0.0),
            Pt2D::new(0.0, 10.0),
        ]);
        let ring = path.dilate(2.0).unwrap();
        assert_eq!(ring.len(), 8);
        let miter = ring.points()[1];
        // The miter is on the inside, on the previous segment's left edge
        assert!((miter.y() - 1.0).abs() < 1e-9, "{}", miter);
        assert!(miter.x() < 10.0, "{}", miter);
    }

    #[test]
    fn zero_length_segment() {
        let path = simple(vec![
            Pt2D::new(0.0, 0.0),
            Pt2D::new(10.0, 0.0),
            Pt2D::new(10.0, 0.0),
            Pt2D::new(10.0, 5.0),
        ]);
        assert_eq!(
            path.dilate(2.0),
            Err(GeomError::DegenerateGeometry {
                idx: 1,
                pt: Pt2D::new(10.0, 0.0)
            })
        );

        let almost = simple(vec![
            Pt2D::new(0.0, 0.0),
            Pt2D::new(EPSILON_DIST / 10.0, 0.0),
        ]);
        assert!(matches!(
            almost.dilate(2.0),
            Err(GeomError::DegenerateGeometry { idx: 0, .. })
        ));
    }

    #[test]
    fn u_turn_is_singular() {
        let path = simple(vec![
            Pt2D::new(0.0, 0.0),
            Pt2D::new(10.0, 0.0),
            Pt2D::new(5.0, 0.0),
        ]);
        assert_eq!(
            path.dilate(2.0),
            Err(GeomError::SingularJoin {
                idx: 1,
                pt: Pt2D::new(10.0, 0.0)
            })
        );
    }

    #[test]
    fn bad_input() {
        assert_eq!(
            simple(vec![Pt2D::new(0.0, 0.0)]).dilate(2.0),
            Err(GeomError::EmptyInput { needed: 2, got: 1 })
        );
        assert_eq!(
            simple(Vec::new()).dilate(2.0),
            Err(GeomError::EmptyInput { needed: 2, got: 0 })
        );
        let line = simple(vec![Pt2D::new(0.0, 0.0), Pt2D::new(1.0, 0.0)]);
        assert_eq!(line.dilate(0.0), Err(GeomError::BadWidth(0.0)));
        assert!(matches!(line.dilate(f64::NAN), Err(GeomError::BadWidth(_))));

        let closed = Path::new(vec![
            Pt2D::new(0.0, 0.0),
            Pt2D::new(1.0, 0.0),
            Pt2D::new(1.0, 1.0),
            Pt2D::new(0.0, 0.0),
        ])
        .split_loops("closed");
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].dilate(2.0), Err(GeomError::AlreadyClosed));
    }

    #[test]
    fn random_walks() {
        let mut rng = XorShiftRng::seed_from_u64(42);
        for _ in 0..500 {
            let num_pts = rng.gen_range(2..20);
            let width = rng.gen_range(0.5..15.0);
            let mut pts = vec![Pt2D::new(
                rng.gen_range(-100.0..100.0),
                rng.gen_range(-100.0..100.0),
            )];
            let mut heading: f64 = rng.gen_range(-180.0..180.0);
            let mut joins = 0;
            for i in 1..num_pts {
                if i > 1 {
                    let turn: f64 = rng.gen_range(-160.0..160.0);
                    if turn.abs() >= 90.0 {
                        joins += 1;
                    }
                    heading += turn;
                }
                let len = rng.gen_range(1.0..50.0);
                let last = pts[pts.len() - 1];
                pts.push(last.offset(
                    len * heading.to_radians().cos(),
                    len * heading.to_radians().sin(),
                ));
            }
            let path = simple(pts);
            if path.is_closed() {
                continue;
            }

            let ring = path.dilate(width).unwrap();
            let ring_pts = ring.points();
            assert!(ring_pts[0].approx_eq(ring_pts[ring_pts.len() - 1]));
            assert!(ring_pts
                .iter()
                .all(|pt| pt.x().is_finite() && pt.y().is_finite()));
            // Two points per vertex, one more per join, plus the closing point
            assert_eq!(ring.len(), 2 * num_pts + joins + 1, "{}", path);
        }
    }
}
