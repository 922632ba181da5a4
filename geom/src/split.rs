use std::collections::VecDeque;

use crate::{Path, Pt2D, SimplePath};

impl Path {
    /// Real roads sometimes loop back to a point they already visited. Offsetting assumes the
    /// tangent keeps flowing forwards, so cut the path wherever that happens.
    ///
    /// The scan finds the first point that repeats an earlier one (within `EPSILON_DIST`). A
    /// repeat of the very first point is a closed ring, not a loop, and a repeat on the final
    /// point is left alone. Otherwise the path is cut at the repeated point into `[0, i]` and
    /// `[i, end]`, so both pieces share it, and both pieces are checked again. Only repeated
    /// vertices are detected; crossings between segments aren't.
    ///
    /// `name` is only used for logging.
    pub fn split_loops(&self, name: &str) -> Vec<SimplePath> {
        let mut results = Vec::new();
        // Pieces are popped in traversal order, so the output stays in order too.
        let mut queue: VecDeque<Vec<Pt2D>> = VecDeque::new();
        if !self.is_empty() {
            queue.push_back(self.points().clone());
        }

        while let Some(mut pts) = queue.pop_front() {
            if let Some((at, revisits)) = find_loop(&pts) {
                info!(
                    "{} loops back to point {} at point {} ({}); splitting it",
                    name, revisits, at, pts[at]
                );
                let tail = pts[at..].to_vec();
                pts.truncate(at + 1);
                queue.push_front(tail);
                queue.push_front(pts);
            } else {
                results.push(SimplePath::new(pts));
            }
        }
        results
    }
}

/// Returns (index of the repeated point, index of the earlier point it matches)
fn find_loop(pts: &[Pt2D]) -> Option<(usize, usize)> {
    let last = pts.len().checked_sub(1)?;
    for (at, pt) in pts.iter().enumerate() {
        if let Some(revisits) = pts[..at].iter().position(|seen| seen.approx_eq(*pt)) {
            if revisits != 0 && at != last {
                return Some((at, revisits));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EPSILON_DIST;

    fn split(pts: &[Pt2D]) -> Vec<Vec<Pt2D>> {
        Path::new(pts.to_vec())
            .split_loops("test road")
            .into_iter()
            .map(|p| p.into_points())
            .collect()
    }

    const A: Pt2D = Pt2D::new(0.0, 0.0);
    const B: Pt2D = Pt2D::new(10.0, 0.0);
    const C: Pt2D = Pt2D::new(10.0, 10.0);
    const D: Pt2D = Pt2D::new(20.0, 0.0);
    const E: Pt2D = Pt2D::new(30.0, 5.0);

    #[test]
    fn empty_path() {
        assert!(split(&[]).is_empty());
    }

    #[test]
    fn no_loops() {
        assert_eq!(split(&[A]), vec![vec![A]]);
        assert_eq!(split(&[A, B, C, D]), vec![vec![A, B, C, D]]);
    }

    #[test]
    fn one_loop() {
        assert_eq!(split(&[A, B, C, B, D]), vec![vec![A, B, C, B], vec![B, D]]);
    }

    #[test]
    fn loop_within_tolerance() {
        let almost_b = B.offset(EPSILON_DIST / 2.0, -EPSILON_DIST / 2.0);
        assert_eq!(
            split(&[A, B, C, almost_b, D]),
            vec![vec![A, B, C, almost_b], vec![almost_b, D]]
        );

        let not_b = B.offset(EPSILON_DIST * 2.0, 0.0);
        assert_eq!(split(&[A, B, C, not_b, D]), vec![vec![A, B, C, not_b, D]]);
    }

    #[test]
    fn closed_rings_are_not_loops() {
        assert_eq!(split(&[A, B, C, A]), vec![vec![A, B, C, A]]);
        // Even coming back to the start in the middle isn't a loop
        assert_eq!(split(&[A, B, C, A, D]), vec![vec![A, B, C, A, D]]);
    }

    #[test]
    fn repeat_on_the_last_point_is_kept() {
        assert_eq!(split(&[A, B, C, D, B]), vec![vec![A, B, C, D, B]]);
    }

    #[test]
    fn several_loops() {
        // B repeats, then D repeats within the remainder
        assert_eq!(
            split(&[A, B, C, B, D, E, D, C]),
            vec![vec![A, B, C, B], vec![B, D, E, D], vec![D, C]]
        );
        // The remainder is checked on its own, so C and A don't count as repeats of the first
        // piece
        assert_eq!(
            split(&[A, B, C, D, B, E, C, A]),
            vec![vec![A, B, C, D, B], vec![B, E, C, A]]
        );
    }

    #[test]
    fn no_points_dropped() {
        let input = vec![A, B, C, B, D, E, D, C];
        let pieces = split(&input);
        // Every cut duplicates exactly one boundary point
        let total: usize = pieces.iter().map(|p| p.len()).sum();
        assert_eq!(total, input.len() + pieces.len() - 1);
        let mut glued = pieces[0].clone();
        for piece in &pieces[1..] {
            assert_eq!(glued.last(), piece.first());
            glued.extend(piece.iter().skip(1));
        }
        assert_eq!(glued, input);
    }
}
