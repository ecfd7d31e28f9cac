use geo::{Coord, LineString};
use std::collections::VecDeque;

/// Join way segments end to end, reversing segments where their direction
/// disagrees. Returns the joined paths in discovery order; a path stops
/// growing once it closes or no remaining segment touches its ends.
pub fn join_segments(segments: Vec<Vec<Coord<f64>>>) -> Vec<Vec<Coord<f64>>> {
    let mut remaining: VecDeque<Vec<Coord<f64>>> =
        segments.into_iter().filter(|s| s.len() >= 2).collect();
    let mut joined = Vec::new();

    while let Some(mut current) = remaining.pop_front() {
        while !is_closed(&current) {
            let (Some(&first), Some(&last)) = (current.first(), current.last()) else {
                break;
            };
            let Some(pos) = remaining.iter().position(|seg| touches(seg, first, last)) else {
                break;
            };
            let Some(mut segment) = remaining.remove(pos) else {
                break;
            };

            if segment.first() == Some(&last) {
                current.extend(segment.into_iter().skip(1));
            } else if segment.last() == Some(&last) {
                current.extend(segment.into_iter().rev().skip(1));
            } else if segment.last() == Some(&first) {
                segment.extend(current.into_iter().skip(1));
                current = segment;
            } else {
                segment.reverse();
                segment.extend(current.into_iter().skip(1));
                current = segment;
            }
        }
        joined.push(current);
    }

    joined
}

/// Join segments and keep only the closed rings with at least four
/// positions.
pub fn join_rings(segments: Vec<Vec<Coord<f64>>>) -> Vec<LineString<f64>> {
    join_segments(segments)
        .into_iter()
        .filter(|path| path.len() >= 4 && is_closed(path))
        .map(LineString::new)
        .collect()
}

pub fn is_closed(path: &[Coord<f64>]) -> bool {
    path.len() >= 2 && path.first() == path.last()
}

fn touches(segment: &[Coord<f64>], first: Coord<f64>, last: Coord<f64>) -> bool {
    let (Some(&start), Some(&end)) = (segment.first(), segment.last()) else {
        return false;
    };
    start == last || end == last || start == first || end == first
}
