//! Priority reordering for bucket elements
//!
//! Moving an element swaps it with its neighbour and renumbers every
//! priority to its 1-based position. The input is never mutated; callers
//! always get a fresh list back.

use std::fmt;
use std::str::FromStr;

use super::bucket::BucketElement;

/// Direction of a priority move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards priority 1
    Up,
    /// Away from priority 1
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" | "u" | "+" => Ok(Direction::Up),
            "down" | "d" | "-" => Ok(Direction::Down),
            _ => Err(format!("Unknown direction: {} (expected 'up' or 'down')", s)),
        }
    }
}

/// Returns the index of the neighbour `index` would swap with, if any
fn neighbour(len: usize, index: usize, direction: Direction) -> Option<usize> {
    if index >= len {
        return None;
    }
    match direction {
        Direction::Up => index.checked_sub(1),
        Direction::Down => (index + 1 < len).then_some(index + 1),
    }
}

/// Moves the element at `index` one step in `direction`.
///
/// Returns an unchanged copy when the move would leave the list (first
/// element up, last element down) or `index` is out of range.
pub fn reorder(elements: &[BucketElement], index: usize, direction: Direction) -> Vec<BucketElement> {
    let mut reordered = elements.to_vec();

    if let Some(other) = neighbour(elements.len(), index, direction) {
        reordered.swap(index, other);
        renumber(&mut reordered);
    }

    reordered
}

/// Returns true if a move at `index` in `direction` would change the list
pub fn can_move(len: usize, index: usize, direction: Direction) -> bool {
    neighbour(len, index, direction).is_some()
}

/// Sets every priority to its 1-based position
pub fn renumber(elements: &mut [BucketElement]) {
    for (position, element) in elements.iter_mut().enumerate() {
        element.priority = position as u32 + 1;
    }
}

/// Returns true if priorities form the sequence 1..=N in list order
pub fn is_dense(elements: &[BucketElement]) -> bool {
    elements
        .iter()
        .enumerate()
        .all(|(position, element)| element.priority == position as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn element(id: i64, priority: u32) -> BucketElement {
        BucketElement {
            element_id: id,
            teach_id: 1000 + id,
            priority,
            course_name: format!("Course {}", id),
            professor_name: "Prof".to_string(),
            time_place: String::new(),
            major_type: String::new(),
            alternate_teach_id: None,
            alternate_subject_name: None,
        }
    }

    fn list(n: usize) -> Vec<BucketElement> {
        (1..=n).map(|i| element(i as i64, i as u32)).collect()
    }

    fn ids(elements: &[BucketElement]) -> Vec<i64> {
        elements.iter().map(|e| e.element_id).collect()
    }

    #[test]
    fn move_down_swaps_and_renumbers() {
        let before = list(3);
        let after = reorder(&before, 0, Direction::Down);

        assert_eq!(ids(&after), vec![2, 1, 3]);
        assert!(is_dense(&after));
        // Input untouched
        assert_eq!(ids(&before), vec![1, 2, 3]);
    }

    #[test]
    fn move_up_swaps_and_renumbers() {
        let after = reorder(&list(3), 2, Direction::Up);
        assert_eq!(ids(&after), vec![1, 3, 2]);
        assert_eq!(after[1].priority, 2);
        assert_eq!(after[2].priority, 3);
    }

    #[test]
    fn boundary_moves_are_noops() {
        let before = list(3);
        assert_eq!(reorder(&before, 0, Direction::Up), before);
        assert_eq!(reorder(&before, 2, Direction::Down), before);
        assert_eq!(reorder(&before, 7, Direction::Down), before);
    }

    #[test]
    fn empty_and_single_lists() {
        assert!(reorder(&[], 0, Direction::Up).is_empty());
        let single = list(1);
        assert_eq!(reorder(&single, 0, Direction::Down), single);
    }

    #[test]
    fn renumber_repairs_gaps() {
        let mut elements = vec![element(1, 4), element(2, 9)];
        assert!(!is_dense(&elements));
        renumber(&mut elements);
        assert!(is_dense(&elements));
    }

    #[test]
    fn parse_direction() {
        assert_eq!("UP".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("d".parse::<Direction>(), Ok(Direction::Down));
        assert!("sideways".parse::<Direction>().is_err());
    }

    proptest! {
        #[test]
        fn first_up_and_last_down_are_noops(n in 1usize..20) {
            let before = list(n);
            prop_assert_eq!(&reorder(&before, 0, Direction::Up), &before);
            prop_assert_eq!(&reorder(&before, n - 1, Direction::Down), &before);
        }

        #[test]
        fn valid_moves_swap_exactly_two(n in 2usize..20, seed in 0usize..1000, up in any::<bool>()) {
            let before = list(n);
            let (index, direction) = if up {
                (1 + seed % (n - 1), Direction::Up)
            } else {
                (seed % (n - 1), Direction::Down)
            };

            let after = reorder(&before, index, direction);
            let moved: Vec<usize> = (0..n)
                .filter(|&i| before[i].element_id != after[i].element_id)
                .collect();

            prop_assert_eq!(moved.len(), 2);
            prop_assert_eq!(moved[1] - moved[0], 1);
            prop_assert!(is_dense(&after));
        }
    }
}
