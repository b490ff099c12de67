// src/editor/elevation.rs

use crate::editor::commands::{Action, ClickTarget, ElevationKey};
use crate::profile::ScreenLayout;

/// A viewport-local square with its target elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElevatedSquare {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

/// Key presses and clicks that apply one page's elevations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElevationPass {
    pub actions: Vec<Action>,
    /// Distinct elevations visited, ascending.
    pub levels: Vec<i64>,
    /// Cursor elevation after the pass; seeds the next page.
    pub final_height: i64,
}

impl ElevationPass {
    pub fn key_presses(&self) -> usize {
        self.actions.iter().filter(|action| !action.is_click()).count()
    }

    pub fn clicks(&self) -> usize {
        self.actions.iter().filter(|action| action.is_click()).count()
    }
}

/// Presses that move the elevation cursor from `current` to `target`.
pub fn height_keys(current: i64, target: i64) -> impl Iterator<Item = Action> {
    let key = if target >= current { ElevationKey::Raise } else { ElevationKey::Lower };
    let presses = (target - current).unsigned_abs() as usize;
    std::iter::repeat(Action::key(key)).take(presses)
}

/// Walks the elevation cursor through every level on the page, lowest first,
/// clicking the squares of each level once the cursor reaches it. Squares
/// with a negative elevation are left alone.
pub fn sequence_elevation(squares: &[ElevatedSquare], start_height: i64, layout: &ScreenLayout) -> ElevationPass {
    let mut levels: Vec<i64> = squares.iter().map(|sq| sq.z).filter(|&z| z >= 0).collect();
    levels.sort_unstable();
    levels.dedup();

    let mut actions = Vec::new();
    let mut height = start_height;
    for &level in &levels {
        actions.extend(height_keys(height, level));
        height = level;
        for square in squares.iter().filter(|sq| sq.z == level) {
            actions.push(Action::click(
                layout.cell_position(square.x, square.y),
                ClickTarget::Cell { x: square.x, y: square.y },
            ));
        }
    }

    ElevationPass {
        actions,
        levels,
        final_height: height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: i64, y: i64, z: i64) -> ElevatedSquare {
        ElevatedSquare { x, y, z }
    }

    fn layout() -> ScreenLayout {
        ScreenLayout::builtin().unwrap()
    }

    #[test]
    fn test_skips_unset_and_counts_presses() {
        let squares = [square(0, 0, -1), square(1, 0, 2), square(2, 0, 2), square(3, 0, 5)];
        let pass = sequence_elevation(&squares, 2, &layout());
        assert_eq!(pass.levels, vec![2, 5]);
        assert_eq!(pass.key_presses(), 3);
        assert_eq!(pass.clicks(), 3);
        assert_eq!(pass.final_height, 5);
        assert!(!pass.actions.iter().any(|action| matches!(
            action,
            Action::Click { target: ClickTarget::Cell { x: 0, y: 0 }, .. }
        )));
    }

    #[test]
    fn test_lowers_to_first_level_then_raises() {
        let squares = [square(0, 0, 7), square(1, 1, 3)];
        let pass = sequence_elevation(&squares, 10, &layout());
        let keys: Vec<char> = pass
            .actions
            .iter()
            .filter_map(|action| match action {
                Action::Key { key } => Some(key.symbol()),
                _ => None,
            })
            .collect();
        assert_eq!(keys.iter().filter(|&&k| k == '-').count(), 7);
        assert_eq!(keys.iter().filter(|&&k| k == '+').count(), 4);
        // All lowering happens before any raising.
        let first_raise = keys.iter().position(|&k| k == '+').unwrap();
        assert!(keys[..first_raise].iter().all(|&k| k == '-'));
        assert_eq!(pass.final_height, 7);
    }

    #[test]
    fn test_levels_visited_in_ascending_order() {
        let squares = [square(0, 0, 9), square(1, 0, 1), square(2, 0, 4), square(3, 0, 1)];
        let layout = layout();
        let pass = sequence_elevation(&squares, 0, &layout);
        let mut height = 0;
        let mut visited = Vec::new();
        for action in &pass.actions {
            match action {
                Action::Key { key: ElevationKey::Raise } => height += 1,
                Action::Key { key: ElevationKey::Lower } => height -= 1,
                Action::Click { target: ClickTarget::Cell { x, y }, .. } => {
                    let sq = squares.iter().find(|sq| sq.x == *x && sq.y == *y).unwrap();
                    assert_eq!(sq.z, height);
                    if visited.last() != Some(&height) {
                        visited.push(height);
                    }
                }
                _ => unreachable!(),
            }
        }
        assert_eq!(visited, vec![1, 4, 9]);
    }

    #[test]
    fn test_page_without_elevations_keeps_start_height() {
        let pass = sequence_elevation(&[square(0, 0, -1)], 12, &layout());
        assert!(pass.actions.is_empty());
        assert_eq!(pass.final_height, 12);
    }

    #[test]
    fn test_height_keys() {
        assert_eq!(height_keys(3, 3).count(), 0);
        assert!(height_keys(3, 1).all(|a| a == Action::key(ElevationKey::Lower)));
        assert_eq!(height_keys(-2, 2).count(), 4);
    }
}
