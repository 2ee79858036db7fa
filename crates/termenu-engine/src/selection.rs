//! Selection controller
//!
//! Advances the selected index with wrap-around, skipping slots that cannot
//! take focus.

use termenu_core::prelude::*;

use crate::item::{is_selectable_slot, ItemSlot, Redraw};

/// Direction of an Up/Down move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    fn step(self) -> isize {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
        }
    }
}

/// Move `selected` one selectable step in `direction` over `count` slots.
///
/// Visits at most `count` indices, so a list whose only selectable slot is
/// `selected` wraps back to it. Fails when no index is selectable.
pub fn move_selection_by(
    selected: usize,
    direction: Direction,
    count: usize,
    is_selectable: impl Fn(usize) -> bool,
) -> Result<usize> {
    if count == 0 {
        return Err(Error::NoSelectableItems);
    }

    let len = count as isize;
    let mut index = selected.min(count - 1) as isize;
    for _ in 0..count {
        index = (index + direction.step()).rem_euclid(len);
        if is_selectable(index as usize) {
            return Ok(index as usize);
        }
    }
    Err(Error::NoSelectableItems)
}

/// Move the selection over an item list
pub fn move_selection<T>(
    selected: usize,
    direction: Direction,
    items: &[ItemSlot<T>],
) -> Result<usize> {
    move_selection_by(selected, direction, items.len(), |i| {
        is_selectable_slot(&items[i])
    })
}

/// Index of the first selectable slot
pub fn first_selectable<T>(items: &[ItemSlot<T>]) -> Option<usize> {
    items.iter().position(is_selectable_slot)
}

/// Notification handed to hooks when the selection moves.
///
/// Hooks may set `redraw` to override whether the frame is redrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    pub old: usize,
    pub new: usize,
    pub redraw: Redraw,
}

impl SelectionChange {
    pub fn new(old: usize, new: usize) -> Self {
        Self {
            old,
            new,
            redraw: Redraw::UseDefault,
        }
    }

    pub fn changed(&self) -> bool {
        self.old != self.new
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(selectable: &[bool]) -> impl Fn(usize) -> bool + '_ {
        move |i| selectable[i]
    }

    #[test]
    fn test_moves_down_skipping_unselectable() {
        let sel = [true, false, false, true];
        assert_eq!(move_selection_by(0, Direction::Down, 4, pattern(&sel)).unwrap(), 3);
    }

    #[test]
    fn test_wraps_both_ways() {
        let sel = [true, true, true];
        assert_eq!(move_selection_by(2, Direction::Down, 3, pattern(&sel)).unwrap(), 0);
        assert_eq!(move_selection_by(0, Direction::Up, 3, pattern(&sel)).unwrap(), 2);
    }

    #[test]
    fn test_single_selectable_wraps_to_itself() {
        let sel = [false, false, true];
        assert_eq!(move_selection_by(2, Direction::Up, 3, pattern(&sel)).unwrap(), 2);
        assert_eq!(move_selection_by(2, Direction::Down, 3, pattern(&sel)).unwrap(), 2);
    }

    #[test]
    fn test_no_selectable_fails() {
        let sel = [false, false];
        assert!(matches!(
            move_selection_by(0, Direction::Down, 2, pattern(&sel)),
            Err(Error::NoSelectableItems)
        ));
        assert!(matches!(
            move_selection_by(0, Direction::Down, 0, |_| true),
            Err(Error::NoSelectableItems)
        ));
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let patterns: [&[bool]; 4] = [
            &[true],
            &[true, false, true, true, false],
            &[false, false, false, true, false, false],
            &[true, true, false, false, true, false, true],
        ];
        for sel in patterns {
            let count = sel.len();
            for start in (0..count).filter(|&i| sel[i]) {
                for direction in [Direction::Up, Direction::Down] {
                    let mut current = start;
                    let mut returned = false;
                    for _ in 0..count {
                        current = move_selection_by(current, direction, count, pattern(sel)).unwrap();
                        assert!(sel[current]);
                        if current == start {
                            returned = true;
                            break;
                        }
                    }
                    assert!(returned, "did not return to {} in {:?}", start, sel);
                }
            }
        }
    }

    #[test]
    fn test_selection_change() {
        let change = SelectionChange::new(1, 1);
        assert!(!change.changed());
        assert_eq!(change.redraw, Redraw::UseDefault);
        assert!(SelectionChange::new(0, 2).changed());
    }
}
