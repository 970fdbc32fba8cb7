use std::collections::VecDeque;

use crate::Cell;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn delta(self) -> Cell {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    /// Inverse of [`Direction::delta`]; `None` unless exactly one axis is a unit step.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        match (dx, dy) {
            (0, -1) => Some(Up),
            (0, 1) => Some(Down),
            (-1, 0) => Some(Left),
            (1, 0) => Some(Right),
            _ => None,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_reverse_of(self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn head_char(self) -> char {
        match self {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

/// Snake body, head first. Bounds are the engine's business, the body only
/// knows how to move and what it covers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    pub fn new(pos: Cell) -> Self {
        Snake { body: VecDeque::from(vec![pos]) }
    }

    /// Builds a body from head-first cells. Returns `None` for an empty slice.
    pub fn from_cells(cells: &[Cell]) -> Option<Self> {
        if cells.is_empty() {
            return None;
        }

        Some(Snake { body: cells.iter().copied().collect() })
    }

    pub fn head(&self) -> Cell {
        // body is never empty, see `new` and `from_cells`
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.body.contains(cell)
    }

    pub fn to_vec(&self) -> Vec<Cell> {
        self.body.iter().copied().collect()
    }

    pub fn next_head(&self, direction: Direction) -> Cell {
        let (hx, hy) = self.head();
        let (dx, dy) = direction.delta();
        (hx + dx, hy + dy)
    }

    /// Pushes `new_head`. Unless `grow` is set the tail is dropped and returned.
    pub fn advance(&mut self, new_head: Cell, grow: bool) -> Option<Cell> {
        self.body.push_front(new_head);

        if grow {
            None
        } else {
            self.body.pop_back()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_pairs() {
        assert!(Up.is_reverse_of(Down));
        assert!(Left.is_reverse_of(Right));
        assert!(!Up.is_reverse_of(Left));
        assert!(!Right.is_reverse_of(Right));
    }

    #[test]
    fn from_delta_rejects_diagonals_and_zero() {
        assert_eq!(Direction::from_delta(1, 0), Some(Right));
        assert_eq!(Direction::from_delta(0, -1), Some(Up));
        assert_eq!(Direction::from_delta(1, 1), None);
        assert_eq!(Direction::from_delta(0, 0), None);
        assert_eq!(Direction::from_delta(2, 0), None);
    }

    #[test]
    fn advance_translates_without_growth() {
        let mut snake = Snake::from_cells(&[(5, 5), (5, 6)]).unwrap();
        let head = snake.next_head(Up);
        assert_eq!(head, (5, 4));

        let old_tail = snake.advance(head, false);
        assert_eq!(old_tail, Some((5, 6)));
        assert_eq!(snake.to_vec(), vec![(5, 4), (5, 5)]);
    }

    #[test]
    fn advance_grows_keeps_tail() {
        let mut snake = Snake::new((2, 2));
        assert_eq!(snake.advance((3, 2), true), None);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), (3, 2));
        assert_eq!(snake.tail(), (2, 2));
    }

    #[test]
    fn empty_body_is_rejected() {
        assert!(Snake::from_cells(&[]).is_none());
    }
}
