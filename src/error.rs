use thiserror::Error;

use crate::{Cell, Coord};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board size {size} is out of range ({min}..={max})")]
    BoardSize { size: Coord, min: Coord, max: Coord },
    #[error("initial food {0:?} lies outside the board")]
    FoodOutOfBounds(Cell),
    #[error("initial food {0:?} overlaps the start cell")]
    FoodOnStart(Cell),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Every cell is covered by the snake.
    #[error("no free cell left to place food")]
    BoardFull,
    #[error("snake has no segments")]
    EmptySnake,
    #[error("cell {0:?} lies outside the board")]
    OutOfBounds(Cell),
    #[error("snake segment {0:?} doesn't touch the one before it")]
    Disconnected(Cell),
    #[error("snake overlaps itself at {0:?}")]
    SelfOverlap(Cell),
    #[error("food {0:?} sits on the snake")]
    FoodOnSnake(Cell),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown speed '{0}', expected easy, medium, hard or insane")]
pub struct ParseSpeedError(pub String);
