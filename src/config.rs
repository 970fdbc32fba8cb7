use crate::{error::ConfigError, Cell, Coord};

pub const DEFAULT_BOARD_SIZE: Coord = 20;
pub const MIN_BOARD_SIZE: Coord = 2;
pub const MAX_BOARD_SIZE: Coord = 100;

/// Immutable board setup handed to the engine at construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    board_size: Coord,
    initial_food: Cell,
}

impl EngineConfig {
    pub fn new(board_size: Coord) -> Result<Self, ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&board_size) {
            return Err(ConfigError::BoardSize {
                size: board_size,
                min: MIN_BOARD_SIZE,
                max: MAX_BOARD_SIZE,
            });
        }

        let start = board_size / 2;
        let mut food = (board_size * 3 / 4).min(board_size - 1);
        if food == start {
            // Only happens on tiny boards
            food = if start > 0 { start - 1 } else { start + 1 };
        }

        Ok(EngineConfig { board_size, initial_food: (food, food) })
    }

    pub fn with_initial_food(self, food: Cell) -> Result<Self, ConfigError> {
        if !self.in_bounds(food) {
            return Err(ConfigError::FoodOutOfBounds(food));
        }
        if food == self.start_cell() {
            return Err(ConfigError::FoodOnStart(food));
        }

        Ok(EngineConfig { initial_food: food, ..self })
    }

    pub fn board_size(&self) -> Coord {
        self.board_size
    }

    pub fn initial_food(&self) -> Cell {
        self.initial_food
    }

    pub fn start_cell(&self) -> Cell {
        (self.board_size / 2, self.board_size / 2)
    }

    pub fn cell_count(&self) -> usize {
        (self.board_size * self.board_size) as usize
    }

    pub fn in_bounds(&self, (x, y): Cell) -> bool {
        (0..self.board_size).contains(&x) && (0..self.board_size).contains(&y)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig { board_size: DEFAULT_BOARD_SIZE, initial_food: (15, 15) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_board() {
        let config = EngineConfig::default();
        assert_eq!(config.board_size(), 20);
        assert_eq!(config.start_cell(), (10, 10));
        assert_eq!(config.initial_food(), (15, 15));
        assert_eq!(EngineConfig::new(20).unwrap(), config);
    }

    #[test]
    fn rejects_out_of_range_sizes() {
        assert!(matches!(EngineConfig::new(1), Err(ConfigError::BoardSize { size: 1, .. })));
        assert!(EngineConfig::new(MAX_BOARD_SIZE + 1).is_err());
        assert!(EngineConfig::new(MIN_BOARD_SIZE).is_ok());
    }

    #[test]
    fn initial_food_never_on_start() {
        for size in MIN_BOARD_SIZE..=12 {
            let config = EngineConfig::new(size).unwrap();
            assert!(config.in_bounds(config.initial_food()), "size {}", size);
            assert_ne!(config.initial_food(), config.start_cell(), "size {}", size);
        }
    }

    #[test]
    fn custom_food_is_validated() {
        let config = EngineConfig::default();
        assert_eq!(config.with_initial_food((0, 0)).unwrap().initial_food(), (0, 0));
        assert_eq!(config.with_initial_food((20, 0)), Err(ConfigError::FoodOutOfBounds((20, 0))));
        assert_eq!(config.with_initial_food((10, 10)), Err(ConfigError::FoodOnStart((10, 10))));
    }
}
