pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod logger;
pub mod snake;
pub mod speed;

pub type Coord = i32;
/// Board cell as `(x, y)`, with `(0, 0)` in the top left corner.
pub type Cell = (Coord, Coord);

pub use config::EngineConfig;
pub use engine::{Crash, GameEngine, GameState, Phase, TickOutcome};
pub use error::{ConfigError, EngineError};
pub use snake::Direction;
pub use speed::SpeedProfile;
