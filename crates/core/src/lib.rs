pub mod actor;
pub mod config;
pub mod error;
pub mod game;
pub mod journal;
pub mod level;
pub mod replay;
pub mod session;
pub mod state;
pub mod types;

pub use actor::{Actor, EnemyStats, Hero, HeroStats, LootTable, Spell, Treasure, TreasureChest, Weapon};
pub use config::{GameConfig, WinCondition};
pub use error::{ActorError, ConfigError, GameError, LevelError, ReplayError};
pub use game::Game;
pub use journal::{InputJournal, InputRecord};
pub use level::{Dungeon, LevelFile};
pub use replay::*;
pub use session::{InputSource, NullRenderer, Renderer, ScriptedInput, Session};
pub use state::{Cell, GameState, Grid};
pub use types::*;
