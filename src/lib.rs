#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;
mod ai;
mod board;
mod chooser;
mod common;
mod config;
mod fleet;
mod game;
mod grid;
#[cfg(feature = "std")]
mod logging;
mod placement;
mod player;
mod ship;
mod shot;

pub use ai::*;
pub use board::*;
pub use chooser::*;
pub use common::*;
pub use config::*;
pub use fleet::*;
pub use game::*;
pub use grid::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, level_from_env, LOG_ENV_VAR};
pub use placement::*;
pub use player::*;
pub use ship::*;
pub use shot::*;
