//! Terminal Pac-Man: a fixed maze, a pellet-collecting player, and ghosts
//! with simple chase/bounce movement, drawn with crossterm.
//!
//! Game logic lives in [`level`], [`player`], [`ghost`], and [`game`] and is
//! pure apart from an `impl Rng` parameter, so a seeded RNG reproduces a run
//! exactly. Terminal concerns live in [`render`] and the binary.

pub mod game;
pub mod ghost;
pub mod level;
pub mod player;
pub mod render;
