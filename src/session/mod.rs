pub mod game;
pub mod input;
pub mod round;
pub mod schedule;
