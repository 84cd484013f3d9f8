pub mod spawner;
pub mod weighted;
