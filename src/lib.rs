pub mod board;
pub mod circuits;
pub mod config;
pub mod error;
pub mod joypad;
pub mod lr35902;
pub mod memory;
pub mod serial;
pub mod video;

#[cfg(test)]
mod tests;

pub use board::Board;
pub use config::{BoardConfig, PowerOnState};
pub use error::DmgError;
pub use memory::cartridge::Cartridge;
