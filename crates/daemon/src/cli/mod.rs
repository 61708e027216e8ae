pub mod args;
pub mod op;
pub mod ops;
pub mod ui;

pub use ops::{Daemon, Health, Init, Note, Strength, Version};
