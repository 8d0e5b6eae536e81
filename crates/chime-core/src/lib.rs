pub mod constants;
pub mod cooldown;
pub mod cue;
pub mod device;
pub mod engine;
pub mod patch;
pub mod prefs;
pub mod schedule;
pub mod store;

pub use cooldown::*;
pub use cue::*;
pub use device::*;
pub use engine::*;
pub use patch::*;
pub use prefs::*;
pub use schedule::*;
pub use store::*;
