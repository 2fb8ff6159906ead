pub mod actions;
mod app_state;
pub mod events;
mod scroll;

pub use app_state::*;
pub use scroll::*;
