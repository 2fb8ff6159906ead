mod action;
mod backend;
mod event;
mod loading;
mod session;
mod textarea;

pub use action::*;
pub use backend::*;
pub use event::*;
pub use loading::*;
pub use session::*;
pub use textarea::*;
