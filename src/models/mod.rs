mod frame;
mod game;

pub use frame::{Frame, NewFrame};
pub use game::{Game, GameExport, NewGame};
