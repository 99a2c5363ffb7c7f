mod game;
mod opponent;
mod report;
mod team;

pub use game::*;
pub use opponent::*;
pub use report::*;
pub use team::*;
