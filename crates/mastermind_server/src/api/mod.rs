//! REST transport over the game store and stats.

mod dto;
mod error;
mod handlers;
mod router;

pub use dto::{
    GuessRequest, GuessResponse, HintResponse, MessageResponse, NewGameQuery, NewGameResponse,
};
pub use error::ApiError;
pub use router::router;
