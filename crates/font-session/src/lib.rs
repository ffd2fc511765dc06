//! Pairing session state: the board of selected fonts, the mood and prompt
//! driving suggestions, and dispatch of recommendation calls so that a
//! superseded call never overwrites a newer result.

pub mod board;
pub mod dispatcher;
pub mod slots;

pub use board::{default_size, FontBoard, FontUpdate, DEFAULT_SAMPLE_TEXT};
pub use dispatcher::{Dispatch, RecommendationDispatcher};
pub use slots::ArticleSlots;
