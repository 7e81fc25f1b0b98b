use crate::engine::transform::Direction;
use crate::error::Result;

pub(crate) trait EventSource {
    /// Block until the next event the game cares about.
    fn next_event(&mut self) -> Result<Event>;
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Event {
    UserInput(UserInput),
    Resize,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum UserInput {
    Direction(Direction),
    AutoPlay,
    Reset,
    Quit,
}
