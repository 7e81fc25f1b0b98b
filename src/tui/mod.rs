pub(crate) mod colors;
pub(crate) mod crossterm;
pub(crate) mod events;
pub(crate) mod frame;
pub(crate) mod renderer;
