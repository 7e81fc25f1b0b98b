pub(crate) mod board;
pub(crate) mod change;
pub(crate) mod hint;
pub(crate) mod line;
pub(crate) mod spawn;
pub(crate) mod tile;
pub(crate) mod transform;
