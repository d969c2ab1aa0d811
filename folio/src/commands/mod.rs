pub mod compose;
pub mod send;
