pub mod eval;
pub mod list;
