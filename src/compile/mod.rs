pub mod compiler;
pub mod style;
