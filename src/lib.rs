//! A three-layer feedforward network (input, hidden, output) trained by
//! backpropagation with momentum, on top of a small row-major matrix library.

pub mod matrix;
pub mod neural;
pub mod prelude;
pub mod viz;
