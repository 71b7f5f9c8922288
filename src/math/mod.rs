pub mod matrix;
pub mod softmax;

pub use matrix::Matrix;
pub use softmax::{argmax, log_softmax, softmax, softmax_rows};
