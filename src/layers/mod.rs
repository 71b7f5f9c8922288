pub mod dense;

pub use dense::{DenseLayer, LayerCache, LayerGradients};
