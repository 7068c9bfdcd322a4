pub mod gbm;

pub use gbm::{Gbm, ModelParams, PathSimulator};
