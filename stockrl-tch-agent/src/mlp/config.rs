use crate::util::OutDim;
use serde::{Deserialize, Serialize};

fn default_units() -> Vec<i64> {
    vec![64, 64]
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
/// Configuration of [`Mlp`](super::Mlp).
pub struct MlpConfig {
    pub(super) in_dim: i64,
    #[serde(default = "default_units")]
    pub(super) units: Vec<i64>,
    pub(super) out_dim: i64,
    #[serde(default)]
    pub(super) dropout_p: f64,
}

impl MlpConfig {
    /// Creates a configuration with two hidden layers of 64 units and no dropout.
    pub fn new(in_dim: i64, out_dim: i64) -> Self {
        Self {
            in_dim,
            units: default_units(),
            out_dim,
            dropout_p: 0.0,
        }
    }

    /// Sets the widths of the hidden layers.
    pub fn units(mut self, units: Vec<i64>) -> Self {
        self.units = units;
        self
    }

    /// Sets the dropout probability, in `[0, 1)`, applied before the output layer.
    pub fn dropout_p(mut self, p: f64) -> Self {
        self.dropout_p = p;
        self
    }
}

impl OutDim for MlpConfig {
    fn get_out_dim(&self) -> i64 {
        self.out_dim
    }

    fn set_out_dim(&mut self, out_dim: i64) {
        self.out_dim = out_dim;
    }
}
