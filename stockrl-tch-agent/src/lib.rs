//! Value networks for stock-trading RL agents implemented with [tch](https://crates.io/crates/tch).
mod mlp;
mod model;
mod opt;
mod qnet;
mod util;
use serde::{Deserialize, Serialize};

pub use mlp::{Mlp, MlpConfig};
pub use model::{ModelBase, SubModel};
pub use opt::{Optimizer, OptimizerConfig};
pub use qnet::{QNet, QNetConfig};
pub use util::{track, vec_to_tensor, CriticLoss, OutDim};

#[derive(Clone, Debug, Copy, Deserialize, Serialize, PartialEq)]
/// Device on which a network keeps its parameters.
///
/// This enum is added because [`tch::Device`] does not support serialization.
pub enum Device {
    /// The main CPU device.
    Cpu,

    /// The main GPU device.
    Cuda(usize),
}

impl Device {
    /// Returns a Cuda device if available, otherwise the Cpu device.
    pub fn cuda_if_available() -> Self {
        tch::Device::cuda_if_available().into()
    }
}

impl From<tch::Device> for Device {
    fn from(device: tch::Device) -> Self {
        match device {
            tch::Device::Cpu => Self::Cpu,
            tch::Device::Cuda(n) => Self::Cuda(n),
            _ => unimplemented!(),
        }
    }
}

impl Into<tch::Device> for Device {
    fn into(self) -> tch::Device {
        match self {
            Self::Cpu => tch::Device::Cpu,
            Self::Cuda(n) => tch::Device::Cuda(n),
        }
    }
}
