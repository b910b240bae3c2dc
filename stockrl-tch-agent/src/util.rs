//! Utilities.
use crate::model::ModelBase;
use log::trace;
use num_traits::cast::AsPrimitive;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use tch::Tensor;

/// Critic loss type.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub enum CriticLoss {
    /// Mean squared error.
    Mse,

    /// Smooth L1 loss.
    SmoothL1,
}

/// Apply soft update on variables.
///
/// Variables are identified by their names.
///
/// dest = tau * src + (1.0 - tau) * dest
pub fn track<M: ModelBase>(dest: &mut M, src: &mut M, tau: f64) {
    let src = &mut src.get_var_store().variables();
    let dest = &mut dest.get_var_store().variables();
    debug_assert_eq!(src.len(), dest.len());

    let names = src.keys();
    tch::no_grad(|| {
        for name in names {
            let src = src.get(name).unwrap();
            let dest = dest.get_mut(name).unwrap();
            dest.copy_(&(tau * src + (1.0 - tau) * &*dest));
        }
    });
    trace!("soft update");
}

/// Interface for handling output dimensions.
pub trait OutDim {
    /// Returns the output dimension.
    fn get_out_dim(&self) -> i64;

    /// Sets the output dimension.
    fn set_out_dim(&mut self, v: i64);
}

/// Converts an observation vector to [`Tensor`].
///
/// [`Tensor`]: https://docs.rs/tch/0.16.0/tch/struct.Tensor.html
pub fn vec_to_tensor<T1, T2>(v: Vec<T1>, add_batch_dim: bool) -> Tensor
where
    T1: AsPrimitive<T2>,
    T2: Copy + 'static + tch::kind::Element,
{
    let v = v.iter().map(|e| e.as_()).collect::<Vec<_>>();
    let t: Tensor = TryFrom::<Vec<T2>>::try_from(v).unwrap();

    match add_batch_dim {
        true => t.unsqueeze(0),
        false => t,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_to_tensor() {
        let t = vec_to_tensor::<_, f32>(vec![0.1f64, 0.2, 0.3], true);
        assert_eq!(t.size(), vec![1, 3]);

        let t = vec_to_tensor::<_, f32>(vec![1u8, 2, 3, 4], false);
        assert_eq!(t.size(), vec![4]);
        assert_eq!(t.kind(), tch::Kind::Float);
    }
}
