use super::QNetConfig;
use crate::{
    model::{ModelBase, SubModel},
    opt::{Optimizer, OptimizerConfig},
    util::{CriticLoss, OutDim},
};
use anyhow::Result;
use log::{info, trace};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tch::{nn, Device, Reduction, Tensor};

/// Action-value function for a discrete action space.
///
/// The module owns its parameters, optimizer and critic loss. It does not run
/// training steps itself; an external training loop computes a target, asks
/// for the loss and drives [`ModelBase::backward_step`].
///
/// Parameters start randomly initialized and are wholesale-replaced by
/// [`QNet::load_checkpoint`]. Forward passes are valid in either state; the
/// call order of checkpoint operations determines which values are in effect.
pub struct QNet<Q>
where
    Q: SubModel<Output = Tensor>,
    Q::Config: DeserializeOwned + Serialize + OutDim,
{
    device: Device,
    var_store: nn::VarStore,

    // Dimension of the output vector (equal to the number of actions).
    pub(super) out_dim: i64,

    // `<checkpoint_dir>/<checkpoint_name>` from the configuration.
    checkpoint_path: PathBuf,

    // Action-value function
    q: Q,

    // Optimizer
    opt_config: OptimizerConfig,
    opt: Optimizer,

    critic_loss: CriticLoss,
}

impl<Q> QNet<Q>
where
    Q: SubModel<Output = Tensor>,
    Q::Config: DeserializeOwned + Serialize + OutDim,
{
    /// Builds the network on the given device with randomly initialized parameters.
    pub fn build(config: QNetConfig<Q::Config>, device: Device) -> Self {
        let out_dim = config.q_config.as_ref().unwrap().get_out_dim();
        let checkpoint_path = Path::new(&config.checkpoint_dir).join(&config.checkpoint_name);
        let opt_config = config.opt_config.clone();
        let critic_loss = config.critic_loss.clone();
        let var_store = nn::VarStore::new(device);
        let q = Q::build(&var_store, config.q_config.unwrap());

        Self::_build(
            device,
            out_dim,
            checkpoint_path,
            opt_config,
            critic_loss,
            q,
            var_store,
            None,
        )
    }

    fn _build(
        device: Device,
        out_dim: i64,
        checkpoint_path: PathBuf,
        opt_config: OptimizerConfig,
        critic_loss: CriticLoss,
        q: Q,
        mut var_store: nn::VarStore,
        var_store_src: Option<&nn::VarStore>,
    ) -> Self {
        // Optimizer
        let opt = opt_config.build(&var_store).unwrap();

        // Copy var_store
        if let Some(var_store_src) = var_store_src {
            var_store.copy(var_store_src).unwrap();
        }

        Self {
            device,
            out_dim,
            checkpoint_path,
            opt_config,
            critic_loss,
            var_store,
            opt,
            q,
        }
    }

    /// Outputs the action-values given an observation, in inference mode.
    pub fn forward(&self, x: &Q::Input) -> Tensor {
        self.forward_t(x, false)
    }

    /// Outputs the action-values given an observation.
    ///
    /// With `train` set, dropout is active and the output is stochastic for a
    /// nonzero dropout probability.
    pub fn forward_t(&self, x: &Q::Input, train: bool) -> Tensor {
        let a = self.q.forward(x, train);
        debug_assert_eq!(a.size().as_slice()[1], self.out_dim);
        a
    }

    /// Computes the critic loss of predicted against target action-values.
    pub fn loss(&self, pred: &Tensor, tgt: &Tensor) -> Tensor {
        match self.critic_loss {
            CriticLoss::Mse => pred.mse_loss(tgt, Reduction::Mean),
            CriticLoss::SmoothL1 => pred.smooth_l1_loss(tgt, Reduction::Mean, 1.0),
        }
    }

    /// Writes the current parameters to the checkpoint file, overwriting it.
    pub fn save_checkpoint(&self) -> Result<()> {
        self.save(&self.checkpoint_path)
    }

    /// Replaces the current parameters with the contents of the checkpoint file.
    ///
    /// Tensors are materialized on this module's device regardless of the
    /// device used at save time. Fails if the file is absent or if parameter
    /// names or shapes do not match the current architecture.
    pub fn load_checkpoint(&mut self) -> Result<()> {
        let path = self.checkpoint_path.clone();
        self.load(path)
    }

    /// Returns the path of the checkpoint file.
    pub fn checkpoint_path(&self) -> &Path {
        &self.checkpoint_path
    }
}

impl<Q> Clone for QNet<Q>
where
    Q: SubModel<Output = Tensor>,
    Q::Config: DeserializeOwned + Serialize + OutDim,
{
    fn clone(&self) -> Self {
        let device = self.device;
        let out_dim = self.out_dim;
        let checkpoint_path = self.checkpoint_path.clone();
        let opt_config = self.opt_config.clone();
        let critic_loss = self.critic_loss.clone();
        let var_store = nn::VarStore::new(device);
        let q = self.q.clone_with_var_store(&var_store);

        Self::_build(
            device,
            out_dim,
            checkpoint_path,
            opt_config,
            critic_loss,
            q,
            var_store,
            Some(&self.var_store),
        )
    }
}

impl<Q> ModelBase for QNet<Q>
where
    Q: SubModel<Output = Tensor>,
    Q::Config: DeserializeOwned + Serialize + OutDim,
{
    fn backward_step(&mut self, loss: &Tensor) {
        self.opt.backward_step(loss);
    }

    fn get_var_store_mut(&mut self) -> &mut nn::VarStore {
        &mut self.var_store
    }

    fn get_var_store(&self) -> &nn::VarStore {
        &self.var_store
    }

    fn save<T: AsRef<Path>>(&self, path: T) -> Result<()> {
        self.var_store.save(&path)?;
        info!("Save Q-network to {:?}", path.as_ref());
        let vs = self.var_store.variables();
        for (name, _) in vs.iter() {
            trace!("Save variable {}", name);
        }
        Ok(())
    }

    fn load<T: AsRef<Path>>(&mut self, path: T) -> Result<()> {
        self.var_store.load(&path)?;
        info!("Load Q-network from {:?}", path.as_ref());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        mlp::{Mlp, MlpConfig},
        util::track,
    };
    use std::convert::TryFrom;
    use tch::kind::FLOAT_CPU;
    use tempdir::TempDir;

    fn config(in_dim: i64, out_dim: i64) -> QNetConfig<MlpConfig> {
        QNetConfig::default()
            .q_config(MlpConfig::new(in_dim, out_dim))
            .opt_config(OptimizerConfig::Adam { lr: 1e-3, wd: 1e-6 })
    }

    #[test]
    fn test_forward_outputs_one_value_per_action() {
        let qnet: QNet<Mlp> = QNet::build(config(8, 3), Device::Cpu);
        let obs = Tensor::zeros(&[1, 8], FLOAT_CPU);

        let q = qnet.forward(&obs);
        assert_eq!(q.size(), vec![1, 3]);
    }

    #[test]
    fn test_forward_is_deterministic_in_inference_mode() {
        let qnet: QNet<Mlp> = QNet::build(config(8, 3), Device::Cpu);
        let obs = Tensor::randn(&[4, 8], FLOAT_CPU);

        let a = qnet.forward(&obs);
        let b = qnet.forward(&obs);
        assert!(a.allclose(&b, 1e-8, 1e-8, false));
    }

    #[test]
    fn test_checkpoint_roundtrip() -> Result<()> {
        let dir = TempDir::new("qnet")?;
        let config = config(8, 3).checkpoint_dir(dir.path().to_str().unwrap());

        let qnet: QNet<Mlp> = QNet::build(config.clone(), Device::Cpu);
        qnet.save_checkpoint()?;

        let mut restored: QNet<Mlp> = QNet::build(config, Device::Cpu);
        restored.load_checkpoint()?;

        let obs = Tensor::randn(&[2, 8], FLOAT_CPU);
        assert!(qnet.forward(&obs).allclose(&restored.forward(&obs), 1e-6, 1e-6, false));
        Ok(())
    }

    #[test]
    fn test_load_fails_on_missing_checkpoint() -> Result<()> {
        let dir = TempDir::new("qnet")?;
        let config = config(8, 3).checkpoint_dir(dir.path().to_str().unwrap());

        let mut qnet: QNet<Mlp> = QNet::build(config, Device::Cpu);
        assert!(qnet.load_checkpoint().is_err());
        Ok(())
    }

    #[test]
    fn test_load_fails_on_mismatched_architecture() -> Result<()> {
        let dir = TempDir::new("qnet")?;

        let qnet: QNet<Mlp> =
            QNet::build(config(8, 3).checkpoint_dir(dir.path().to_str().unwrap()), Device::Cpu);
        qnet.save_checkpoint()?;

        let mut other: QNet<Mlp> =
            QNet::build(config(8, 4).checkpoint_dir(dir.path().to_str().unwrap()), Device::Cpu);
        assert!(other.load_checkpoint().is_err());
        Ok(())
    }

    #[test]
    fn test_clone_copies_parameters() {
        let qnet: QNet<Mlp> = QNet::build(config(8, 3), Device::Cpu);
        let target = qnet.clone();

        let obs = Tensor::randn(&[2, 8], FLOAT_CPU);
        assert!(qnet.forward(&obs).allclose(&target.forward(&obs), 1e-6, 1e-6, false));
    }

    #[test]
    fn test_track_with_full_tau_copies_parameters() {
        let mut online: QNet<Mlp> = QNet::build(config(8, 3), Device::Cpu);
        let mut target: QNet<Mlp> = QNet::build(config(8, 3), Device::Cpu);

        track(&mut target, &mut online, 1.0);

        let obs = Tensor::randn(&[2, 8], FLOAT_CPU);
        assert!(online.forward(&obs).allclose(&target.forward(&obs), 1e-6, 1e-6, false));
    }

    #[test]
    fn test_backward_step_reduces_loss() {
        let mut qnet: QNet<Mlp> = QNet::build(
            config(8, 3).opt_config(OptimizerConfig::Adam { lr: 1e-2, wd: 0.0 }),
            Device::Cpu,
        );
        let obs = Tensor::randn(&[16, 8], FLOAT_CPU);
        let tgt = Tensor::zeros(&[16, 3], FLOAT_CPU);

        let initial = f64::try_from(qnet.loss(&qnet.forward_t(&obs, true), &tgt)).unwrap();
        for _ in 0..100 {
            let loss = qnet.loss(&qnet.forward_t(&obs, true), &tgt);
            qnet.backward_step(&loss);
        }
        let last = f64::try_from(qnet.loss(&qnet.forward_t(&obs, true), &tgt)).unwrap();

        assert!(last < initial);
    }

    #[test]
    fn test_serde_qnet_config() -> Result<()> {
        let config = config(8, 1)
            .out_dim(3)
            .critic_loss(CriticLoss::Mse)
            .checkpoint_name("ddqn_stock.pt");

        let dir = TempDir::new("qnet_config")?;
        let path = dir.path().join("qnet.yaml");

        config.save(&path)?;
        let config_ = QNetConfig::<MlpConfig>::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }
}
