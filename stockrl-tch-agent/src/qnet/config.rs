use crate::{
    opt::OptimizerConfig,
    util::{CriticLoss, OutDim},
};
use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
/// Configuration of [`QNet`](super::QNet).
pub struct QNetConfig<Q>
where
    Q: OutDim,
{
    pub(super) q_config: Option<Q>,
    pub(super) opt_config: OptimizerConfig,
    pub(super) critic_loss: CriticLoss,
    pub(super) checkpoint_dir: String,
    pub(super) checkpoint_name: String,
}

impl<Q> Default for QNetConfig<Q>
where
    Q: OutDim,
{
    fn default() -> Self {
        Self {
            q_config: None,
            opt_config: OptimizerConfig::default(),
            critic_loss: CriticLoss::SmoothL1,
            checkpoint_dir: "model".to_string(),
            checkpoint_name: "qnet.pt".to_string(),
        }
    }
}

impl<Q> QNetConfig<Q>
where
    Q: DeserializeOwned + Serialize + OutDim,
{
    /// Sets the configuration of the action-value function.
    pub fn q_config(mut self, v: Q) -> Self {
        self.q_config = Some(v);
        self
    }

    /// Sets the output dimension, i.e. the number of actions.
    pub fn out_dim(mut self, v: i64) -> Self {
        match &mut self.q_config {
            None => {}
            Some(q_config) => q_config.set_out_dim(v),
        };
        self
    }

    /// Sets optimizer configuration.
    pub fn opt_config(mut self, v: OptimizerConfig) -> Self {
        self.opt_config = v;
        self
    }

    /// Sets the critic loss.
    pub fn critic_loss(mut self, v: CriticLoss) -> Self {
        self.critic_loss = v;
        self
    }

    /// Sets the directory where the checkpoint file lives.
    ///
    /// The directory is not created on save; it must exist.
    pub fn checkpoint_dir(mut self, v: impl Into<String>) -> Self {
        self.checkpoint_dir = v.into();
        self
    }

    /// Sets the name of the checkpoint file.
    pub fn checkpoint_name(mut self, v: impl Into<String>) -> Self {
        self.checkpoint_name = v.into();
        self
    }

    /// Constructs [`QNetConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`QNetConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
