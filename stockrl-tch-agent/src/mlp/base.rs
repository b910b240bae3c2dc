use super::{mlp, MlpConfig};
use crate::model::SubModel;
use tch::{nn, nn::ModuleT, Device, Tensor};

/// Multilayer perceptron with tanh activations.
///
/// A dropout layer sits between the last hidden activation and the output
/// linear layer; the output layer itself has no activation, so the network
/// emits raw values.
pub struct Mlp {
    config: MlpConfig,
    device: Device,
    seq: nn::SequentialT,
}

impl Mlp {
    fn create_net(var_store: &nn::VarStore, config: &MlpConfig) -> nn::SequentialT {
        let p = &(var_store.root() / "mlp");
        let in_dim = *config.units.last().unwrap_or(&config.in_dim);
        let dropout_p = config.dropout_p;

        mlp("fc", var_store, config)
            .add_fn_t(move |x, train| x.dropout(dropout_p, train))
            .add(nn::linear(
                p / format!("fc{}", config.units.len() + 1),
                in_dim,
                config.out_dim,
                Default::default(),
            ))
    }
}

impl SubModel for Mlp {
    type Config = MlpConfig;
    type Input = Tensor;
    type Output = Tensor;

    fn forward(&self, x: &Self::Input, train: bool) -> Tensor {
        self.seq.forward_t(&x.to(self.device), train)
    }

    fn build(var_store: &nn::VarStore, config: Self::Config) -> Self {
        let device = var_store.device();
        let seq = Self::create_net(var_store, &config);

        Self {
            config,
            device,
            seq,
        }
    }

    fn clone_with_var_store(&self, var_store: &nn::VarStore) -> Self {
        let config = self.config.clone();
        let device = var_store.device();
        let seq = Self::create_net(var_store, &config);

        Self {
            config,
            device,
            seq,
        }
    }
}
