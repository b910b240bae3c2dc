//! Multilayer perceptron with saturating activations.
mod base;
mod config;
pub use base::Mlp;
pub use config::MlpConfig;
use tch::nn;

fn mlp(prefix: &str, var_store: &nn::VarStore, config: &MlpConfig) -> nn::SequentialT {
    let mut seq = nn::seq_t();
    let mut in_dim = config.in_dim;
    let p = &(var_store.root() / "mlp");

    for (i, &n) in config.units.iter().enumerate() {
        seq = seq.add(nn::linear(
            p / format!("{}{}", prefix, i + 1),
            in_dim,
            n,
            Default::default(),
        ));
        seq = seq.add_fn(|x| x.tanh());
        in_dim = n;
    }

    seq
}
