use anyhow::Result;
use std::convert::TryFrom;
use stockrl_tch_agent::{
    vec_to_tensor, Device, Mlp, MlpConfig, OptimizerConfig, QNet, QNetConfig,
};

// Market state: account balance, owned shares and a short price history.
const IN_DIM: i64 = 8;
// Actions: hold, buy, sell.
const N_ACTIONS: i64 = 3;

fn main() -> Result<()> {
    env_logger::init();

    let checkpoint_dir = std::env::temp_dir().join("stockrl").join("ddqn");
    std::fs::create_dir_all(&checkpoint_dir)?;

    let config = QNetConfig::default()
        .q_config(MlpConfig::new(IN_DIM, N_ACTIONS).dropout_p(0.1))
        .opt_config(OptimizerConfig::Adam { lr: 3e-4, wd: 1e-6 })
        .checkpoint_dir(checkpoint_dir.to_str().unwrap())
        .checkpoint_name("ddqn_stock.pt");

    let device = Device::cuda_if_available();
    println!("Device: {:?}", device);

    let mut qnet: QNet<Mlp> = QNet::build(config, device.into());

    let state = (0..IN_DIM).map(|_| fastrand::f32()).collect::<Vec<_>>();
    let obs = vec_to_tensor::<_, f32>(state, true);

    let q = qnet.forward(&obs);
    println!("q-values: {:?}", Vec::<f32>::try_from(&q.flatten(0, -1))?);

    qnet.save_checkpoint()?;
    qnet.load_checkpoint()?;
    println!("checkpoint: {:?}", qnet.checkpoint_path());

    Ok(())
}
