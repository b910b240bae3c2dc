use anyhow::Result;
use stockrl_plot::{LearningCurve, LearningCurveConfig};

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::temp_dir().join("stockrl").join("plots");
    std::fs::create_dir_all(&out_dir)?;

    // Episodic returns of a drifting random walk, noisy the way per-episode
    // trading scores are.
    let n_games = 400;
    let mut score = 0.0;
    let mut scores = Vec::with_capacity(n_games);
    for _ in 0..n_games {
        score += fastrand::f64() * 2.0 - 0.95;
        scores.push(score);
    }
    let x: Vec<usize> = (1..=n_games).collect();

    let curve = LearningCurve::new(LearningCurveConfig::default().title("Random-walk returns"));
    let path = out_dir.join("random_walk.png");
    curve.plot(&x, &scores, &path)?;
    println!("wrote {:?}", path);

    Ok(())
}
