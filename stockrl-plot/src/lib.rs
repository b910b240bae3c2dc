//! Learning-curve plotting for episodic training runs.
mod config;
pub use config::LearningCurveConfig;

use anyhow::Result;
use log::info;
use plotters::prelude::*;
use std::{ops::Range, path::Path};

/// Trailing running average over a score series.
///
/// Element `i` is the arithmetic mean of `scores[i - window ..= i]`, clipped
/// at the start of the series, so each point averages up to `window + 1`
/// entries and never indexes before the first score.
pub fn running_average(scores: &[f64], window: usize) -> Vec<f64> {
    scores
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let w = &scores[i.saturating_sub(window)..=i];
            w.iter().sum::<f64>() / w.len() as f64
        })
        .collect()
}

/// Renders smoothed learning curves of episodic training runs.
pub struct LearningCurve {
    config: LearningCurveConfig,
}

impl LearningCurve {
    pub fn new(config: LearningCurveConfig) -> Self {
        Self { config }
    }

    /// Plots episode indices against the running average of the scores and
    /// writes the image to `path`, overwriting any existing file.
    ///
    /// `x` and `scores` are parallel slices of equal length. The parent
    /// directory of `path` must already exist; it is not created here.
    pub fn plot(&self, x: &[usize], scores: &[f64], path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let avg = running_average(scores, self.config.window);
        let points: Vec<(f64, f64)> = avg
            .iter()
            .enumerate()
            .map(|(i, &y)| (x[i] as f64, y))
            .collect();
        let (x_range, y_range) = axis_ranges(&points);

        let size = (self.config.width, self.config.height);
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.config.title, ("sans-serif", 22))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_range)?;
        chart
            .configure_mesh()
            .x_desc("episode")
            .y_desc("score")
            .draw()?;
        chart.draw_series(LineSeries::new(points, &BLUE))?;

        root.present()?;
        info!("Save learning curve to {:?}", path);
        Ok(())
    }
}

/// Plots a learning curve with the default configuration.
pub fn plot_learning_curve(x: &[usize], scores: &[f64], path: impl AsRef<Path>) -> Result<()> {
    LearningCurve::new(LearningCurveConfig::default()).plot(x, scores, path)
}

fn axis_ranges(points: &[(f64, f64)]) -> (Range<f64>, Range<f64>) {
    if points.is_empty() {
        return (0.0..1.0, 0.0..1.0);
    }

    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    // Pad the value axis so a flat curve still gets a nonempty range.
    let pad = (y_max - y_min).abs().max(1.0) * 0.05;
    (
        x_min..x_max.max(x_min + 1.0),
        (y_min - pad)..(y_max + pad),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_running_average_of_constant_scores() {
        let scores = vec![1.0; 250];
        for v in running_average(&scores, 100) {
            assert!((v - 1.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_running_average_matches_prefix_means_under_window() {
        let scores: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let avg = running_average(&scores, 100);

        for (i, &v) in avg.iter().enumerate() {
            let expected = scores[..=i].iter().sum::<f64>() / (i + 1) as f64;
            assert!((v - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_running_average_window_boundary() {
        let scores: Vec<f64> = (0..150).map(|i| (i * i) as f64).collect();
        let avg = running_average(&scores, 100);

        // Below the window the mean runs from the start of the series.
        let expected = scores[0..=99].iter().sum::<f64>() / 100.0;
        assert!((avg[99] - expected).abs() < 1e-9);

        // From index `window` on, exactly `window + 1` trailing entries.
        let expected = scores[20..=120].iter().sum::<f64>() / 101.0;
        assert!((avg[120] - expected).abs() < 1e-9);
    }

    #[test]
    fn test_plot_writes_image() -> Result<()> {
        let dir = TempDir::new("plot")?;
        let path = dir.path().join("learning_curve.png");

        let x: Vec<usize> = (1..=200).collect();
        let scores: Vec<f64> = (0..200)
            .map(|i| (i as f64).sin() * 10.0 + i as f64 / 10.0)
            .collect();
        plot_learning_curve(&x, &scores, &path)?;

        assert!(path.exists());
        Ok(())
    }

    #[test]
    fn test_plot_fails_when_directory_is_missing() -> Result<()> {
        let dir = TempDir::new("plot")?;
        let path = dir.path().join("missing").join("learning_curve.png");

        let x: Vec<usize> = (1..=10).collect();
        let scores = vec![1.0; 10];
        assert!(plot_learning_curve(&x, &scores, &path).is_err());
        Ok(())
    }
}
