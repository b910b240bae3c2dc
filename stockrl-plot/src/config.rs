use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

fn default_window() -> usize {
    100
}

fn default_title() -> String {
    "Running average of previous 100 scores".to_string()
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
/// Configuration of [`LearningCurve`](crate::LearningCurve).
pub struct LearningCurveConfig {
    #[serde(default = "default_window")]
    pub(crate) window: usize,
    #[serde(default = "default_title")]
    pub(crate) title: String,
    #[serde(default = "default_width")]
    pub(crate) width: u32,
    #[serde(default = "default_height")]
    pub(crate) height: u32,
}

impl Default for LearningCurveConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            title: default_title(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl LearningCurveConfig {
    /// Sets the trailing window; each point averages up to `window + 1` scores.
    pub fn window(mut self, v: usize) -> Self {
        self.window = v;
        self
    }

    /// Sets the chart title.
    pub fn title(mut self, v: impl Into<String>) -> Self {
        self.title = v.into();
        self
    }

    /// Sets the image width in pixels.
    pub fn width(mut self, v: u32) -> Self {
        self.width = v;
        self
    }

    /// Sets the image height in pixels.
    pub fn height(mut self, v: u32) -> Self {
        self.height = v;
        self
    }

    /// Constructs [`LearningCurveConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`LearningCurveConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
