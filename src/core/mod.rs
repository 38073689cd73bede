pub mod config;
pub mod constants;
pub mod environment;
pub mod error;
pub mod interaction;
pub mod motion;
pub mod scene;
pub mod visualizer;

pub use config::*;
pub use environment::*;
pub use error::VisualizerError;
pub use interaction::*;
pub use motion::*;
pub use scene::*;
pub use visualizer::*;
