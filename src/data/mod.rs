pub mod axis;
pub mod density;
pub mod series;
pub mod spectrogram;
pub mod stats;
