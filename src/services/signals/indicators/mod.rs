//! Technical indicator implementations.

pub mod bollinger;
pub mod macd;
pub mod moving_averages;
pub mod rsi;
pub mod volume;

pub use bollinger::BollingerBands;
pub use macd::Macd;
pub use moving_averages::MovingAverages;
pub use rsi::Rsi;
pub use volume::VolumeTrend;
