//! Frame-driven animation for the showcase objects and page text.

pub mod channels;
pub mod driver;
pub mod easing;
pub mod entrance;
pub mod pose;
pub mod reveal;
pub mod smoothing;
pub mod timer;
