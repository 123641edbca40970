//! Slideshow/carousel controller: index arithmetic, autoplay timing, and the
//! visual-update contract shared by every slider on the site.
//!
//! Each instance owns its own position and timer; instances never interact.
//! The hero banner, the product strip, the video strip, and the embeddable
//! slider are all configurations of the same [`Carousel`] type.

pub mod autoplay;
pub mod controller;
pub mod layout;

pub use autoplay::Autoplay;
pub use controller::{Carousel, Direction, VisualFrame};
pub use layout::{SlideLayout, StripMetrics, StripProbe};
