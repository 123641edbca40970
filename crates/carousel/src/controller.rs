use crate::layout::{SlideLayout, StripProbe};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// The single visual update produced by a successful transition. The frame
/// carries the complete target state so the sink can apply it in one step;
/// observers never see two active slides or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualFrame {
    /// Mark the slide and indicator dot at `index` active, all others
    /// inactive.
    Activate { index: usize, slide_count: usize },
    /// Translate the strip wrapper by `offset_px` against the scroll axis.
    Translate { offset_px: u32 },
}

/// A slideshow position with wraparound navigation.
///
/// `current_index` always stays within `0..position_count()` while positions
/// exist. [`Carousel::advance`] wraps in both directions;
/// [`Carousel::go_to`] clamps, because a dot index is an identity rather
/// than a delta. Strip layouts re-measure the viewport on every transition.
pub struct Carousel {
    layout: SlideLayout,
    current_index: usize,
}

impl Carousel {
    pub fn fixed(slide_count: usize) -> Self {
        Self {
            layout: SlideLayout::Fixed { slide_count },
            current_index: 0,
        }
    }

    pub fn strip(probe: impl StripProbe + Send + Sync + 'static) -> Self {
        Self {
            layout: SlideLayout::Strip {
                probe: Box::new(probe),
            },
            current_index: 0,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Reachable positions at this instant (strips re-measure).
    pub fn position_count(&self) -> usize {
        self.layout.position_count()
    }

    /// Step one position forward or backward with wraparound. Backward from
    /// index 0 lands on the last reachable position, never below zero.
    /// Returns the visual frame to apply, or `None` when no position is
    /// reachable and the index stays pinned at 0.
    pub fn advance(&mut self, direction: Direction) -> Option<VisualFrame> {
        let positions = self.layout.position_count();
        if positions == 0 {
            self.current_index = 0;
            return None;
        }
        // A shrink since the last transition may have stranded the index
        // beyond the reachable range; re-enter it before stepping.
        let index = self.current_index.min(positions - 1);
        self.current_index = match direction {
            Direction::Forward => (index + 1) % positions,
            Direction::Backward => (index + positions - 1) % positions,
        };
        Some(self.frame())
    }

    /// Jump straight to `index`, clamped into the reachable range. Returns
    /// `None` when no position is reachable.
    pub fn go_to(&mut self, index: usize) -> Option<VisualFrame> {
        let positions = self.layout.position_count();
        if positions == 0 {
            self.current_index = 0;
            return None;
        }
        self.current_index = index.min(positions - 1);
        Some(self.frame())
    }

    fn frame(&self) -> VisualFrame {
        match &self.layout {
            SlideLayout::Fixed { slide_count } => VisualFrame::Activate {
                index: self.current_index,
                slide_count: *slide_count,
            },
            SlideLayout::Strip { probe } => {
                let stride = probe.metrics().stride();
                VisualFrame::Translate {
                    offset_px: self.current_index as u32 * stride,
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
