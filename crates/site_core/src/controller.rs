//! The page controller: reducer-style state transitions driven by UI events.
//!
//! Every slider section owns its own carousel and timer; the controller only
//! routes events to the right instance and applies the stop-navigate-start
//! pattern that keeps autoplay from firing right after user input.

use std::time::Duration;

use carousel::{Autoplay, Carousel, Direction, StripProbe, VisualFrame};
use tokio::sync::mpsc;
use tracing::debug;

use crate::{
    chat::ChatResponder,
    comments::CommentBoard,
    events::{PageEvent, SectionKind},
    modal::VideoModal,
    nav::{self, Section},
    notify::{Notice, NoticeQueue},
};

/// Where visual updates land. Exactly one frame is applied per successful
/// transition; the frame carries complete target state, so the surface never
/// shows an in-between.
pub trait VisualSink {
    fn apply(&mut self, section: SectionKind, frame: VisualFrame);
}

#[derive(Debug, Clone)]
pub struct PageConfig {
    pub hero_slide_count: usize,
    pub hero_interval: Duration,
    pub products_interval: Duration,
}

impl PageConfig {
    /// The live site's timings: hero rotates every 5 s, products every 8 s,
    /// videos only by hand.
    pub fn with_defaults(hero_slide_count: usize) -> Self {
        Self {
            hero_slide_count,
            hero_interval: Duration::from_secs(5),
            products_interval: Duration::from_secs(8),
        }
    }
}

/// Non-visual outcomes of an event, for the host to render as it sees fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    ChatReply { visitor: String, reply: String },
    CommentPosted { index: usize },
    VoteRecorded { index: usize, votes: u32 },
    VideoOpened(String),
    VideoClosed,
    ActiveSectionChanged(String),
}

struct SliderSection {
    carousel: Carousel,
    autoplay: Option<Autoplay>,
}

pub struct PageController<S: VisualSink> {
    hero: SliderSection,
    products: SliderSection,
    videos: SliderSection,
    chat: ChatResponder,
    comments: CommentBoard,
    modal: VideoModal,
    notices: NoticeQueue,
    sections: Vec<Section>,
    active_section: Option<String>,
    sink: S,
    events_tx: mpsc::UnboundedSender<PageEvent>,
}

impl<S: VisualSink> PageController<S> {
    /// Build the controller and start the hero and product timers. Must be
    /// called inside a tokio runtime; ticks arrive as
    /// [`PageEvent::AutoplayTick`] on the channel behind `events_tx`.
    pub fn new(
        config: PageConfig,
        product_probe: impl StripProbe + Send + Sync + 'static,
        video_probe: impl StripProbe + Send + Sync + 'static,
        sink: S,
        events_tx: mpsc::UnboundedSender<PageEvent>,
    ) -> Self {
        let mut controller = Self {
            hero: SliderSection {
                carousel: Carousel::fixed(config.hero_slide_count),
                autoplay: Some(Autoplay::new(config.hero_interval)),
            },
            products: SliderSection {
                carousel: Carousel::strip(product_probe),
                autoplay: Some(Autoplay::new(config.products_interval)),
            },
            videos: SliderSection {
                carousel: Carousel::strip(video_probe),
                autoplay: None,
            },
            chat: ChatResponder::new(),
            comments: CommentBoard::new(),
            modal: VideoModal::new(),
            notices: NoticeQueue::new(8),
            sections: Vec::new(),
            active_section: None,
            sink,
            events_tx,
        };
        controller.start_autoplay(SectionKind::Hero);
        controller.start_autoplay(SectionKind::Products);
        controller
    }

    /// Register the page's section offsets for scroll tracking.
    pub fn set_sections(&mut self, sections: Vec<Section>) {
        self.sections = sections;
    }

    pub fn current_index(&self, kind: SectionKind) -> usize {
        self.section(kind).carousel.current_index()
    }

    pub fn autoplay_running(&self, kind: SectionKind) -> bool {
        self.section(kind)
            .autoplay
            .as_ref()
            .is_some_and(Autoplay::is_running)
    }

    pub fn comments(&self) -> &CommentBoard {
        &self.comments
    }

    pub fn open_video(&self) -> Option<&str> {
        self.modal.open_video()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    pub fn handle_event(&mut self, event: PageEvent) -> Vec<Reaction> {
        debug!(?event, "page event");
        match event {
            PageEvent::AutoplayTick(kind) => {
                self.apply_transition(kind, |carousel| carousel.advance(Direction::Forward));
                Vec::new()
            }
            PageEvent::NextClicked(kind) => {
                self.navigate(kind, |carousel| carousel.advance(Direction::Forward));
                Vec::new()
            }
            PageEvent::PrevClicked(kind) => {
                self.navigate(kind, |carousel| carousel.advance(Direction::Backward));
                Vec::new()
            }
            PageEvent::DotClicked(kind, index) => {
                self.navigate(kind, move |carousel| carousel.go_to(index));
                Vec::new()
            }
            PageEvent::HoverEntered(kind) => {
                self.stop_autoplay(kind);
                Vec::new()
            }
            PageEvent::HoverLeft(kind) => {
                self.start_autoplay(kind);
                Vec::new()
            }
            PageEvent::VideoThumbnailClicked(video_id) => {
                self.modal.open(video_id.clone());
                vec![Reaction::VideoOpened(video_id)]
            }
            PageEvent::ModalCloseClicked
            | PageEvent::ModalBackdropClicked
            | PageEvent::EscapePressed => {
                if self.modal.close() {
                    vec![Reaction::VideoClosed]
                } else {
                    Vec::new()
                }
            }
            PageEvent::ChatSubmitted(message) => match self.chat.reply(&message) {
                Some(reply) => vec![Reaction::ChatReply {
                    visitor: message.trim().to_string(),
                    reply: reply.to_string(),
                }],
                None => Vec::new(),
            },
            PageEvent::CommentSubmitted(body) => match self.comments.submit(&body) {
                Some(index) => {
                    self.notices
                        .push(Notice::success("Comment submitted successfully!"));
                    vec![Reaction::CommentPosted { index }]
                }
                None => Vec::new(),
            },
            PageEvent::UpvoteClicked(index) => match self.comments.upvote(index) {
                Some(votes) => vec![Reaction::VoteRecorded { index, votes }],
                None => Vec::new(),
            },
            PageEvent::Scrolled(scroll_y) => {
                let current = nav::active_section(&self.sections, scroll_y).map(str::to_string);
                if current != self.active_section {
                    self.active_section = current.clone();
                    if let Some(id) = current {
                        return vec![Reaction::ActiveSectionChanged(id)];
                    }
                }
                Vec::new()
            }
        }
    }

    /// Manual navigation: reset the autoplay clock around the transition so
    /// a tick never lands right after user input.
    fn navigate(
        &mut self,
        kind: SectionKind,
        transition: impl FnOnce(&mut Carousel) -> Option<VisualFrame>,
    ) {
        self.stop_autoplay(kind);
        self.apply_transition(kind, transition);
        self.start_autoplay(kind);
    }

    fn apply_transition(
        &mut self,
        kind: SectionKind,
        transition: impl FnOnce(&mut Carousel) -> Option<VisualFrame>,
    ) {
        let frame = transition(&mut self.section_mut(kind).carousel);
        if let Some(frame) = frame {
            self.sink.apply(kind, frame);
        }
    }

    fn start_autoplay(&mut self, kind: SectionKind) {
        let events_tx = self.events_tx.clone();
        if let Some(autoplay) = self.section_mut(kind).autoplay.as_mut() {
            autoplay.start(events_tx, PageEvent::AutoplayTick(kind));
        }
    }

    fn stop_autoplay(&mut self, kind: SectionKind) {
        if let Some(autoplay) = self.section_mut(kind).autoplay.as_mut() {
            autoplay.stop();
        }
    }

    fn section(&self, kind: SectionKind) -> &SliderSection {
        match kind {
            SectionKind::Hero => &self.hero,
            SectionKind::Products => &self.products,
            SectionKind::Videos => &self.videos,
        }
    }

    fn section_mut(&mut self, kind: SectionKind) -> &mut SliderSection {
        match kind {
            SectionKind::Hero => &mut self.hero,
            SectionKind::Products => &mut self.products,
            SectionKind::Videos => &mut self.videos,
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
