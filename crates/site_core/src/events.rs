//! UI events the host surface feeds into the page controller.

/// Which slider an event belongs to. Each section owns its own carousel and
/// timer; events for one never touch another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Hero,
    Products,
    Videos,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// Autoplay timer fired for a section.
    AutoplayTick(SectionKind),
    PrevClicked(SectionKind),
    NextClicked(SectionKind),
    DotClicked(SectionKind, usize),
    HoverEntered(SectionKind),
    HoverLeft(SectionKind),
    VideoThumbnailClicked(String),
    ModalCloseClicked,
    ModalBackdropClicked,
    EscapePressed,
    ChatSubmitted(String),
    CommentSubmitted(String),
    UpvoteClicked(usize),
    Scrolled(u32),
}
