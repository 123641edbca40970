//! Host-page logic for the marketing site: one event-driven controller that
//! wires the three sliders, the scripted chat widget, the comment board, the
//! video modal, and navigation tracking. Rendering is behind the
//! [`VisualSink`] trait so the same controller drives any surface.

pub mod chat;
pub mod comments;
pub mod content;
pub mod controller;
pub mod events;
pub mod modal;
pub mod nav;
pub mod notify;

pub use chat::ChatResponder;
pub use comments::CommentBoard;
pub use content::SiteClient;
pub use controller::{PageConfig, PageController, Reaction, VisualSink};
pub use events::{PageEvent, SectionKind};
pub use modal::VideoModal;
pub use notify::{Notice, NoticeKind, NoticeQueue};
