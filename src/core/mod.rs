// src/core/mod.rs

pub mod dom;
pub mod html;
pub mod pause;
pub mod sanitize;

pub use dom::{Node, Page, Rect};
pub use html::HtmlPage;
pub use pause::{NoPause, Pause, TokioPause};
