//! Core types for s3notify

mod event;
mod notification;

pub use event::*;
pub use notification::*;
