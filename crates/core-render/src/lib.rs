//! Rendering: status line composition, frame assembly and terminal output.
//!
//! The host composes a full `Frame` per loop iteration and hands it to
//! `writer::paint`. There is no partial repaint; frames are small and the
//! loop redraws only after a key has been handled.

pub mod frame;
pub mod status;
pub mod writer;

pub use frame::{Cell, CellStyle, Frame, compose_frame};
pub use status::{
    Overlay, StatusContext, StatusSegment, build_status, compose_status, format_status,
    message_overlay,
};
pub use writer::paint;
