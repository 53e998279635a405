//! Widget interaction core
//!
//! Pointer dragging, the capture/passthrough state machine and the
//! dispatcher that composes them with the persisted models.

pub mod dispatcher;
pub mod events;
pub mod passthrough;
pub mod position;

pub use dispatcher::{Widget, WidgetContext, WidgetView};
pub use events::{WidgetEffect, WidgetEvent};
pub use passthrough::{MouseMode, PassthroughCoordinator, PassthroughInput};
pub use position::{DragRefusal, PointerTarget, PositionController};
