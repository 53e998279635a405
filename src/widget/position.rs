//! Widget position and pointer dragging
//!
//! A drag records the offset between the pointer and the widget's top-left
//! corner, then moves the widget so that offset is preserved. There is no
//! bounds clamping; the widget may be dragged partially or fully off-screen.

use crate::config::models::Position;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What the pointer went down on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PointerTarget {
    /// The widget body (drag surface)
    #[default]
    Surface,
    /// An interactive control such as a button
    Control,
}

/// Why a drag was not started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragRefusal {
    /// Position lock is on
    Locked,
    /// The settings panel is open
    SettingsOpen,
    /// Pointer went down on a control
    Control,
    /// A drag is already running
    AlreadyDragging,
}

/// Current position plus the in-flight drag, if any
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionController {
    position: Position,
    anchor: Option<Position>,
}

impl PositionController {
    /// Controller at `position`, not dragging
    pub fn new(position: Position) -> Self {
        Self {
            position,
            anchor: None,
        }
    }

    /// Current top-left corner
    pub fn position(&self) -> Position {
        self.position
    }

    /// Pointer offset recorded at drag start
    pub fn anchor(&self) -> Option<Position> {
        self.anchor
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    /// Start a drag at `pointer`
    pub fn begin_drag(
        &mut self,
        pointer: Position,
        target: PointerTarget,
        locked: bool,
        settings_open: bool,
    ) -> Result<Position, DragRefusal> {
        let refusal = if locked {
            Some(DragRefusal::Locked)
        } else if settings_open {
            Some(DragRefusal::SettingsOpen)
        } else if target == PointerTarget::Control {
            Some(DragRefusal::Control)
        } else if self.is_dragging() {
            Some(DragRefusal::AlreadyDragging)
        } else {
            None
        };
        if let Some(refusal) = refusal {
            debug!("Drag refused: {:?}", refusal);
            return Err(refusal);
        }

        let anchor = Position::new(pointer.x - self.position.x, pointer.y - self.position.y);
        self.anchor = Some(anchor);
        debug!("Drag started with anchor ({}, {})", anchor.x, anchor.y);
        Ok(anchor)
    }

    /// Follow the pointer; `None` when not dragging
    pub fn update_drag(&mut self, pointer: Position) -> Option<Position> {
        let anchor = self.anchor?;
        self.position = Position::new(pointer.x - anchor.x, pointer.y - anchor.y);
        Some(self.position)
    }

    /// Finish the drag, returning the final position if one was running
    pub fn end_drag(&mut self) -> Option<Position> {
        self.anchor.take()?;
        debug!(
            "Drag ended at ({}, {})",
            self.position.x, self.position.y
        );
        Some(self.position)
    }
}
