// SPDX-License-Identifier: MPL-2.0
//! Pointer-drag controller
//!
//! Turns press/move/release/exit events into pan offsets for the viewport.

use iced::{Point, Vector};

/// Drag state machine.
///
/// The anchor only exists while dragging, so an idle controller can never
/// produce an offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragController {
    #[default]
    Idle,
    Dragging {
        /// Press position minus the offset at press time.
        anchor: Point,
    },
}

impl DragController {
    /// Starts a drag, capturing `anchor = position - current_offset`.
    pub fn press(&mut self, position: Point, current_offset: Vector) {
        *self = DragController::Dragging {
            anchor: position - current_offset,
        };
    }

    /// Returns the new offset (`position - anchor`) while dragging.
    #[must_use]
    pub fn moved(&self, position: Point) -> Option<Vector> {
        match self {
            DragController::Idle => None,
            DragController::Dragging { anchor } => Some(position - *anchor),
        }
    }

    /// Ends the drag.
    pub fn release(&mut self) {
        *self = DragController::Idle;
    }

    /// Cursor left the viewport: handled exactly like a release.
    pub fn exit(&mut self) {
        self.release();
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragController::Dragging { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_controller_is_idle() {
        let controller = DragController::default();
        assert!(!controller.is_dragging());
        assert!(controller.moved(Point::new(10.0, 10.0)).is_none());
    }

    #[test]
    fn press_then_move_yields_delta_offset() {
        let mut controller = DragController::default();
        controller.press(Point::new(100.0, 100.0), Vector::ZERO);

        let offset = controller.moved(Point::new(150.0, 120.0));
        assert_eq!(offset, Some(Vector::new(50.0, 20.0)));
    }

    #[test]
    fn press_accounts_for_existing_offset() {
        let mut controller = DragController::default();
        controller.press(Point::new(200.0, 150.0), Vector::new(50.0, 30.0));

        // Moving back to the press point keeps the original offset.
        assert_eq!(
            controller.moved(Point::new(200.0, 150.0)),
            Some(Vector::new(50.0, 30.0))
        );
        assert_eq!(
            controller.moved(Point::new(180.0, 130.0)),
            Some(Vector::new(30.0, 10.0))
        );
    }

    #[test]
    fn release_stops_offset_updates() {
        let mut controller = DragController::default();
        controller.press(Point::new(100.0, 100.0), Vector::ZERO);
        controller.release();

        assert!(!controller.is_dragging());
        assert!(controller.moved(Point::new(300.0, 300.0)).is_none());
    }

    #[test]
    fn exit_behaves_like_release() {
        let mut released = DragController::default();
        released.press(Point::new(1.0, 2.0), Vector::ZERO);
        released.release();

        let mut exited = DragController::default();
        exited.press(Point::new(1.0, 2.0), Vector::ZERO);
        exited.exit();

        assert_eq!(released, exited);
    }

    #[test]
    fn release_when_idle_is_harmless() {
        let mut controller = DragController::default();
        controller.release();
        controller.exit();
        assert_eq!(controller, DragController::Idle);
    }
}
