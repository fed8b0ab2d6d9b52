use thiserror::Error;

use glam::Affine2;

use crate::geometry::Point;

pub type ClickResult<T> = std::result::Result<T, ClickError>;

#[derive(Debug, Error, PartialEq)]
pub enum ClickError {
    #[error("invalid click transition: from {from:?} to {to:?}")]
    InvalidTransition { from: ClickState, to: ClickState },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickState {
    Down,
    Moving,
    Up,
}

/// What a click session does to the scene on each update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragMode {
    /// Drag a corner of `target` while `anchor` (model space) stays fixed.
    Resize { target: u64, anchor: Point },
    /// Translate `target` by the pointer delta between updates.
    Move { target: u64 },
    /// Span a freshly created `target` between the origin and the pointer.
    Create { target: u64 },
}

impl DragMode {
    pub const fn target(&self) -> u64 {
        match self {
            Self::Resize { target, .. } | Self::Move { target } | Self::Create { target } => {
                *target
            }
        }
    }
}

/// One pointer-down ... pointer-up interaction.
///
/// Points are in window space; `inverse` maps them into model space and is
/// captured when the session starts.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickSession {
    orig: Point,
    curr: Point,
    prev: Point,
    state: ClickState,
    mode: DragMode,
    inverse: Affine2,
}

impl ClickSession {
    pub(crate) fn new(loc: Point, mode: DragMode, inverse: Affine2) -> Self {
        Self {
            orig: loc,
            curr: loc,
            prev: loc,
            state: ClickState::Down,
            mode,
            inverse,
        }
    }

    pub fn orig(&self) -> Point {
        self.orig
    }

    pub fn curr(&self) -> Point {
        self.curr
    }

    pub fn prev(&self) -> Point {
        self.prev
    }

    pub fn state(&self) -> ClickState {
        self.state
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    pub fn model_orig(&self) -> Point {
        self.inverse.transform_point2(self.orig)
    }

    pub fn model_curr(&self) -> Point {
        self.inverse.transform_point2(self.curr)
    }

    pub fn model_prev(&self) -> Point {
        self.inverse.transform_point2(self.prev)
    }

    pub fn can_transition(&self, next: ClickState) -> bool {
        matches!(
            (self.state, next),
            (ClickState::Down | ClickState::Moving, ClickState::Moving | ClickState::Up)
        )
    }

    pub(crate) fn transition(&mut self, next: ClickState, loc: Point) -> ClickResult<ClickState> {
        tracing::trace!(from = ?self.state, to = ?next, "click transition");
        if !self.can_transition(next) {
            let from = self.state;
            tracing::warn!(from = ?from, to = ?next, "invalid click transition requested");
            return Err(ClickError::InvalidTransition { from, to: next });
        }
        self.prev = self.curr;
        self.curr = loc;
        self.state = next;
        Ok(self.state)
    }
}
