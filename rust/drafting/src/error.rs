// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for drafting operations.
//!
//! None of these are fatal. The [`Drafter`](crate::Drafter) absorbs them and
//! reports the event as having changed nothing.

/// Result type alias for drafting operations.
pub type Result<T> = std::result::Result<T, DraftError>;

/// Errors that can occur while drafting.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DraftError {
    /// A pick or rectangle collapsed to (near) zero length.
    #[error("degenerate segment: length {0} is below tolerance")]
    DegenerateSegment(f64),

    /// The pointer ray does not hit the ground plane.
    #[error("pointer ray does not intersect the ground plane")]
    NoGroundIntersection,

    /// The command does not apply in the current state.
    #[error("invalid mode transition: {0}")]
    InvalidModeTransition(&'static str),

    /// Box meshing failed during synthesis.
    #[error("geometry error: {0}")]
    Geometry(blueprint_geometry::Error),

    /// Configuration values are out of range or malformed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<blueprint_geometry::Error> for DraftError {
    fn from(err: blueprint_geometry::Error) -> Self {
        match err {
            blueprint_geometry::Error::DegenerateSegment(length) => DraftError::DegenerateSegment(length),
            other => DraftError::Geometry(other),
        }
    }
}
