//! Editing constants shared across the engine.
//!
//! This module centralizes the tolerances, thresholds and limits used by
//! hit-testing, slicing, history and the view transform.

/// Zoom constants.
pub mod zoom {
    /// Multiplicative wheel-zoom step (5% per notch).
    pub const FACTOR: f32 = 1.05;
    /// Maximum zoom level.
    pub const MAX: f32 = 10.0;
    /// Minimum zoom level.
    pub const MIN: f32 = 0.1;
}

/// Interaction threshold constants.
pub mod threshold {
    /// Base hit radius for vertex selection (screen pixels at zoom 1).
    pub const VERTEX_HIT_RADIUS: f32 = 10.0;
    /// Base hit radius for edge selection (model units).
    pub const EDGE_HIT_RADIUS: f32 = 10.0;
    /// Polygon close distance: clicking this near the first temp point
    /// closes the ring (screen pixels at zoom 1).
    pub const POLYGON_CLOSE: f32 = 15.0;
    /// Minimum drag movement before a vertex drag counts as a move
    /// (screen pixels).
    pub const DRAG_MOVEMENT: f32 = 0.5;
    /// Spacing between auto-inserted freehand points while Shift is held
    /// (model units at zoom 1, divided by zoom).
    pub const AUTO_POINT_SPACING: f32 = 20.0;
}

/// Polygon simplification constants.
pub mod simplify {
    /// Default Ramer-Douglas-Peucker tolerance in model units.
    pub const DEFAULT_TOLERANCE: f32 = 1.0;
}

/// Undo history constants.
pub mod history {
    /// Maximum number of snapshots kept before the oldest are dropped.
    pub const MAX_SNAPSHOTS: usize = 100;
}

/// Session cache constants.
pub mod cache {
    /// Default time-to-live for cached segmentations, in seconds.
    pub const TTL_SECONDS: u64 = 300;
}
