//! # Map
//!
//! This module implements the [`ObstacleMap`], an append-only record of every obstacle the rover
//! has sensed, expressed in the world frame, along with the exporter that persists it.

// ------------------------------------------------------------------------------------------------
// MODS
// ------------------------------------------------------------------------------------------------

/// Implements the [`ObstacleMap`] type
mod obstacle_map;

/// Point list file format
pub mod export;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use export::ExportError;
pub use obstacle_map::ObstacleMap;
