//! Feasibility violations reported by the checker.

use serde::Serialize;
use thiserror::Error;

use crate::types::{Axis, Origin, TypeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ViolationKind {
    CountMismatch,
    IllegalRotation,
    WrongDimensions,
    ExceedsContainer,
    HeightOverlap,
    IllegalStackingSelf,
    BadStackingSupport,
    LifoBlocked,
    LifoOrderViolation,
}

/// The first business rule a solution breaks.
///
/// `index` fields are positions in the solution's placement list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error(
        "pallet type {type_id} ({description}, order {order}) is placed {found} times, but {required} are required"
    )]
    CountMismatch {
        type_id: TypeId,
        description: String,
        order: u32,
        required: u32,
        found: u32,
    },

    #[error("pallet at {origin} was rotated, but its type does not allow turning")]
    IllegalRotation { index: usize, origin: Origin },

    #[error(
        "pallet at {origin} has wrong dimensions {length}x{width}x{height}, type {type_id} requires {expected_length}x{expected_width}x{expected_height}"
    )]
    WrongDimensions {
        index: usize,
        origin: Origin,
        type_id: TypeId,
        length: u32,
        width: u32,
        height: u32,
        expected_length: u32,
        expected_width: u32,
        expected_height: u32,
    },

    #[error("pallet at {origin} exceeds the container: reaches {reach} on {axis}, limit is {limit}")]
    ExceedsContainer {
        index: usize,
        origin: Origin,
        axis: Axis,
        reach: u32,
        limit: u32,
    },

    #[error("pallets at {origin} and {other_origin} overlap")]
    HeightOverlap {
        index: usize,
        origin: Origin,
        other: usize,
        other_origin: Origin,
    },

    #[error("pallet at {origin} is stacked, but its type does not allow stacking")]
    IllegalStackingSelf { index: usize, origin: Origin },

    #[error("pallet at {origin} is stacked incorrectly: its base is not fully supported")]
    BadStackingSupport { index: usize, origin: Origin },

    #[error("pallet at {origin} is blocked by the pallet at {other_origin} when unloading")]
    LifoBlocked {
        index: usize,
        origin: Origin,
        other: usize,
        other_origin: Origin,
    },

    #[error(
        "pallet at {origin} of order {order} can only be unloaded after order {reached} was reached"
    )]
    LifoOrderViolation {
        index: usize,
        origin: Origin,
        order: u32,
        reached: u32,
    },
}

impl Violation {
    pub fn kind(&self) -> ViolationKind {
        match self {
            Violation::CountMismatch { .. } => ViolationKind::CountMismatch,
            Violation::IllegalRotation { .. } => ViolationKind::IllegalRotation,
            Violation::WrongDimensions { .. } => ViolationKind::WrongDimensions,
            Violation::ExceedsContainer { .. } => ViolationKind::ExceedsContainer,
            Violation::HeightOverlap { .. } => ViolationKind::HeightOverlap,
            Violation::IllegalStackingSelf { .. } => ViolationKind::IllegalStackingSelf,
            Violation::BadStackingSupport { .. } => ViolationKind::BadStackingSupport,
            Violation::LifoBlocked { .. } => ViolationKind::LifoBlocked,
            Violation::LifoOrderViolation { .. } => ViolationKind::LifoOrderViolation,
        }
    }

    /// Indices of the placements involved, offending placement first.
    pub fn placements(&self) -> Vec<usize> {
        match self {
            Violation::CountMismatch { .. } => vec![],
            Violation::IllegalRotation { index, .. }
            | Violation::WrongDimensions { index, .. }
            | Violation::ExceedsContainer { index, .. }
            | Violation::IllegalStackingSelf { index, .. }
            | Violation::BadStackingSupport { index, .. }
            | Violation::LifoOrderViolation { index, .. } => vec![*index],
            Violation::HeightOverlap { index, other, .. }
            | Violation::LifoBlocked { index, other, .. } => vec![*index, *other],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_names_origins() {
        let v = Violation::HeightOverlap {
            index: 0,
            origin: Origin::new(0, 0, 0),
            other: 1,
            other_origin: Origin::new(5, 5, 0),
        };
        assert_eq!(v.to_string(), "pallets at (0, 0, 0) and (5, 5, 0) overlap");
        assert_eq!(v.kind(), ViolationKind::HeightOverlap);
        assert_eq!(v.placements(), vec![0, 1]);
    }

    #[test]
    fn test_count_mismatch_has_no_placement() {
        let v = Violation::CountMismatch {
            type_id: 1,
            description: "EuroPallet1".to_string(),
            order: 1,
            required: 4,
            found: 3,
        };
        assert!(v.placements().is_empty());
        assert!(v.to_string().contains("placed 3 times"));
    }
}
