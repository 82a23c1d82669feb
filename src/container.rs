use crate::types::{Axis, PlacedPallet};
use crate::violation::Violation;

/// Upper limit of the container along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisBound {
    pub axis: Axis,
    pub limit: u32,
}

/// The container envelope every placement must stay inside.
///
/// Which placement axis the container's width and height constrain is a run
/// parameter. Length is open-ended unless a bound names [`Axis::X`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerBounds {
    pub bounds: Vec<AxisBound>,
}

impl ContainerBounds {
    /// Width along y and height along z.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_axes(width, Axis::Y, height, Axis::Z)
    }

    pub fn with_axes(width: u32, width_axis: Axis, height: u32, height_axis: Axis) -> Self {
        Self {
            bounds: vec![
                AxisBound {
                    axis: width_axis,
                    limit: width,
                },
                AxisBound {
                    axis: height_axis,
                    limit: height,
                },
            ],
        }
    }
}

pub fn check_container(placements: &[PlacedPallet], container: &ContainerBounds) -> Result<(), Violation> {
    for (index, p) in placements.iter().enumerate() {
        for bound in &container.bounds {
            let reach = p.start(bound.axis) + p.extent(bound.axis);
            if reach > bound.limit {
                return Err(Violation::ExceedsContainer {
                    index,
                    origin: p.origin,
                    axis: bound.axis,
                    reach,
                    limit: bound.limit,
                });
            }
        }
    }
    Ok(())
}
