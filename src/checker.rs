use serde::Serialize;

use crate::container::{ContainerBounds, check_container};
use crate::dimensions::check_dimensions;
use crate::lifo::check_lifo;
use crate::stacking::check_stacking;
use crate::types::{Catalog, PlacedPallet};
use crate::violation::Violation;

/// Summary of an accepted solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Report {
    pub placements: usize,
    /// Container length the solution actually needs.
    pub minimal_length: u32,
}

/// Runs every feasibility rule in a fixed order and stops at the first
/// violation: counts, dimensions, container bounds, stacking, unloading.
///
/// Placements are scanned in the order given, so the reported violation is
/// the same on every run.
pub fn validate(
    placements: &[PlacedPallet],
    catalog: &Catalog,
    container: &ContainerBounds,
) -> Result<Report, Violation> {
    tracing::debug!(placements = placements.len(), types = catalog.len(), "validating");

    check_count(placements, catalog)?;
    tracing::debug!("counts ok");
    check_dimensions(placements)?;
    tracing::debug!("dimensions ok");
    check_container(placements, container)?;
    tracing::debug!("container bounds ok");
    check_stacking(placements)?;
    tracing::debug!("stacking ok");
    check_lifo(placements)?;
    tracing::debug!("unloading order ok");

    Ok(Report {
        placements: placements.len(),
        minimal_length: minimal_length(placements),
    })
}

/// Every catalog type must be placed exactly as often as required.
pub fn check_count(placements: &[PlacedPallet], catalog: &Catalog) -> Result<(), Violation> {
    for t in catalog.iter() {
        let found = placements.iter().filter(|p| p.type_id() == t.id).count() as u32;
        if found != t.quantity {
            return Err(Violation::CountMismatch {
                type_id: t.id,
                description: t.description.clone(),
                order: t.order,
                required: t.quantity,
                found,
            });
        }
    }
    Ok(())
}

pub fn minimal_length(placements: &[PlacedPallet]) -> u32 {
    placements.iter().map(|p| p.max_x()).max().unwrap_or(0)
}
