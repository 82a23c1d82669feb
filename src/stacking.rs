use crate::geometry::{Rect, rectangles_overlap, union_covers, vertical_interval_overlap};
use crate::types::PlacedPallet;
use crate::violation::Violation;

/// Checks that no two pallets collide and that every elevated pallet rests
/// fully on pallets allowed to carry it.
pub fn check_stacking(placements: &[PlacedPallet]) -> Result<(), Violation> {
    for (index, p) in placements.iter().enumerate() {
        let footprint = p.footprint();
        let beneath_or_above: Vec<usize> = placements
            .iter()
            .enumerate()
            .filter(|&(j, q)| j != index && rectangles_overlap(&footprint, &q.footprint()))
            .map(|(j, _)| j)
            .collect();

        for &j in &beneath_or_above {
            let q = &placements[j];
            if vertical_interval_overlap(p.origin.z, p.height, q.origin.z)
                && vertical_interval_overlap(q.origin.z, q.height, p.origin.z)
            {
                return Err(Violation::HeightOverlap {
                    index,
                    origin: p.origin,
                    other: j,
                    other_origin: q.origin,
                });
            }
        }

        if p.origin.z == 0 {
            continue;
        }

        if !p.pallet_type.stacking_allowed {
            return Err(Violation::IllegalStackingSelf {
                index,
                origin: p.origin,
            });
        }

        let support: Vec<Rect> = beneath_or_above
            .iter()
            .map(|&j| &placements[j])
            .filter(|q| q.max_z() == p.origin.z && q.pallet_type.stacking_allowed)
            .map(|q| q.footprint())
            .collect();

        if !union_covers(&footprint, &support) {
            tracing::debug!(index, supports = support.len(), "incomplete support");
            return Err(Violation::BadStackingSupport {
                index,
                origin: p.origin,
            });
        }
    }
    Ok(())
}
