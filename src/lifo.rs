//! Unloading-order simulation.
//!
//! Pallets leave the container through the door at the far end of the x
//! axis, one delivery order group after the other. Each round releases the
//! pallets of the lowest remaining group that sit nearest the door and
//! highest up; ties are released together. A released pallet must have
//! nothing left on top of it and nothing left between it and the door.

use crate::geometry::{front_faces_adjacent_or_overlap, rectangles_overlap};
use crate::types::PlacedPallet;
use crate::violation::Violation;

pub fn check_lifo(placements: &[PlacedPallet]) -> Result<(), Violation> {
    let mut removed = vec![false; placements.len()];
    let mut remaining = placements.len();
    let mut reached: Option<u32> = None;
    let mut round = 0usize;

    while remaining > 0 {
        let Some((first, lowest)) = live(placements, &removed).min_by_key(|(_, p)| p.order())
        else {
            break;
        };
        let min_order = lowest.order();

        if let Some(reached) = reached
            && reached > min_order
        {
            return Err(Violation::LifoOrderViolation {
                index: first,
                origin: lowest.origin,
                order: min_order,
                reached,
            });
        }

        let next = release_batch(placements, &removed, min_order);
        round += 1;
        tracing::debug!(round, order = min_order, batch = ?next, "unloading");

        for &i in &next {
            let p = &placements[i];
            for (j, other) in live(placements, &removed) {
                if j == i {
                    continue;
                }
                let on_top = other.origin.z == p.max_z()
                    && rectangles_overlap(&p.footprint(), &other.footprint());
                let in_front = p.max_x() < other.max_x()
                    && front_faces_adjacent_or_overlap(&p.front_face(), &other.front_face());
                if on_top || in_front {
                    return Err(Violation::LifoBlocked {
                        index: i,
                        origin: p.origin,
                        other: j,
                        other_origin: other.origin,
                    });
                }
            }
        }

        for &i in &next {
            removed[i] = true;
        }
        remaining -= next.len();
        reached = Some(min_order);
    }
    Ok(())
}

fn live<'p, 'a>(
    placements: &'p [PlacedPallet<'a>],
    removed: &'p [bool],
) -> impl Iterator<Item = (usize, &'p PlacedPallet<'a>)> {
    placements
        .iter()
        .enumerate()
        .filter(move |&(i, _)| !removed[i])
}

/// Indices of the live placements of `order` nearest the door, then topmost.
fn release_batch(placements: &[PlacedPallet], removed: &[bool], order: u32) -> Vec<usize> {
    let group: Vec<usize> = (0..placements.len())
        .filter(|&i| !removed[i] && placements[i].order() == order)
        .collect();

    let Some(front) = group.iter().map(|&i| placements[i].max_x()).max() else {
        return group;
    };
    let group: Vec<usize> = group
        .into_iter()
        .filter(|&i| placements[i].max_x() == front)
        .collect();

    let Some(top) = group.iter().map(|&i| placements[i].max_z()).max() else {
        return group;
    };
    group
        .into_iter()
        .filter(|&i| placements[i].max_z() == top)
        .collect()
}
