use crate::types::PlacedPallet;
use crate::violation::Violation;

/// Checks every placement's extents and orientation against its type.
pub fn check_dimensions(placements: &[PlacedPallet]) -> Result<(), Violation> {
    for (index, p) in placements.iter().enumerate() {
        check_placement(index, p)?;
    }
    Ok(())
}

/// A square type is never rotated: swapping equal sides changes nothing, so
/// `turning_allowed = false` does not reject it.
fn check_placement(index: usize, p: &PlacedPallet) -> Result<(), Violation> {
    let t = p.pallet_type;
    let rotated = !t.is_square() && (p.length, p.width) == (t.width, t.length);

    if rotated {
        if !t.turning_allowed {
            return Err(Violation::IllegalRotation {
                index,
                origin: p.origin,
            });
        }
    } else if (p.length, p.width) != (t.length, t.width) {
        return Err(wrong_dimensions(index, p));
    }

    if p.height != t.height {
        return Err(wrong_dimensions(index, p));
    }
    Ok(())
}

fn wrong_dimensions(index: usize, p: &PlacedPallet) -> Violation {
    let t = p.pallet_type;
    Violation::WrongDimensions {
        index,
        origin: p.origin,
        type_id: t.id,
        length: p.length,
        width: p.width,
        height: p.height,
        expected_length: t.length,
        expected_width: t.width,
        expected_height: t.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Origin, pallet_type};
    use crate::violation::ViolationKind;

    #[test]
    fn test_nominal_orientation_passes() {
        let t = pallet_type(1, 1, (20, 40, 40), false, false, 1);
        let placements = [PlacedPallet::new(&t, Origin::default(), false)];
        assert!(check_dimensions(&placements).is_ok());
    }

    #[test]
    fn test_rotation_not_allowed() {
        let t = pallet_type(2, 1, (20, 40, 40), false, false, 1);
        let placements = [PlacedPallet::new(&t, Origin::default(), true)];
        let err = check_dimensions(&placements).unwrap_err();
        assert_eq!(err.kind(), ViolationKind::IllegalRotation);
    }

    #[test]
    fn test_rotation_allowed() {
        let t = pallet_type(2, 1, (20, 40, 40), true, false, 1);
        let placements = [PlacedPallet::new(&t, Origin::default(), true)];
        assert!(check_dimensions(&placements).is_ok());
    }

    #[test]
    fn test_square_type_is_never_rotated() {
        let t = pallet_type(3, 1, (10, 10, 10), false, false, 1);
        let placements = [
            PlacedPallet::new(&t, Origin::default(), false),
            PlacedPallet::new(&t, Origin::new(10, 0, 0), true),
        ];
        assert!(check_dimensions(&placements).is_ok());
    }

    #[test]
    fn test_wrong_footprint() {
        let t = pallet_type(1, 1, (10, 20, 30), true, true, 1);
        let placements = [
            PlacedPallet::new(&t, Origin::default(), false),
            PlacedPallet::with_extents(&t, Origin::new(10, 0, 0), 10, 25, 30),
        ];
        match check_dimensions(&placements) {
            Err(Violation::WrongDimensions { index, width, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(width, 25);
            }
            other => panic!("expected WrongDimensions, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_height_even_when_rotated() {
        let t = pallet_type(1, 1, (10, 20, 30), true, true, 1);
        let placements = [PlacedPallet::with_extents(&t, Origin::default(), 20, 10, 31)];
        let err = check_dimensions(&placements).unwrap_err();
        assert_eq!(err.kind(), ViolationKind::WrongDimensions);
    }

    #[test]
    fn test_first_offender_in_input_order() {
        let t = pallet_type(1, 2, (10, 20, 30), false, true, 1);
        let placements = [
            PlacedPallet::with_extents(&t, Origin::default(), 11, 20, 30),
            PlacedPallet::new(&t, Origin::new(20, 0, 0), true),
        ];
        let err = check_dimensions(&placements).unwrap_err();
        assert_eq!(err.kind(), ViolationKind::WrongDimensions);
        assert_eq!(err.placements(), vec![0]);
    }
}
