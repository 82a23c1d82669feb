use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

pub type TypeId = u32;

/// A required pallet type from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalletType {
    pub id: TypeId,
    #[serde(default)]
    pub description: String,
    pub quantity: u32,
    pub length: u32,
    pub width: u32,
    pub height: u32,
    pub turning_allowed: bool,
    /// Gates both being placed above the floor and carrying another pallet.
    pub stacking_allowed: bool,
    /// Delivery order group; lower groups leave the container first.
    pub order: u32,
}

impl PalletType {
    pub fn is_square(&self) -> bool {
        self.length == self.width
    }
}

/// Pallet types keyed by id, in catalog record order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    types: IndexMap<TypeId, PalletType>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type. Returns `false` and keeps the existing entry if the id
    /// is already taken.
    pub fn insert(&mut self, pallet_type: PalletType) -> bool {
        if self.types.contains_key(&pallet_type.id) {
            return false;
        }
        self.types.insert(pallet_type.id, pallet_type);
        true
    }

    pub fn get(&self, id: TypeId) -> Option<&PalletType> {
        self.types.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PalletType> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Container length, the unloading direction.
    X,
    #[default]
    Y,
    Z,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Origin {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Origin {
    pub fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// One pallet of a solution, positioned in the container.
///
/// Two placements are told apart by their index in the solution, never by
/// value: geometrically identical placements are still distinct pallets.
#[derive(Debug, Clone, Copy)]
pub struct PlacedPallet<'a> {
    pub pallet_type: &'a PalletType,
    pub origin: Origin,
    pub length: u32,
    pub width: u32,
    pub height: u32,
}

impl<'a> PlacedPallet<'a> {
    /// Placement whose extents come from its type, with length and width
    /// swapped when `rotated` is set.
    pub fn new(pallet_type: &'a PalletType, origin: Origin, rotated: bool) -> Self {
        let (length, width) = if rotated {
            (pallet_type.width, pallet_type.length)
        } else {
            (pallet_type.length, pallet_type.width)
        };
        Self {
            pallet_type,
            origin,
            length,
            width,
            height: pallet_type.height,
        }
    }

    /// Placement with extents stated independently of its type.
    pub fn with_extents(
        pallet_type: &'a PalletType,
        origin: Origin,
        length: u32,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            pallet_type,
            origin,
            length,
            width,
            height,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.pallet_type.id
    }

    pub fn order(&self) -> u32 {
        self.pallet_type.order
    }

    /// True if every far edge `origin + extent` fits in a `u32`. The geometry
    /// relies on this; importers reject placements that fail it.
    pub fn is_within_range(&self) -> bool {
        [Axis::X, Axis::Y, Axis::Z]
            .into_iter()
            .all(|axis| self.start(axis).checked_add(self.extent(axis)).is_some())
    }

    pub fn max_x(&self) -> u32 {
        self.origin.x + self.length
    }

    pub fn max_y(&self) -> u32 {
        self.origin.y + self.width
    }

    pub fn max_z(&self) -> u32 {
        self.origin.z + self.height
    }

    pub fn start(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.origin.x,
            Axis::Y => self.origin.y,
            Axis::Z => self.origin.z,
        }
    }

    pub fn extent(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.length,
            Axis::Y => self.width,
            Axis::Z => self.height,
        }
    }

    /// Occupied rectangle in the (x, y) plane.
    pub fn footprint(&self) -> Rect {
        Rect::from_origin(self.origin.x, self.origin.y, self.length, self.width)
    }

    /// Occupied rectangle in the (y, z) plane.
    pub fn front_face(&self) -> Rect {
        Rect::from_origin(self.origin.y, self.origin.z, self.width, self.height)
    }
}

#[cfg(test)]
pub(crate) fn pallet_type(
    id: TypeId,
    quantity: u32,
    dims: (u32, u32, u32),
    turn: bool,
    stack: bool,
    order: u32,
) -> PalletType {
    PalletType {
        id,
        description: format!("EuroPallet{id}"),
        quantity,
        length: dims.0,
        width: dims.1,
        height: dims.2,
        turning_allowed: turn,
        stacking_allowed: stack,
        order,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotated_swaps_length_and_width() {
        let t = pallet_type(1, 1, (10, 20, 30), true, true, 1);
        let p = PlacedPallet::new(&t, Origin::new(5, 0, 0), true);
        assert_eq!((p.length, p.width, p.height), (20, 10, 30));
        assert_eq!(p.footprint(), Rect::new(5, 0, 25, 10));
        assert_eq!(p.front_face(), Rect::new(0, 0, 10, 30));
        assert_eq!(p.max_x(), 25);
    }

    #[test]
    fn test_axis_accessors() {
        let t = pallet_type(1, 1, (10, 20, 30), false, false, 1);
        let p = PlacedPallet::new(&t, Origin::new(1, 2, 3), false);
        assert_eq!(p.start(Axis::Y) + p.extent(Axis::Y), p.max_y());
        assert_eq!(p.start(Axis::Z) + p.extent(Axis::Z), 33);
    }

    #[test]
    fn test_range_check() {
        let t = pallet_type(1, 1, (10, 20, 30), false, false, 1);
        assert!(PlacedPallet::new(&t, Origin::new(0, u32::MAX - 20, 0), false).is_within_range());
        assert!(!PlacedPallet::new(&t, Origin::new(0, 4_294_967_290, 0), false).is_within_range());
        assert!(!PlacedPallet::new(&t, Origin::new(u32::MAX, 0, 0), false).is_within_range());
    }

    #[test]
    fn test_catalog_rejects_duplicate_ids() {
        let mut catalog = Catalog::new();
        assert!(catalog.insert(pallet_type(1, 1, (1, 1, 1), false, false, 1)));
        assert!(!catalog.insert(pallet_type(1, 5, (2, 2, 2), false, false, 1)));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(1).map(|t| t.quantity), Some(1));
    }

    #[test]
    fn test_catalog_keeps_record_order() {
        let mut catalog = Catalog::new();
        catalog.insert(pallet_type(7, 1, (1, 1, 1), false, false, 1));
        catalog.insert(pallet_type(2, 1, (1, 1, 1), false, false, 1));
        let ids: Vec<_> = catalog.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![7, 2]);
    }
}
