//! Reading catalogs and solutions from CSV records.
//!
//! Catalog header:
//! `Id,Description,Quantity,Length,Width,Height,TurningAllowed,StackingAllowed,Order`
//!
//! A solution is either `TypId,xPos,yPos,zPos,HTurned` (extents taken from the
//! type) or `TypId,x1,y1,z1,x2,y2,z2` (two opposite corners). The header row
//! decides which.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::types::{Catalog, Origin, PalletType, PlacedPallet, TypeId};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed record: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: unknown pallet type {type_id}")]
    UnknownType { line: usize, type_id: TypeId },

    #[error("line {line}: pallet type {type_id} is defined twice")]
    DuplicateType { line: usize, type_id: TypeId },

    #[error("line {line}: {field} must be positive")]
    NotPositive { line: usize, field: &'static str },

    #[error("line {line}: pallet reaches past the largest representable coordinate")]
    OutOfRange { line: usize },

    #[error("unrecognised solution header, expected xPos,yPos,zPos,HTurned or x1,y1,z1,x2,y2,z2")]
    UnknownSolutionFormat,
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(u32::deserialize(deserializer)? != 0)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CatalogRecord {
    id: TypeId,
    #[serde(default)]
    description: String,
    quantity: u32,
    length: u32,
    width: u32,
    height: u32,
    #[serde(deserialize_with = "deserialize_flag")]
    turning_allowed: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    stacking_allowed: bool,
    order: u32,
}

#[derive(Debug, Deserialize)]
struct FlagRecord {
    #[serde(rename = "TypId")]
    type_id: TypeId,
    #[serde(rename = "xPos")]
    x: u32,
    #[serde(rename = "yPos")]
    y: u32,
    #[serde(rename = "zPos")]
    z: u32,
    #[serde(rename = "HTurned", deserialize_with = "deserialize_flag")]
    turned: bool,
}

#[derive(Debug, Deserialize)]
struct CornerRecord {
    #[serde(rename = "TypId")]
    type_id: TypeId,
    x1: u32,
    y1: u32,
    z1: u32,
    x2: u32,
    y2: u32,
    z2: u32,
}

fn reader<R: io::Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b',')
        .quote(b'|')
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input)
}

fn open(path: &Path) -> Result<std::fs::File, ImportError> {
    std::fs::File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// Data lines start after the header on line 1.
fn line_of(record_index: usize) -> usize {
    record_index + 2
}

pub fn read_catalog<R: io::Read>(input: R) -> Result<Catalog, ImportError> {
    let mut rdr = reader(input);
    let mut catalog = Catalog::new();

    for (i, result) in rdr.deserialize::<CatalogRecord>().enumerate() {
        let rec = result?;
        let line = line_of(i);
        for (field, value) in [
            ("Quantity", rec.quantity),
            ("Length", rec.length),
            ("Width", rec.width),
            ("Height", rec.height),
            ("Order", rec.order),
        ] {
            if value == 0 {
                return Err(ImportError::NotPositive { line, field });
            }
        }

        let type_id = rec.id;
        let inserted = catalog.insert(PalletType {
            id: rec.id,
            description: rec.description,
            quantity: rec.quantity,
            length: rec.length,
            width: rec.width,
            height: rec.height,
            turning_allowed: rec.turning_allowed,
            stacking_allowed: rec.stacking_allowed,
            order: rec.order,
        });
        if !inserted {
            return Err(ImportError::DuplicateType { line, type_id });
        }
    }

    tracing::debug!(types = catalog.len(), "catalog read");
    Ok(catalog)
}

pub fn read_catalog_file(path: impl AsRef<Path>) -> Result<Catalog, ImportError> {
    read_catalog(open(path.as_ref())?)
}

pub fn read_solution<'a, R: io::Read>(
    input: R,
    catalog: &'a Catalog,
) -> Result<Vec<PlacedPallet<'a>>, ImportError> {
    let mut rdr = reader(input);
    let headers = rdr.headers()?.clone();
    let has = |name: &str| headers.iter().any(|h| h == name);

    let lookup = move |line: usize, type_id: TypeId| {
        catalog
            .get(type_id)
            .ok_or(ImportError::UnknownType { line, type_id })
    };

    let mut placements = Vec::new();
    if has("HTurned") {
        for (i, result) in rdr.deserialize::<FlagRecord>().enumerate() {
            let rec = result?;
            let t = lookup(line_of(i), rec.type_id)?;
            let p = PlacedPallet::new(t, Origin::new(rec.x, rec.y, rec.z), rec.turned);
            if !p.is_within_range() {
                return Err(ImportError::OutOfRange { line: line_of(i) });
            }
            placements.push(p);
        }
    } else if has("x2") {
        for (i, result) in rdr.deserialize::<CornerRecord>().enumerate() {
            let rec = result?;
            let t = lookup(line_of(i), rec.type_id)?;
            let origin = Origin::new(rec.x1.min(rec.x2), rec.y1.min(rec.y2), rec.z1.min(rec.z2));
            placements.push(PlacedPallet::with_extents(
                t,
                origin,
                rec.x1.abs_diff(rec.x2),
                rec.y1.abs_diff(rec.y2),
                rec.z1.abs_diff(rec.z2),
            ));
        }
    } else {
        return Err(ImportError::UnknownSolutionFormat);
    }

    tracing::debug!(placements = placements.len(), "solution read");
    Ok(placements)
}

pub fn read_solution_file<'a>(
    path: impl AsRef<Path>,
    catalog: &'a Catalog,
) -> Result<Vec<PlacedPallet<'a>>, ImportError> {
    read_solution(open(path.as_ref())?, catalog)
}
