//! Character property lookup.
//!
//! [`PropertyTable`] maps any code point to its [`Category`] in constant time.
//! Code points up to U+00FF resolve through a dedicated Latin-1 table; the
//! rest dispatch on their plane (`code_point >> 16`) into a dense per-plane
//! table. Planes 3 through 13 hold no assigned characters and have no table.
//!
//! All tables share one packed representation: two 16-bit units per code
//! point, high unit first, combined as `(high << 16) | low`. [`unpack`]
//! converts that form into an indexable record array and refuses input whose
//! length does not match the table size.
//!
//! ## Examples
//!
//! ```rust
//! use serde_rpcjson::{Category, PropertyTable};
//!
//! let table = PropertyTable::shared();
//! assert_eq!(table.category('A' as u32), Category::UppercaseLetter);
//! assert_eq!(table.category(0x2028), Category::LineSeparator);
//! assert_eq!(table.category(0x5_0000), Category::Unassigned);
//! ```

use crate::category::Category;
use crate::latin1::{LATIN1_PACKED, LATIN1_SIZE};
use crate::{Error, Result};
use std::sync::OnceLock;

/// Number of code points in one plane.
pub const PLANE_SIZE: usize = 0x1_0000;

/// Number of planes in the code-point space.
pub const PLANE_COUNT: usize = 17;

/// Highest code point served by the Latin-1 fast path.
pub const FAST_PATH_MAX: u32 = 0xFF;

/// Planes backed by a record table. Every other plane is unassigned.
const TABLE_PLANES: [u32; 6] = [0, 1, 2, 14, 15, 16];

/// Packs records into the two-unit representation.
#[must_use]
pub fn pack(records: &[u32]) -> Vec<u16> {
    let mut packed = Vec::with_capacity(records.len() * 2);
    for &record in records {
        packed.push((record >> 16) as u16);
        packed.push(record as u16);
    }
    packed
}

/// Unpacks a two-unit table of `size` records.
///
/// # Errors
///
/// Returns [`Error::Integrity`] when `packed` does not hold exactly
/// `size * 2` units.
pub fn unpack(table: &'static str, packed: &[u16], size: usize) -> Result<Box<[u32]>> {
    if packed.len() != size * 2 {
        return Err(Error::integrity(table, size * 2, packed.len()));
    }
    Ok(packed
        .chunks_exact(2)
        .map(|pair| (u32::from(pair[0]) << 16) | u32::from(pair[1]))
        .collect())
}

/// Packs the records of one plane from the Unicode Character Database.
///
/// Values in the surrogate range are not `char`s and are recorded as
/// [`Category::Surrogate`].
#[must_use]
pub fn pack_plane(plane: u32) -> Vec<u16> {
    let base = plane << 16;
    let records: Vec<u32> = (base..base + PLANE_SIZE as u32)
        .map(|code_point| {
            let category = char::from_u32(code_point)
                .map(|ch| Category::from(unicode_general_category::get_general_category(ch)))
                .unwrap_or(Category::Surrogate);
            u32::from(category.tag())
        })
        .collect();
    pack(&records)
}

fn plane_name(plane: u32) -> &'static str {
    match plane {
        0 => "plane 0",
        1 => "plane 1",
        2 => "plane 2",
        14 => "plane 14",
        15 => "plane 15",
        _ => "plane 16",
    }
}

static SHARED: OnceLock<PropertyTable> = OnceLock::new();

/// Immutable code point to property record lookup.
///
/// Build once, then share by reference; lookups never mutate.
#[derive(Debug, Clone)]
pub struct PropertyTable {
    latin1: Box<[u32]>,
    planes: [Option<Box<[u32]>>; PLANE_COUNT],
}

impl PropertyTable {
    /// Unpacks every table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Integrity`] if any packed table has the wrong length.
    pub fn build() -> Result<Self> {
        let latin1 = unpack("latin1", &LATIN1_PACKED, LATIN1_SIZE)?;
        let mut planes: [Option<Box<[u32]>>; PLANE_COUNT] = Default::default();
        for plane in TABLE_PLANES {
            let packed = pack_plane(plane);
            planes[plane as usize] = Some(unpack(plane_name(plane), &packed, PLANE_SIZE)?);
        }
        log::debug!(
            "unpacked character properties: {} latin-1 records, {} plane tables",
            latin1.len(),
            TABLE_PLANES.len()
        );
        Ok(PropertyTable { latin1, planes })
    }

    /// Builds a table from caller-supplied packed data.
    ///
    /// `planes` pairs a plane number with its packed table; planes left out
    /// resolve to [`Category::Unassigned`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Integrity`] on a length mismatch, and
    /// [`Error::Custom`] for a plane number outside `0..17`.
    pub fn from_packed(latin1: &[u16], planes: &[(u32, &[u16])]) -> Result<Self> {
        let latin1 = unpack("latin1", latin1, LATIN1_SIZE)?;
        let mut tables: [Option<Box<[u32]>>; PLANE_COUNT] = Default::default();
        for &(plane, packed) in planes {
            let slot = tables
                .get_mut(plane as usize)
                .ok_or_else(|| Error::custom(format!("plane {plane} is out of range")))?;
            *slot = Some(unpack("plane", packed, PLANE_SIZE)?);
        }
        Ok(PropertyTable {
            latin1,
            planes: tables,
        })
    }

    /// The process-wide table, unpacked on first use.
    ///
    /// # Panics
    ///
    /// Panics if the built-in tables fail their integrity check. No lookup
    /// can be trusted after that, so the process must not continue.
    pub fn shared() -> &'static PropertyTable {
        SHARED.get_or_init(|| {
            PropertyTable::build()
                .unwrap_or_else(|err| panic!("character property tables are unusable: {err}"))
        })
    }

    /// Full property record of a code point, if any table covers it.
    #[must_use]
    pub fn record(&self, code_point: u32) -> Option<u32> {
        if code_point <= FAST_PATH_MAX {
            return self.latin1.get(code_point as usize).copied();
        }
        let plane = (code_point >> 16) as usize;
        self.planes
            .get(plane)
            .and_then(Option::as_deref)
            .and_then(|table| table.get((code_point & 0xFFFF) as usize).copied())
    }

    /// General category of a code point. Total over `u32`: anything no
    /// table covers, including values past U+10FFFF, is unassigned.
    #[must_use]
    pub fn category(&self, code_point: u32) -> Category {
        self.record(code_point)
            .map(Category::from_record)
            .unwrap_or(Category::Unassigned)
    }

    /// General category of a `char`.
    #[must_use]
    pub fn category_of(&self, ch: char) -> Category {
        self.category(u32::from(ch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpack_combines_high_and_low() {
        let records = unpack("test", &[0x1234, 0x5678, 0x0000, 0x001F], 2).unwrap();
        assert_eq!(&*records, &[0x1234_5678, 0x0000_001F]);
    }

    #[test]
    fn test_unpack_rejects_wrong_length() {
        let err = unpack("test", &[0x0000; 3], 2).unwrap_err();
        assert!(matches!(
            err,
            Error::Integrity {
                expected: 4,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_pack_then_unpack() {
        let records: Vec<u32> = (0..LATIN1_SIZE as u32)
            .map(|i| i.wrapping_mul(0x9E37_79B9))
            .collect();
        let unpacked = unpack("test", &pack(&records), LATIN1_SIZE).unwrap();
        for (source, decoded) in records.iter().zip(unpacked.iter()) {
            assert_eq!(
                Category::from_record(*decoded),
                Category::from_tag((source & 0x1F) as u8)
            );
        }
    }

    #[test]
    fn test_latin1_fast_path() {
        let table = PropertyTable::shared();
        let records = unpack("latin1", &LATIN1_PACKED, LATIN1_SIZE).unwrap();
        for code_point in 0..=FAST_PATH_MAX {
            assert_eq!(
                table.category(code_point),
                Category::from_record(records[code_point as usize])
            );
        }
        assert_eq!(table.category(0x00), Category::Control);
        assert_eq!(table.category(0x20), Category::SpaceSeparator);
        assert_eq!(table.category(0x41), Category::UppercaseLetter);
        assert_eq!(table.category(0x61), Category::LowercaseLetter);
        assert_eq!(table.category(0x30), Category::DecimalDigitNumber);
        assert_eq!(table.category(0xA0), Category::SpaceSeparator);
        assert_eq!(table.category(0xAD), Category::Format);
    }

    #[test]
    fn test_plane_dispatch() {
        let table = PropertyTable::shared();
        assert_eq!(table.category(0x0300), Category::NonSpacingMark);
        assert_eq!(table.category(0x2011), Category::DashPunctuation);
        assert_eq!(table.category(0x2029), Category::ParagraphSeparator);
        assert_eq!(table.category(0xD800), Category::Surrogate);
        assert_eq!(table.category(0xDFFF), Category::Surrogate);
        assert_eq!(table.category(0xE000), Category::PrivateUse);
        assert_eq!(table.category(0xFEFF), Category::Format);
        assert_eq!(table.category(0x1_F600), Category::OtherSymbol);
        assert_eq!(table.category(0x2_0000), Category::OtherLetter);
        assert_eq!(table.category(0xE_0001), Category::Format);
        assert_eq!(table.category(0xF_0000), Category::PrivateUse);
        assert_eq!(table.category(0x10_FFFD), Category::PrivateUse);
    }

    #[test]
    fn test_unassigned_planes() {
        let table = PropertyTable::shared();
        for plane in 3..=13u32 {
            let base = plane << 16;
            for offset in [0x0000, 0x0041, 0x8000, 0xFFFF] {
                assert_eq!(table.category(base | offset), Category::Unassigned);
            }
        }
    }

    #[test]
    fn test_out_of_range_code_points() {
        let table = PropertyTable::shared();
        assert_eq!(table.category(0x11_0000), Category::Unassigned);
        assert_eq!(table.category(u32::MAX), Category::Unassigned);
        assert_eq!(table.record(0x11_0000), None);
    }

    #[test]
    fn test_from_packed_leaves_missing_planes_unassigned() {
        let table = PropertyTable::from_packed(&LATIN1_PACKED, &[]).unwrap();
        assert_eq!(table.category('A' as u32), Category::UppercaseLetter);
        assert_eq!(table.category(0x0300), Category::Unassigned);
    }

    #[test]
    fn test_from_packed_rejects_short_plane() {
        let short = vec![0u16; PLANE_SIZE];
        let err = PropertyTable::from_packed(&LATIN1_PACKED, &[(0, short.as_slice())]).unwrap_err();
        assert!(matches!(err, Error::Integrity { .. }));

        let err = PropertyTable::from_packed(&LATIN1_PACKED[..10], &[]).unwrap_err();
        assert!(matches!(err, Error::Integrity { found: 10, .. }));
    }
}
