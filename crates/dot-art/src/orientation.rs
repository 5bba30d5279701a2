//! EXIF orientation lookup for JPEG byte streams.
//!
//! Walks the JPEG marker segments until it finds the APP1/Exif block, then
//! scans IFD0 for the orientation tag. Malformed input never panics: any
//! out-of-range read degrades to [`OrientationTag::Missing`].

use tracing::debug;

/// JPEG start-of-image marker.
const SOI: u16 = 0xFFD8;
/// APP1 marker, which carries the Exif block.
const APP1: u16 = 0xFFE1;
/// ASCII "Exif".
const EXIF_SIGNATURE: u32 = 0x4578_6966;
/// TIFF byte-order mark for little endian ("II").
const LITTLE_ENDIAN_MARK: u16 = 0x4949;
/// IFD tag id of the orientation entry.
const ORIENTATION_TAG: u16 = 0x0112;
/// Size of one IFD entry in bytes.
const IFD_ENTRY_SIZE: usize = 12;

/// Result of looking for an orientation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationTag {
    /// Orientation value as stored (1-8 for well-formed files).
    Found(u16),
    /// JPEG without usable orientation metadata.
    Missing,
    /// Input does not start with a JPEG signature.
    NotJpeg,
}

impl OrientationTag {
    /// Integer form: the stored code, `-1` for missing, `-2` for not a JPEG.
    pub fn code(self) -> i32 {
        match self {
            Self::Found(value) => i32::from(value),
            Self::Missing => -1,
            Self::NotJpeg => -2,
        }
    }
}

/// Read the EXIF orientation from an encoded image.
pub fn read_orientation(bytes: &[u8]) -> OrientationTag {
    if read_u16(bytes, 0, false) != Some(SOI) {
        debug!(len = bytes.len(), "No JPEG signature, skipping orientation");
        return OrientationTag::NotJpeg;
    }

    let tag = scan_segments(bytes).map_or(OrientationTag::Missing, OrientationTag::Found);
    debug!(code = tag.code(), "Read orientation");
    tag
}

fn scan_segments(bytes: &[u8]) -> Option<u16> {
    let mut offset = 2usize;
    while offset < bytes.len() {
        let marker = read_u16(bytes, offset, false)?;
        offset = offset.checked_add(2)?;

        if marker == APP1 {
            let length = usize::from(read_u16(bytes, offset, false)?);
            let payload = offset.checked_add(2)?;
            if let Some(value) = read_exif_orientation(bytes, payload) {
                return Some(value);
            }
            if read_u32(bytes, payload, false)? != EXIF_SIGNATURE {
                return None;
            }
            offset = offset.checked_add(length)?;
        } else if marker & 0xFF00 != 0xFF00 {
            return None;
        } else {
            let length = usize::from(read_u16(bytes, offset, false)?);
            offset = offset.checked_add(length)?;
        }
    }
    None
}

/// Parse the Exif payload starting at `start` (the "Exif" signature).
fn read_exif_orientation(bytes: &[u8], start: usize) -> Option<u16> {
    if read_u32(bytes, start, false)? != EXIF_SIGNATURE {
        return None;
    }

    // "Exif\0\0" precedes the TIFF header
    let tiff = start.checked_add(6)?;
    let little = read_u16(bytes, tiff, false)? == LITTLE_ENDIAN_MARK;
    let ifd_offset = usize::try_from(read_u32(bytes, tiff.checked_add(4)?, little)?).ok()?;
    let ifd = tiff.checked_add(ifd_offset)?;

    let entries = usize::from(read_u16(bytes, ifd, little)?);
    let first_entry = ifd.checked_add(2)?;
    (0..entries).find_map(|i| {
        let entry = first_entry.checked_add(i.checked_mul(IFD_ENTRY_SIZE)?)?;
        if read_u16(bytes, entry, little)? == ORIENTATION_TAG {
            read_u16(bytes, entry.checked_add(8)?, little)
        } else {
            None
        }
    })
}

fn read_u16(bytes: &[u8], offset: usize, little: bool) -> Option<u16> {
    let raw: [u8; 2] = bytes.get(offset..offset.checked_add(2)?)?.try_into().ok()?;
    Some(if little {
        u16::from_le_bytes(raw)
    } else {
        u16::from_be_bytes(raw)
    })
}

fn read_u32(bytes: &[u8], offset: usize, little: bool) -> Option<u32> {
    let raw: [u8; 4] = bytes.get(offset..offset.checked_add(4)?)?.try_into().ok()?;
    Some(if little {
        u32::from_le_bytes(raw)
    } else {
        u32::from_be_bytes(raw)
    })
}
