//! Binary codec for the `.biom` planetary surface format.
//!
//! The layout is fixed and little-endian, in exact field order:
//!
//! 1. `magic`: u16, always `0x105`
//! 2. `numBiomes`: u32, rebuilt from the id table on every write
//! 3. `biomeIds`: `numBiomes` x u32
//! 4. u32 constant `2`
//! 5. u32 pair `[256, 256]`
//! 6. u32 constant `65536`
//! 7. `biomeGridN`: 65536 x u32
//! 8. u32 constant `65536`
//! 9. `resrcGridN`: 65536 x u8
//! 10. u32 pair `[256, 256]`
//! 11. u32 constant `65536`
//! 12. `biomeGridS`: 65536 x u32
//! 13. u32 constant `65536`
//! 14. `resrcGridS`: 65536 x u8
//!
//! Parsing rejects any constant mismatch and any trailing bytes. Building
//! validates every grid length before a single byte is written, so output is
//! all-or-nothing.

use crate::biom::BiomFile;
use crate::error::{BiomError, Result};

/// Magic number at the start of every `.biom` file.
pub const MAGIC: u16 = 0x105;

/// Edge length of one hemisphere grid.
pub const GRID_DIM: usize = 256;

/// Element count of one flattened hemisphere grid.
pub const GRID_FLAT: usize = GRID_DIM * GRID_DIM;

/// Constant written between the biome id table and the grid block.
const GRID_COUNT: u32 = 2;

/// Byte cursor over the input with offset tracking for error reporting.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, n: usize, field: &'static str) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(BiomError::Truncated {
                field,
                offset: self.pos,
                needed: n - self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_u16(&mut self, field: &'static str) -> Result<u16> {
        let b = self.take(2, field)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn read_u32(&mut self, field: &'static str) -> Result<u32> {
        let b = self.take(4, field)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn expect_u16(&mut self, field: &'static str, expected: u16) -> Result<()> {
        let offset = self.pos;
        let actual = self.read_u16(field)?;
        if actual != expected {
            return Err(BiomError::Format {
                field,
                offset,
                expected: expected as u64,
                actual: actual as u64,
            });
        }
        Ok(())
    }

    fn expect_u32(&mut self, field: &'static str, expected: u32) -> Result<()> {
        let offset = self.pos;
        let actual = self.read_u32(field)?;
        if actual != expected {
            return Err(BiomError::Format {
                field,
                offset,
                expected: expected as u64,
                actual: actual as u64,
            });
        }
        Ok(())
    }

    /// Expect the `[256, 256]` grid dimension pair.
    fn expect_grid_size(&mut self, field: &'static str) -> Result<()> {
        self.expect_u32(field, GRID_DIM as u32)?;
        self.expect_u32(field, GRID_DIM as u32)
    }

    fn read_u32_seq(&mut self, count: usize, field: &'static str) -> Result<Vec<u32>> {
        let bytes = self.take(count * 4, field)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }

    fn read_u8_seq(&mut self, count: usize, field: &'static str) -> Result<Vec<u8>> {
        Ok(self.take(count, field)?.to_vec())
    }
}

/// Parse a full `.biom` blob.
///
/// Fields are read strictly in layout order; the first constant that does not
/// match its expected literal aborts the parse, as do truncation and trailing
/// bytes. Id semantics are not validated here.
pub fn parse(bytes: &[u8]) -> Result<BiomFile> {
    let mut r = Reader::new(bytes);

    r.expect_u16("magic", MAGIC)?;
    let num_biomes = r.read_u32("numBiomes")? as usize;
    let biome_ids = r.read_u32_seq(num_biomes, "biomeIds")?;

    r.expect_u32("gridCount", GRID_COUNT)?;
    r.expect_grid_size("gridSizeN")?;

    r.expect_u32("biomeGridN.size", GRID_FLAT as u32)?;
    let biome_grid_n = r.read_u32_seq(GRID_FLAT, "biomeGridN")?;
    r.expect_u32("resrcGridN.size", GRID_FLAT as u32)?;
    let resrc_grid_n = r.read_u8_seq(GRID_FLAT, "resrcGridN")?;

    r.expect_grid_size("gridSizeS")?;

    r.expect_u32("biomeGridS.size", GRID_FLAT as u32)?;
    let biome_grid_s = r.read_u32_seq(GRID_FLAT, "biomeGridS")?;
    r.expect_u32("resrcGridS.size", GRID_FLAT as u32)?;
    let resrc_grid_s = r.read_u8_seq(GRID_FLAT, "resrcGridS")?;

    if r.remaining() != 0 {
        return Err(BiomError::TrailingBytes {
            remaining: r.remaining(),
        });
    }

    Ok(BiomFile {
        biome_ids,
        biome_grid_n,
        biome_grid_s,
        resrc_grid_n,
        resrc_grid_s,
    })
}

fn check_grid_len(field: &'static str, actual: usize) -> Result<()> {
    if actual != GRID_FLAT {
        return Err(BiomError::GridLength {
            field,
            expected: GRID_FLAT,
            actual,
        });
    }
    Ok(())
}

fn push_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Build a full `.biom` blob.
///
/// `numBiomes` is always recomputed from the id table, never taken from any
/// previously stored count. All four grid lengths are validated up front, so
/// a failure produces no partial output.
pub fn build(file: &BiomFile) -> Result<Vec<u8>> {
    check_grid_len("biomeGridN", file.biome_grid_n.len())?;
    check_grid_len("resrcGridN", file.resrc_grid_n.len())?;
    check_grid_len("biomeGridS", file.biome_grid_s.len())?;
    check_grid_len("resrcGridS", file.resrc_grid_s.len())?;

    let mut out = Vec::with_capacity(2 + 4 + file.biome_ids.len() * 4 + 36 + GRID_FLAT * 10);

    out.extend_from_slice(&MAGIC.to_le_bytes());
    push_u32(&mut out, file.biome_ids.len() as u32);
    for &id in &file.biome_ids {
        push_u32(&mut out, id);
    }

    push_u32(&mut out, GRID_COUNT);
    push_u32(&mut out, GRID_DIM as u32);
    push_u32(&mut out, GRID_DIM as u32);

    push_u32(&mut out, GRID_FLAT as u32);
    for &id in &file.biome_grid_n {
        push_u32(&mut out, id);
    }
    push_u32(&mut out, GRID_FLAT as u32);
    out.extend_from_slice(&file.resrc_grid_n);

    push_u32(&mut out, GRID_DIM as u32);
    push_u32(&mut out, GRID_DIM as u32);

    push_u32(&mut out, GRID_FLAT as u32);
    for &id in &file.biome_grid_s {
        push_u32(&mut out, id);
    }
    push_u32(&mut out, GRID_FLAT as u32);
    out.extend_from_slice(&file.resrc_grid_s);

    Ok(out)
}
