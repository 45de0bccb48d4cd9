use std::io::Write;

use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::{Error, Result};
use crate::models::FontFormat;

const WOFF_SIGNATURE: u32 = 0x774F_4646; // 'wOFF'
const WOFF2_SIGNATURE: u32 = 0x774F_4632; // 'wOF2'
const EOT_MAGIC: u16 = 0x504C;
// Fixed fields plus five empty, padded name strings
const EOT_HEADER_SIZE: usize = 100;

/// External conversion seam: one call per (source file, target format)
pub trait Transcode {
    /// Convert font data into the target format
    fn transcode(&self, data: &[u8], source: FontFormat, target: FontFormat) -> Result<Vec<u8>>;
}

/// Container-level packager for validated font data.
///
/// Repackages sfnt data into the EOT, WOFF and WOFF2 containers and re-emits
/// identity pairs. Glyph outline conversion is left to dedicated font
/// tooling; pairs that would require it are refused as unsupported, which
/// the conversion stage logs and skips.
pub struct SfntPackager;

impl Transcode for SfntPackager {
    fn transcode(&self, data: &[u8], source: FontFormat, target: FontFormat) -> Result<Vec<u8>> {
        match (source, target) {
            (FontFormat::Ttf | FontFormat::Otf, FontFormat::Ttf | FontFormat::Otf) => {
                Ok(data.to_vec())
            }
            (FontFormat::Ttf | FontFormat::Otf, FontFormat::Eot) => package_eot(data),
            (FontFormat::Ttf | FontFormat::Otf, FontFormat::Woff) => package_woff(data),
            (FontFormat::Ttf | FontFormat::Otf, FontFormat::Woff2) => package_woff2(data),
            (FontFormat::Svg, FontFormat::Svg) => Ok(data.to_vec()),
            _ => Err(Error::Unsupported(format!(
                "no {} to {} conversion available",
                source, target
            ))),
        }
    }
}

/// One entry of an sfnt table directory
struct SfntTable {
    tag: [u8; 4],
    checksum: u32,
    offset: u32,
    length: u32,
}

/// Parse the sfnt header and table directory, returning the flavor word and
/// the tables in physical (offset) order.
fn parse_sfnt(data: &[u8]) -> Result<(u32, Vec<SfntTable>)> {
    if data.len() < 12 {
        return Err(Error::Font("sfnt data truncated".to_string()));
    }

    let flavor = BigEndian::read_u32(&data[0..4]);
    let num_tables = BigEndian::read_u16(&data[4..6]) as usize;
    let directory_end = 12 + num_tables * 16;
    if data.len() < directory_end {
        return Err(Error::Font("sfnt table directory truncated".to_string()));
    }

    let mut tables = Vec::with_capacity(num_tables);
    for i in 0..num_tables {
        let record = &data[12 + i * 16..12 + (i + 1) * 16];
        let mut tag = [0u8; 4];
        tag.copy_from_slice(&record[0..4]);
        let checksum = BigEndian::read_u32(&record[4..8]);
        let offset = BigEndian::read_u32(&record[8..12]);
        let length = BigEndian::read_u32(&record[12..16]);
        if offset as u64 + length as u64 > data.len() as u64 {
            return Err(Error::Font(format!(
                "table {} extends past the end of the font",
                String::from_utf8_lossy(&tag)
            )));
        }
        tables.push(SfntTable {
            tag,
            checksum,
            offset,
            length,
        });
    }

    tables.sort_by_key(|table| table.offset);
    Ok((flavor, tables))
}

fn table_bytes<'a>(data: &'a [u8], table: &SfntTable) -> &'a [u8] {
    let start = table.offset as usize;
    &data[start..start + table.length as usize]
}

/// Round a length up to the sfnt 4-byte boundary
fn padded_len(len: usize) -> usize {
    (len + 3) & !3
}

/// Uncompressed size of the font once a container is unpacked again
fn total_sfnt_size(tables: &[SfntTable]) -> usize {
    12 + tables.len() * 16
        + tables
            .iter()
            .map(|table| padded_len(table.length as usize))
            .sum::<usize>()
}

/// Package sfnt data into a WOFF 1.0 container.
///
/// Each table is zlib-compressed independently; tables that do not shrink
/// are stored raw, as the container format requires.
fn package_woff(data: &[u8]) -> Result<Vec<u8>> {
    let (flavor, tables) = parse_sfnt(data)?;

    let mut packed_tables: Vec<Vec<u8>> = Vec::with_capacity(tables.len());
    for table in &tables {
        let raw = table_bytes(data, table);
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(raw)?;
        let packed = encoder.finish()?;
        packed_tables.push(if packed.len() < raw.len() {
            packed
        } else {
            raw.to_vec()
        });
    }

    let mut data_offset = 44 + tables.len() * 20;
    let total_len = data_offset
        + packed_tables
            .iter()
            .map(|packed| padded_len(packed.len()))
            .sum::<usize>();

    let mut out = Vec::with_capacity(total_len);
    out.write_u32::<BigEndian>(WOFF_SIGNATURE)?;
    out.write_u32::<BigEndian>(flavor)?;
    out.write_u32::<BigEndian>(total_len as u32)?;
    out.write_u16::<BigEndian>(tables.len() as u16)?;
    out.write_u16::<BigEndian>(0)?; // reserved
    out.write_u32::<BigEndian>(total_sfnt_size(&tables) as u32)?;
    out.write_u16::<BigEndian>(1)?; // majorVersion
    out.write_u16::<BigEndian>(0)?; // minorVersion
    for _ in 0..5 {
        out.write_u32::<BigEndian>(0)?; // metadata and private blocks unused
    }

    for (table, packed) in tables.iter().zip(&packed_tables) {
        out.write_all(&table.tag)?;
        out.write_u32::<BigEndian>(data_offset as u32)?;
        out.write_u32::<BigEndian>(packed.len() as u32)?;
        out.write_u32::<BigEndian>(table.length)?;
        out.write_u32::<BigEndian>(table.checksum)?;
        data_offset += padded_len(packed.len());
    }

    for packed in &packed_tables {
        out.write_all(packed)?;
        // Table data starts 4-aligned, so aligning the buffer end keeps
        // every directory offset honest
        while out.len() % 4 != 0 {
            out.push(0);
        }
    }

    Ok(out)
}

/// Package sfnt data into a WOFF2 container.
///
/// Null transforms throughout: the directory uses arbitrary-tag entries and
/// the data block is the original tables, concatenated and Brotli-packed.
fn package_woff2(data: &[u8]) -> Result<Vec<u8>> {
    let (flavor, tables) = parse_sfnt(data)?;

    let mut directory = Vec::new();
    let mut stream = Vec::new();
    for table in &tables {
        // Arbitrary-tag entry; glyf and loca must carry transform version 3
        // to mean "not transformed", every other table uses version 0.
        let flags: u8 = if &table.tag == b"glyf" || &table.tag == b"loca" {
            0x3F | 0xC0
        } else {
            0x3F
        };
        directory.push(flags);
        directory.extend_from_slice(&table.tag);
        write_uint_base128(&mut directory, table.length);
        stream.extend_from_slice(table_bytes(data, table));
    }

    let mut packed = Vec::new();
    {
        let mut writer = brotli::CompressorWriter::new(&mut packed, 4096, 11, 22);
        writer.write_all(&stream)?;
    }

    let total_len = 48 + directory.len() + packed.len();
    let mut out = Vec::with_capacity(total_len);
    out.write_u32::<BigEndian>(WOFF2_SIGNATURE)?;
    out.write_u32::<BigEndian>(flavor)?;
    out.write_u32::<BigEndian>(total_len as u32)?;
    out.write_u16::<BigEndian>(tables.len() as u16)?;
    out.write_u16::<BigEndian>(0)?; // reserved
    out.write_u32::<BigEndian>(total_sfnt_size(&tables) as u32)?;
    out.write_u32::<BigEndian>(packed.len() as u32)?;
    out.write_u16::<BigEndian>(1)?; // majorVersion
    out.write_u16::<BigEndian>(0)?; // minorVersion
    for _ in 0..5 {
        out.write_u32::<BigEndian>(0)?; // metadata and private blocks unused
    }
    out.extend_from_slice(&directory);
    out.extend_from_slice(&packed);

    Ok(out)
}

/// UIntBase128: 7 bits per byte, most significant first, high bit marks
/// continuation.
fn write_uint_base128(out: &mut Vec<u8>, mut value: u32) {
    let mut bytes = [0u8; 5];
    let mut index = 4;
    bytes[index] = (value & 0x7F) as u8;
    value >>= 7;
    while value > 0 {
        index -= 1;
        bytes[index] = 0x80 | (value & 0x7F) as u8;
        value >>= 7;
    }
    out.extend_from_slice(&bytes[index..]);
}

/// Package sfnt data into an EOT wrapper.
///
/// The header carries empty name fields; the checksum adjustment is lifted
/// from the head table when the font has one.
fn package_eot(data: &[u8]) -> Result<Vec<u8>> {
    let (_, tables) = parse_sfnt(data)?;

    let mut checksum_adjustment = 0u32;
    for table in &tables {
        if &table.tag == b"head" && table.length >= 12 {
            checksum_adjustment = BigEndian::read_u32(&table_bytes(data, table)[8..12]);
        }
    }

    let total_len = EOT_HEADER_SIZE + data.len();
    let mut out = Vec::with_capacity(total_len);
    out.write_u32::<LittleEndian>(total_len as u32)?; // EOTSize
    out.write_u32::<LittleEndian>(data.len() as u32)?; // FontDataSize
    out.write_u32::<LittleEndian>(0x0002_0002)?; // Version
    out.write_u32::<LittleEndian>(0)?; // Flags
    out.write_all(&[0u8; 10])?; // FontPANOSE
    out.write_u8(0x01)?; // Charset
    out.write_u8(0)?; // Italic
    out.write_u32::<LittleEndian>(0)?; // Weight
    out.write_u16::<LittleEndian>(0)?; // fsType
    out.write_u16::<LittleEndian>(EOT_MAGIC)?;
    for _ in 0..4 {
        out.write_u32::<LittleEndian>(0)?; // UnicodeRange
    }
    for _ in 0..2 {
        out.write_u32::<LittleEndian>(0)?; // CodePageRange
    }
    out.write_u32::<LittleEndian>(checksum_adjustment)?;
    for _ in 0..4 {
        out.write_u32::<LittleEndian>(0)?; // Reserved
    }
    // Family, style, version, full and root name strings, all empty:
    // a padding word followed by a zero size word each.
    for _ in 0..5 {
        out.write_u16::<LittleEndian>(0)?;
        out.write_u16::<LittleEndian>(0)?;
    }
    out.write_all(data)?;

    Ok(out)
}
