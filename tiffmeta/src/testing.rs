use std::io::{Cursor, Seek, Write};

use tiff::encoder::{colortype, DirectoryEncoder, TiffEncoder, TiffKind};
use tiff::tags::{Tag, Type};
use tiff::Directory;

/// Run `build` against an encoder over an in-memory file and return the bytes.
pub(crate) fn encode<F>(build: F) -> Vec<u8>
where
    F: FnOnce(&mut TiffEncoder<&mut Cursor<Vec<u8>>>),
{
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = TiffEncoder::new(&mut buf).unwrap();
        build(&mut encoder);
    }
    buf.into_inner()
}

pub(crate) fn gray(width: u32, height: u32) -> Vec<u8> {
    encode(|tiff| {
        let data = vec![0u8; (width * height) as usize];
        tiff.write_image::<colortype::Gray8>(width, height, &data)
            .unwrap();
    })
}

/// Add `tag` with already encoded `data`, bypassing the encoder's value checks.
pub(crate) fn raw_entry<W: Write + Seek, K: TiffKind>(
    dir: &mut DirectoryEncoder<'_, W, K>,
    tag: Tag,
    field_type: Type,
    data: &[u8],
) {
    let entry = dir.write_entry_bytes(field_type, data).unwrap();
    dir.extend_from(&Directory::from_iter([(tag, entry)]));
}

/// Point the value of `tag` in the first directory of a classic file past
/// the end of the data.
pub(crate) fn point_past_end(buf: &mut [u8], tag: u16) {
    let little = buf[0] == b'I';
    let u16_at = |buf: &[u8], at: usize| {
        let raw = [buf[at], buf[at + 1]];
        if little {
            u16::from_le_bytes(raw)
        } else {
            u16::from_be_bytes(raw)
        }
    };
    let raw = [buf[4], buf[5], buf[6], buf[7]];
    let ifd = if little {
        u32::from_le_bytes(raw)
    } else {
        u32::from_be_bytes(raw)
    } as usize;
    let count = u16_at(buf, ifd) as usize;
    let at = (0..count)
        .map(|i| ifd + 2 + i * 12)
        .find(|&at| u16_at(buf, at) == tag)
        .unwrap();
    let offset = buf.len() as u32 + 1000;
    let bytes = if little {
        offset.to_le_bytes()
    } else {
        offset.to_be_bytes()
    };
    buf[at + 8..at + 12].copy_from_slice(&bytes);
}
