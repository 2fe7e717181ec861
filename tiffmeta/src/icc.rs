use std::fmt;

use crate::error::{Result, TiffError};

/// 'acsp' at byte 36 of every ICC profile
pub const PROFILE_SIGNATURE: [u8; 4] = *b"acsp";
pub const HEADER_SIZE: usize = 128;

/// The few ICC header fields worth reporting when a profile passes through.
#[derive(Debug, Clone, PartialEq)]
pub struct IccHeader {
    pub size: u32,
    pub version: (u8, u8),
    pub device_class: String,
    pub color_space: String,
    pub pcs: String,
}

impl IccHeader {
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(TiffError::Profile(format!(
                "need {} header bytes got {}",
                HEADER_SIZE,
                data.len()
            )));
        }
        if data[36..40] != PROFILE_SIGNATURE {
            return Err(TiffError::Profile(format!(
                "missing 'acsp' signature, found {:02x?}",
                &data[36..40]
            )));
        }
        Ok(IccHeader {
            size: u32::from_be_bytes([data[0], data[1], data[2], data[3]]),
            version: (data[8], data[9] >> 4),
            device_class: signature(&data[12..16]),
            color_space: signature(&data[16..20]),
            pcs: signature(&data[20..24]),
        })
    }
}

impl fmt::Display for IccHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "v{}.{} class:{} space:{} pcs:{} size:{}",
            self.version.0, self.version.1, self.device_class, self.color_space, self.pcs, self.size
        )
    }
}

fn signature(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii_graphic() { b as char } else { ' ' })
        .collect::<String>()
        .trim_end()
        .to_string()
}

#[cfg(test)]
pub(crate) fn sample_header(color_space: &[u8; 4]) -> Vec<u8> {
    let mut data = vec![0u8; HEADER_SIZE];
    data[0..4].copy_from_slice(&(HEADER_SIZE as u32).to_be_bytes());
    data[8] = 2;
    data[9] = 0x10;
    data[12..16].copy_from_slice(b"prtr");
    data[16..20].copy_from_slice(color_space);
    data[20..24].copy_from_slice(b"Lab ");
    data[36..40].copy_from_slice(&PROFILE_SIGNATURE);
    data
}
