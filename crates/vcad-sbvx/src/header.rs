use std::io::{Read, Write};

use vcad_kernel_types::CadError;

pub const MAGIC: [u8; 5] = *b"SBVX\0";
pub const VERSION: u8 = 1;
pub const HEADER_LEN: usize = 5 + 1 + 1 + 12 + 12 + 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Dense = 0,
    Sparse = 1,
}

impl Encoding {
    pub fn from_byte(b: u8) -> Result<Self, CadError> {
        match b {
            0 => Ok(Encoding::Dense),
            1 => Ok(Encoding::Sparse),
            other => Err(CadError::invalid_format(format!(
                "unsupported SBVX encoding byte {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Header {
    pub encoding: Encoding,
    pub origin: (i32, i32, i32),
    pub size: (u32, u32, u32),
    pub payload_len: u64,
}

impl Header {
    pub fn write(&self, w: &mut impl Write) -> Result<(), CadError> {
        w.write_all(&MAGIC)?;
        w.write_all(&[VERSION])?;
        w.write_all(&[self.encoding as u8])?;
        w.write_all(&self.origin.0.to_le_bytes())?;
        w.write_all(&self.origin.1.to_le_bytes())?;
        w.write_all(&self.origin.2.to_le_bytes())?;
        w.write_all(&self.size.0.to_le_bytes())?;
        w.write_all(&self.size.1.to_le_bytes())?;
        w.write_all(&self.size.2.to_le_bytes())?;
        w.write_all(&self.payload_len.to_le_bytes())?;
        Ok(())
    }

    pub fn read(r: &mut impl Read) -> Result<Self, CadError> {
        let mut buf = [0u8; HEADER_LEN];
        r.read_exact(&mut buf)
            .map_err(|e| CadError::invalid_format(format!("truncated SBVX header: {e}")))?;
        if buf[0..5] != MAGIC {
            return Err(CadError::invalid_format("SBVX magic mismatch"));
        }
        let version = buf[5];
        if version != VERSION {
            return Err(CadError::invalid_format(format!(
                "unsupported SBVX version {version}"
            )));
        }
        let encoding = Encoding::from_byte(buf[6])?;
        let origin = (
            i32::from_le_bytes(buf[7..11].try_into().unwrap()),
            i32::from_le_bytes(buf[11..15].try_into().unwrap()),
            i32::from_le_bytes(buf[15..19].try_into().unwrap()),
        );
        let size = (
            u32::from_le_bytes(buf[19..23].try_into().unwrap()),
            u32::from_le_bytes(buf[23..27].try_into().unwrap()),
            u32::from_le_bytes(buf[27..31].try_into().unwrap()),
        );
        let payload_len = u64::from_le_bytes(buf[31..39].try_into().unwrap());
        Ok(Header {
            encoding,
            origin,
            size,
            payload_len,
        })
    }
}
