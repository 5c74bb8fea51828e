/// Binary encoding: one tag byte followed by a little-endian payload

use super::error::{Result, VariantError};
use super::variant::{Color, EnumValue, ObjectHandle, Variant, VariantKind, Vector2, Vector3};

impl Variant {
    /// Encodes the value as tag byte + little-endian payload.
    ///
    /// Strings and enum type names are written as a u32 byte length followed
    /// by the UTF-8 bytes, so text longer than `u32::MAX` bytes fails with
    /// [`VariantError::Encode`].
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = vec![self.kind().tag()];
        match self {
            Variant::Integer(v) => out.extend_from_slice(&v.to_le_bytes()),
            Variant::Float(v) => out.extend_from_slice(&v.to_le_bytes()),
            Variant::Boolean(v) => out.push(*v as u8),
            Variant::String(v) => write_str(&mut out, v)?,
            Variant::Vector2(v) => write_f32s(&mut out, &[v.x, v.y]),
            Variant::Vector3(v) => write_f32s(&mut out, &[v.x, v.y, v.z]),
            Variant::Color(c) => write_f32s(&mut out, &[c.r, c.g, c.b, c.a]),
            Variant::Enum(e) => {
                write_str(&mut out, &e.type_name)?;
                out.extend_from_slice(&e.value.to_le_bytes());
            }
            Variant::ObjectReference(h) => out.extend_from_slice(&h.0.to_le_bytes()),
            Variant::Null => {}
        }
        Ok(out)
    }

    /// Decodes bytes produced by [`Variant::to_bytes`]. The whole slice must
    /// be consumed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Variant> {
        let mut reader = Reader { bytes, pos: 0 };
        let tag = reader.array::<1>()?[0];
        let kind = VariantKind::from_tag(tag)
            .ok_or_else(|| VariantError::decode(format!("unknown kind tag {}", tag)))?;

        let value = match kind {
            VariantKind::Integer => Variant::Integer(i64::from_le_bytes(reader.array()?)),
            VariantKind::Float => Variant::Float(f64::from_le_bytes(reader.array()?)),
            VariantKind::Boolean => match reader.array::<1>()?[0] {
                0 => Variant::Boolean(false),
                1 => Variant::Boolean(true),
                other => return Err(VariantError::decode(format!("invalid boolean byte {}", other))),
            },
            VariantKind::String => Variant::String(reader.string()?),
            VariantKind::Vector2 => {
                let [x, y] = reader.f32s::<2>()?;
                Variant::Vector2(Vector2 { x, y })
            }
            VariantKind::Vector3 => {
                let [x, y, z] = reader.f32s::<3>()?;
                Variant::Vector3(Vector3 { x, y, z })
            }
            VariantKind::Color => {
                let [r, g, b, a] = reader.f32s::<4>()?;
                Variant::Color(Color { r, g, b, a })
            }
            VariantKind::Enum => {
                let type_name = reader.string()?;
                let value = i64::from_le_bytes(reader.array()?);
                Variant::Enum(EnumValue { type_name, value })
            }
            VariantKind::ObjectReference => {
                Variant::ObjectReference(ObjectHandle(u64::from_le_bytes(reader.array()?)))
            }
            VariantKind::Null => Variant::Null,
        };

        let trailing = bytes.len() - reader.pos;
        if trailing > 0 {
            return Err(VariantError::decode(format!("{} trailing bytes after {}", trailing, kind)));
        }
        Ok(value)
    }
}

fn write_str(out: &mut Vec<u8>, s: &str) -> Result<()> {
    out.extend_from_slice(&length_prefix(s.len())?);
    out.extend_from_slice(s.as_bytes());
    Ok(())
}

fn length_prefix(len: usize) -> Result<[u8; 4]> {
    u32::try_from(len)
        .map(u32::to_le_bytes)
        .map_err(|_| VariantError::Encode(format!("{} bytes exceeds the u32 length prefix", len)))
}

fn write_f32s(out: &mut Vec<u8>, values: &[f32]) {
    for v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| {
                VariantError::decode(format!(
                    "truncated input: need {} bytes at offset {}, have {}",
                    len,
                    self.pos,
                    self.bytes.len() - self.pos
                ))
            })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let slice = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    fn f32s<const N: usize>(&mut self) -> Result<[f32; N]> {
        let mut out = [0.0f32; N];
        for slot in out.iter_mut() {
            *slot = f32::from_le_bytes(self.array()?);
        }
        Ok(out)
    }

    fn string(&mut self) -> Result<String> {
        let len = u32::from_le_bytes(self.array()?) as usize;
        let raw = self.take(len)?;
        String::from_utf8(raw.to_vec()).map_err(|e| VariantError::decode(format!("invalid UTF-8: {}", e)))
    }
}
