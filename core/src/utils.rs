use std::fmt;
use num_enum::TryFromPrimitive;

/// Render a raw code as its enum variant name, or as hex when no variant matches.
pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}

const BYTE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Human-readable byte count in powers of 1024 with one decimal.
///
/// - `0` renders as `"0 Bytes"`.
/// - Anything past terabytes stays in TB.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let group = (bytes.ilog(1024) as usize).min(BYTE_UNITS.len() - 1);
    let scaled = bytes as f64 / 1024f64.powi(group as i32);
    format!("{:.1} {}", scaled, BYTE_UNITS[group])
}
