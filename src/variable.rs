use byteorder::ByteOrder;

use crate::constants::{TAG_BYTES, VAR_BYTES};
use crate::{Endian, ErrorKind};

const TAG_INT: u32 = 0;
const TAG_FLOAT: u32 = 1;
const TAG_BOOL: u32 = 2;
const TAG_STRING: u32 = 3;
const TAG_OFFSET: u32 = 4;

/// One tagged runtime cell.
///
/// `Str` carries the byte offset of NUL-terminated character data relative to
/// the data pointer. `Offset` is the L-value form: a signed byte displacement
/// from the stack base, produced only by `LoadVar` and dereferenced wherever
/// a value is consumed. It never appears in static data and is never visible
/// to user code.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Variable {
    Int(i32),
    Float(f32),
    Bool(bool),
    Str(i32),
    Offset(i32),
}

impl Variable {
    /// Writes the cell into `buf`, which must hold at least
    /// [`VAR_BYTES`](constants/constant.VAR_BYTES.html) bytes.
    pub fn encode(self, buf: &mut [u8]) {
        let (tag, payload) = match self {
            Variable::Int(v) => (TAG_INT, v as u32),
            Variable::Float(v) => (TAG_FLOAT, v.to_bits()),
            Variable::Bool(v) => (TAG_BOOL, v as u32),
            Variable::Str(v) => (TAG_STRING, v as u32),
            Variable::Offset(v) => (TAG_OFFSET, v as u32),
        };
        Endian::write_u32(&mut buf[..TAG_BYTES as usize], tag);
        Endian::write_u32(&mut buf[TAG_BYTES as usize..VAR_BYTES as usize], payload);
    }

    pub fn decode(buf: &[u8]) -> Result<Variable, ErrorKind> {
        let tag = Endian::read_u32(&buf[..TAG_BYTES as usize]);
        let payload = Endian::read_u32(&buf[TAG_BYTES as usize..VAR_BYTES as usize]);
        match tag {
            TAG_INT => Ok(Variable::Int(payload as i32)),
            TAG_FLOAT => Ok(Variable::Float(f32::from_bits(payload))),
            TAG_BOOL => Ok(Variable::Bool(payload != 0)),
            TAG_STRING => Ok(Variable::Str(payload as i32)),
            TAG_OFFSET => Ok(Variable::Offset(payload as i32)),
            _ => Err(ErrorKind::TypeMismatch),
        }
    }
}

/// True for a non-empty run of decimal digits.
pub fn is_integer(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// True for `<digits>.<digits>`.
pub fn is_float(s: &str) -> bool {
    match s.find('.') {
        Some(dot) => is_integer(&s[..dot]) && is_integer(&s[dot + 1..]),
        None => false,
    }
}

pub fn is_boolean(s: &str) -> bool {
    s == "true" || s == "false"
}
