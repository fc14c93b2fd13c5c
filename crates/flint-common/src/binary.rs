use std::fmt;

/// The buffer ended before the requested value was complete.
///
/// This is not a malformed-input error: the caller is expected to retry the
/// same read once more bytes have arrived. Reads that fail with
/// `Incomplete` leave the reader's position untouched, so a retry starts
/// from the same field boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Incomplete;

impl fmt::Display for Incomplete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not enough bytes buffered to complete the read")
    }
}

impl std::error::Error for Incomplete {}

/// Bounds-checked little-endian cursor over a byte slice.
///
/// All multi-byte integers are read little-endian. Every read either
/// returns the value and advances the position, or returns [`Incomplete`]
/// and leaves the position exactly where it was — including the composite
/// reads ([`utf8_len8`](Self::utf8_len8), [`utf16_len8`](Self::utf16_len8),
/// [`c_string`](Self::c_string)), which roll back their length prefix when
/// the payload is short. This all-or-nothing behavior is what lets an
/// incremental decoder re-attempt a record after buffering more input.
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a reader at the start of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Read a single byte.
    pub fn u8(&mut self) -> Result<u8, Incomplete> {
        let byte = *self.bytes.get(self.pos).ok_or(Incomplete)?;
        self.pos += 1;
        Ok(byte)
    }

    /// Read a little-endian `u64`.
    pub fn u64_le(&mut self) -> Result<u64, Incomplete> {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(self.slice(8)?);
        Ok(u64::from_le_bytes(raw))
    }

    /// Read exactly `n` raw bytes.
    pub fn slice(&mut self, n: usize) -> Result<&'a [u8], Incomplete> {
        let end = self.pos.checked_add(n).ok_or(Incomplete)?;
        let bytes = self.bytes.get(self.pos..end).ok_or(Incomplete)?;
        self.pos = end;
        Ok(bytes)
    }

    /// Read a `utf8_len8` string: a u64 LE byte count followed by that many
    /// bytes of UTF-8 text. The bytes are returned unvalidated.
    pub fn utf8_len8(&mut self) -> Result<&'a [u8], Incomplete> {
        let start = self.pos;
        self.composite(start, |r| {
            let len = r.u64_le()?;
            let n = usize::try_from(len).map_err(|_| Incomplete)?;
            r.slice(n)
        })
    }

    /// Read a `utf16_len8` string: a u64 LE code-unit count followed by
    /// twice that many bytes of UTF-16LE text, decoded into code units.
    pub fn utf16_len8(&mut self) -> Result<Vec<u16>, Incomplete> {
        let start = self.pos;
        self.composite(start, |r| {
            let count = r.u64_le()?;
            let units = usize::try_from(count).map_err(|_| Incomplete)?;
            let byte_len = units.checked_mul(2).ok_or(Incomplete)?;
            let raw = r.slice(byte_len)?;
            Ok(raw
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                .collect())
        })
    }

    /// Read a null-terminated byte string, consuming the terminator.
    /// The returned slice excludes the terminator.
    pub fn c_string(&mut self) -> Result<&'a [u8], Incomplete> {
        let unread = &self.bytes[self.pos..];
        let nul = unread.iter().position(|&b| b == 0).ok_or(Incomplete)?;
        let text = &unread[..nul];
        self.pos += nul + 1;
        Ok(text)
    }

    /// Run a multi-field read, restoring `start` on failure so the whole
    /// composite consumes nothing unless it fully succeeds.
    fn composite<T>(
        &mut self,
        start: usize,
        read: impl FnOnce(&mut Self) -> Result<T, Incomplete>,
    ) -> Result<T, Incomplete> {
        let result = read(self);
        if result.is_err() {
            self.pos = start;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u8_reads_and_advances() {
        let mut r = ByteReader::new(&[0xab, 0xcd]);
        assert_eq!(r.u8(), Ok(0xab));
        assert_eq!(r.position(), 1);
        assert_eq!(r.u8(), Ok(0xcd));
        assert_eq!(r.u8(), Err(Incomplete));
        assert_eq!(r.position(), 2);
    }

    #[test]
    fn u64_le_decodes_little_endian() {
        let mut r = ByteReader::new(&[0x34, 0x12, 0, 0, 0, 0, 0, 0]);
        assert_eq!(r.u64_le(), Ok(0x1234));
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn u64_le_short_buffer_does_not_advance() {
        let mut r = ByteReader::new(&[1, 2, 3]);
        assert_eq!(r.u64_le(), Err(Incomplete));
        assert_eq!(r.position(), 0);
    }

    #[test]
    fn slice_is_bounds_checked() {
        let mut r = ByteReader::new(b"abcd");
        assert_eq!(r.slice(3), Ok(&b"abc"[..]));
        assert_eq!(r.slice(2), Err(Incomplete));
        assert_eq!(r.position(), 3);
        assert_eq!(r.slice(1), Ok(&b"d"[..]));
    }

    #[test]
    fn utf8_len8_reads_prefix_and_payload() {
        let mut input = vec![5, 0, 0, 0, 0, 0, 0, 0];
        input.extend_from_slice(b"hello");
        let mut r = ByteReader::new(&input);
        assert_eq!(r.utf8_len8(), Ok(&b"hello"[..]));
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn utf8_len8_rolls_back_on_short_payload() {
        // Length prefix says 5 bytes but only 2 are buffered.
        let mut input = vec![5, 0, 0, 0, 0, 0, 0, 0];
        input.extend_from_slice(b"he");
        let mut r = ByteReader::new(&input);
        assert_eq!(r.utf8_len8(), Err(Incomplete));
        assert_eq!(r.position(), 0);
    }

    #[test]
    fn utf16_len8_decodes_code_units() {
        let mut input = vec![2, 0, 0, 0, 0, 0, 0, 0];
        input.extend_from_slice(&[b'h', 0, b'i', 0]);
        let mut r = ByteReader::new(&input);
        assert_eq!(r.utf16_len8(), Ok(vec![u16::from(b'h'), u16::from(b'i')]));
    }

    #[test]
    fn utf16_len8_rolls_back_on_short_payload() {
        // Two code units declared, only one buffered.
        let mut input = vec![2, 0, 0, 0, 0, 0, 0, 0];
        input.extend_from_slice(&[b'h', 0]);
        let mut r = ByteReader::new(&input);
        assert_eq!(r.utf16_len8(), Err(Incomplete));
        assert_eq!(r.position(), 0);
    }

    #[test]
    fn c_string_stops_at_terminator() {
        let mut r = ByteReader::new(b"abc\0def\0");
        assert_eq!(r.c_string(), Ok(&b"abc"[..]));
        assert_eq!(r.c_string(), Ok(&b"def"[..]));
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn c_string_without_terminator_does_not_advance() {
        let mut r = ByteReader::new(b"abc");
        assert_eq!(r.c_string(), Err(Incomplete));
        assert_eq!(r.position(), 0);
    }

    #[test]
    fn empty_c_string() {
        let mut r = ByteReader::new(&[0]);
        assert_eq!(r.c_string(), Ok(&b""[..]));
        assert_eq!(r.remaining(), 0);
    }
}
