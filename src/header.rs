//! Read header grammar: `@<read-id>[#<BARCODE>/<mate>][ <description>]`.
//!
//! Without a `#` the header may still carry a trailing `/<mate>`. Once a `#`
//! is present the barcode must be non-empty and followed by a numeric mate.

use crate::error::HeaderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadHeader<'a> {
    pub id: &'a str,
    pub barcode: Option<&'a str>,
    pub mate: Option<u8>,
}

impl<'a> ReadHeader<'a> {
    pub fn parse(line: &'a str) -> Result<Self, HeaderError> {
        let body = line.strip_prefix('@').ok_or(HeaderError::MissingAt)?;
        let name = body.split(char::is_whitespace).next().unwrap_or("");

        let (id, barcode, mate) = match name.split_once('#') {
            Some((id, tail)) => {
                let (barcode, mate) = tail.split_once('/').ok_or(HeaderError::MissingMate)?;
                if barcode.is_empty() {
                    return Err(HeaderError::EmptyBarcode);
                }
                (id, Some(barcode), Some(parse_mate(mate)?))
            }
            None => match name.rsplit_once('/') {
                Some((id, mate)) if !mate.is_empty() && mate.bytes().all(|b| b.is_ascii_digit()) => {
                    (id, None, Some(parse_mate(mate)?))
                }
                _ => (name, None, None),
            },
        };

        if id.is_empty() {
            return Err(HeaderError::EmptyId);
        }
        Ok(Self { id, barcode, mate })
    }

    /// Only the read id: the `@` marker and a non-empty name before any `#`
    /// or `/`. The rest of the header is not inspected.
    pub fn parse_id(line: &'a str) -> Result<&'a str, HeaderError> {
        let body = line.strip_prefix('@').ok_or(HeaderError::MissingAt)?;
        let name = body.split(char::is_whitespace).next().unwrap_or("");
        let id = name.split(['#', '/']).next().unwrap_or("");
        if id.is_empty() {
            return Err(HeaderError::EmptyId);
        }
        Ok(id)
    }

    /// The barcode token, for callers that cannot proceed without one.
    pub fn require_barcode(&self) -> Result<&'a str, HeaderError> {
        self.barcode.ok_or(HeaderError::MissingBarcode)
    }
}

fn parse_mate(s: &str) -> Result<u8, HeaderError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(HeaderError::InvalidMate(s.to_string()));
    }
    s.parse().map_err(|_| HeaderError::InvalidMate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_header() {
        let h = ReadHeader::parse("@HWI-ST:1:2#ACGT/1").unwrap();
        assert_eq!(h.id, "HWI-ST:1:2");
        assert_eq!(h.barcode, Some("ACGT"));
        assert_eq!(h.mate, Some(1));
    }

    #[test]
    fn plain_and_mate_only() {
        let h = ReadHeader::parse("@read7 some description").unwrap();
        assert_eq!((h.id, h.barcode, h.mate), ("read7", None, None));
        assert_eq!(h.require_barcode(), Err(HeaderError::MissingBarcode));

        let h = ReadHeader::parse("@read7/2").unwrap();
        assert_eq!((h.id, h.mate), ("read7", Some(2)));
    }

    #[test]
    fn malformed() {
        assert_eq!(ReadHeader::parse("read"), Err(HeaderError::MissingAt));
        assert_eq!(ReadHeader::parse("@#AAA/1"), Err(HeaderError::EmptyId));
        assert_eq!(ReadHeader::parse("@r#AAA"), Err(HeaderError::MissingMate));
        assert_eq!(ReadHeader::parse("@r#/1"), Err(HeaderError::EmptyBarcode));
        assert_eq!(
            ReadHeader::parse("@r#AAA/x"),
            Err(HeaderError::InvalidMate("x".into()))
        );
        assert_eq!(
            ReadHeader::parse("@r#AAA/999"),
            Err(HeaderError::InvalidMate("999".into()))
        );
    }

    #[test]
    fn id_only_ignores_barcode_grammar() {
        assert_eq!(ReadHeader::parse_id("@r#AAA"), Ok("r"));
        assert_eq!(ReadHeader::parse_id("@r#/x extra"), Ok("r"));
        assert_eq!(ReadHeader::parse_id("@read7/2"), Ok("read7"));
        assert_eq!(ReadHeader::parse_id("@#AAA/1"), Err(HeaderError::EmptyId));
        assert_eq!(ReadHeader::parse_id("@ desc"), Err(HeaderError::EmptyId));
        assert_eq!(ReadHeader::parse_id("r#AAA/1"), Err(HeaderError::MissingAt));
    }
}
