use crate::beacon::error::MalformedReason;

/// A `key[value]` occurrence inside a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    /// Inner text between the brackets, untrimmed.
    pub value: &'a str,
    /// Byte offset of the key within the searched text.
    pub offset: usize,
}

/// Find the first `key[value]` in `frame`.
///
/// A key only matches at a token boundary, so `R` does not match the tail
/// of `IR[...]`. The value runs up to the first `]`; an occurrence with no
/// closing bracket is skipped.
pub fn find_field<'a>(frame: &'a str, key: &str) -> Option<Field<'a>> {
    if key.is_empty() {
        return None;
    }
    let bytes = frame.as_bytes();

    for (offset, _) in frame.match_indices(key) {
        if offset > 0 && bytes[offset - 1].is_ascii_alphabetic() {
            continue;
        }
        let open = offset + key.len();
        if bytes.get(open) != Some(&b'[') {
            continue;
        }
        let start = open + 1;
        // No `]` left means no later occurrence can close either.
        let len = frame[start..].find(']')?;
        return Some(Field {
            value: &frame[start..start + len],
            offset,
        });
    }

    None
}

/// Split a field value on `,` and parse exactly `N` finite numbers.
///
/// Tokens are parsed as-is: surrounding whitespace makes a token invalid.
pub fn parse_values<const N: usize>(value: &str) -> Result<[f64; N], MalformedReason> {
    let found = value.split(',').count();
    if found != N {
        return Err(MalformedReason::TokenCount { expected: N, found });
    }

    let mut out = [0.0; N];
    for (index, (slot, token)) in out.iter_mut().zip(value.split(',')).enumerate() {
        let parsed: f64 = token.parse().map_err(|_| MalformedReason::NotANumber {
            index,
            token: token.to_string(),
        })?;
        if !parsed.is_finite() {
            return Err(MalformedReason::NonFinite {
                index,
                token: token.to_string(),
            });
        }
        *slot = parsed;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: &str = "Message 23435V[1.3]B[0003266717]D[0000-00-00T00:00:00]L[0.000,0.000,600.0]I[1]R[314.953583,-11.333508,6.500096]A[-0.264000,-0.042000,0.959000]G[-10.465000,-83.466003,15.338000]IR[0,0000000000]E[TFF] @@ RD[0000-01-01T00:53:38]IL";

    #[test]
    fn finds_each_field_regardless_of_order() {
        assert_eq!(find_field(FRAME, "L").unwrap().value, "0.000,0.000,600.0");
        assert_eq!(
            find_field(FRAME, "R").unwrap().value,
            "314.953583,-11.333508,6.500096"
        );
        assert_eq!(
            find_field(FRAME, "G").unwrap().value,
            "-10.465000,-83.466003,15.338000"
        );
        assert_eq!(find_field(FRAME, "IR").unwrap().value, "0,0000000000");
        assert_eq!(find_field(FRAME, "RD").unwrap().value, "0000-01-01T00:53:38");
    }

    #[test]
    fn reports_offset_of_key() {
        let field = find_field("x L[1,2,3]", "L").unwrap();
        assert_eq!(field.offset, 2);
    }

    #[test]
    fn key_does_not_match_inside_longer_key() {
        let frame = "Message 1 IR[0,0] R[1,2,3]";
        assert_eq!(find_field(frame, "R").unwrap().value, "1,2,3");
        assert!(find_field("Message 1 IR[0,0]", "R").is_none());
    }

    #[test]
    fn absent_or_unterminated_field_is_none() {
        assert!(find_field(FRAME, "Q").is_none());
        assert!(find_field("L[1,2,3", "L").is_none());
        assert!(find_field("L 1,2,3", "L").is_none());
        assert!(find_field(FRAME, "").is_none());
    }

    #[test]
    fn empty_value_is_found() {
        assert_eq!(find_field("E[]", "E").unwrap().value, "");
    }

    #[test]
    fn parses_exact_token_count() {
        let values: [f64; 3] = parse_values("314.953583,-11.333508,6.500096").unwrap();
        assert_eq!(values, [314.953583, -11.333508, 6.500096]);
    }

    #[test]
    fn rejects_wrong_token_count() {
        assert_eq!(
            parse_values::<3>("1,2"),
            Err(MalformedReason::TokenCount {
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            parse_values::<3>(""),
            Err(MalformedReason::TokenCount {
                expected: 3,
                found: 1
            })
        );
    }

    #[test]
    fn rejects_lenient_number_formats() {
        assert_eq!(
            parse_values::<3>("1, 2,3"),
            Err(MalformedReason::NotANumber {
                index: 1,
                token: " 2".into()
            })
        );
        assert_eq!(
            parse_values::<3>("1,2,3abc"),
            Err(MalformedReason::NotANumber {
                index: 2,
                token: "3abc".into()
            })
        );
    }

    #[test]
    fn rejects_non_finite_values() {
        assert_eq!(
            parse_values::<3>("NaN,0,0"),
            Err(MalformedReason::NonFinite {
                index: 0,
                token: "NaN".into()
            })
        );
        assert!(matches!(
            parse_values::<3>("0,1e400,0"),
            Err(MalformedReason::NonFinite { index: 1, .. })
        ));
    }
}
