use std::ops::Range;

const HEADER: &str = "Message";
const FOOTER_MARK: &str = "@@";
const FOOTER_FIELD: &str = "RD[";
const FOOTER_END: &str = "]IL";

/// One frame substring and where it starts in the blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub text: &'a str,
    pub offset: usize,
}

/// Single-pass scanner over a blob yielding frames in order.
///
/// A frame starts at `Message<ws><digits>` and ends right after the first
/// `@@<ws>RD[...]IL` footer that follows it. Line breaks are ordinary
/// frame content.
#[derive(Debug)]
pub struct Frames<'a> {
    blob: &'a str,
    pos: usize,
}

pub fn frames(blob: &str) -> Frames<'_> {
    Frames { blob, pos: 0 }
}

impl<'a> Iterator for Frames<'a> {
    type Item = Frame<'a>;

    fn next(&mut self) -> Option<Frame<'a>> {
        while self.pos < self.blob.len() {
            let start = self.pos + self.blob[self.pos..].find(HEADER)?;

            let Some(id) = header_id(self.blob, start) else {
                self.pos = start + 1;
                continue;
            };

            match footer_end(self.blob, id.end) {
                Some(end) => {
                    self.pos = end;
                    return Some(Frame {
                        text: &self.blob[start..end],
                        offset: start,
                    });
                }
                None => {
                    // Any later header would need a footer past this point too.
                    self.pos = self.blob.len();
                }
            }
        }
        None
    }
}

/// Byte range of the message id digits when a `Message<ws><digits>` header
/// starts exactly at `at`.
pub(crate) fn header_id(text: &str, at: usize) -> Option<Range<usize>> {
    let rest = text.get(at..)?.strip_prefix(HEADER)?;
    let ws = rest.chars().next().filter(|c| c.is_whitespace())?;
    let digits_start = at + HEADER.len() + ws.len_utf8();
    let digits = text[digits_start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    (digits > 0).then(|| digits_start..digits_start + digits)
}

/// Byte range of the message id digits of the first header anywhere in
/// `text`.
pub(crate) fn find_header_id(text: &str) -> Option<Range<usize>> {
    text.match_indices(HEADER)
        .find_map(|(at, _)| header_id(text, at))
}

/// End offset (exclusive) of the first complete footer at or after `from`.
fn footer_end(blob: &str, from: usize) -> Option<usize> {
    let mut pos = from;
    while let Some(rel) = blob[pos..].find(FOOTER_MARK) {
        let mark = pos + rel;
        let after_mark = &blob[mark + FOOTER_MARK.len()..];
        let opens = after_mark
            .chars()
            .next()
            .filter(|c| c.is_whitespace())
            .and_then(|ws| after_mark[ws.len_utf8()..].strip_prefix(FOOTER_FIELD).map(|_| ws));

        if let Some(ws) = opens {
            let body = mark + FOOTER_MARK.len() + ws.len_utf8() + FOOTER_FIELD.len();
            // The first footer decides; without a closing marker after it
            // no later footer can close either.
            let close = blob[body..].find(FOOTER_END)?;
            return Some(body + close + FOOTER_END.len());
        }
        pos = mark + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: &str = "Message 1 L[1,2,3] @@ RD[x]IL";

    #[test]
    fn single_frame_is_whole_match() {
        let found: Vec<_> = frames(ONE).collect();
        assert_eq!(found, vec![Frame { text: ONE, offset: 0 }]);
    }

    #[test]
    fn splits_back_to_back_frames() {
        let blob = "Message 1 a @@ RD[x]ILMessage 2 b @@ RD[y]IL";
        let found: Vec<_> = frames(blob).map(|f| f.text).collect();
        assert_eq!(found, vec!["Message 1 a @@ RD[x]IL", "Message 2 b @@ RD[y]IL"]);
    }

    #[test]
    fn frames_may_span_lines() {
        let blob = "noise\nMessage 7 L[1,2,3]\n  R[4,5,6] @@ RD[\n]IL\ntrailing";
        let found: Vec<_> = frames(blob).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].offset, 6);
        assert!(found[0].text.starts_with("Message 7"));
        assert!(found[0].text.ends_with("]IL"));
    }

    #[test]
    fn skips_headers_without_id() {
        let blob = "Message x Message 3 body @@ RD[]IL";
        let found: Vec<_> = frames(blob).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "Message 3 body @@ RD[]IL");
        assert_eq!(found[0].offset, 10);
    }

    #[test]
    fn footer_requires_whitespace_and_rd_field() {
        assert_eq!(frames("Message 1 @@RD[x]IL").count(), 0);
        assert_eq!(frames("Message 1 @@ XD[x]IL").count(), 0);
        let found: Vec<_> = frames("Message 1 @@@ RD[x]IL").collect();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn frame_without_footer_swallows_into_next() {
        let blob = "Message 1 a Message 2 b @@ RD[]IL";
        let found: Vec<_> = frames(blob).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, blob);
    }

    #[test]
    fn no_frames_in_plain_text() {
        assert_eq!(frames("").count(), 0);
        assert_eq!(frames("no frames here").count(), 0);
        assert_eq!(frames("Message 1 but no footer").count(), 0);
    }

    #[test]
    fn header_id_reads_digits() {
        let text = "Message 23435V[1.3]";
        let range = header_id(text, 0).unwrap();
        assert_eq!(&text[range], "23435");
        assert!(header_id("Message  1", 0).is_none());
        assert!(header_id("Message", 0).is_none());
        assert_eq!(find_header_id("xx Message 9 y").map(|r| r.start), Some(11));
    }
}
