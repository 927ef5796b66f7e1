//! Incremental decoding and line splitting of a response body

use crate::extractor::charset::BodyCharset;
use crate::extractor::scanner::scan_anchors;
use encoding_rs::{CoderResult, Decoder};

/// Splits text arriving in arbitrary pieces into lines
///
/// A line ends at `\n`, `\r` or `\r\n`; the terminator is not part of the line.
/// A `\r\n` pair split across two pieces counts as a single break.
#[derive(Debug, Default)]
pub struct LineBuffer {
    partial: String,
    after_cr: bool,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends text and calls `on_line` for every line it completes
    pub fn push_str(&mut self, text: &str, mut on_line: impl FnMut(&str)) {
        if text.is_empty() {
            return;
        }

        let mut rest = text;
        if self.after_cr {
            self.after_cr = false;
            rest = rest.strip_prefix('\n').unwrap_or(rest);
        }

        while let Some(pos) = rest.find(|c: char| c == '\n' || c == '\r') {
            let line = &rest[..pos];
            if self.partial.is_empty() {
                on_line(line);
            } else {
                self.partial.push_str(line);
                on_line(&self.partial);
                self.partial.clear();
            }

            let was_cr = rest.as_bytes()[pos] == b'\r';
            rest = &rest[pos + 1..];
            if was_cr {
                if rest.is_empty() {
                    self.after_cr = true;
                } else {
                    rest = rest.strip_prefix('\n').unwrap_or(rest);
                }
            }
        }

        self.partial.push_str(rest);
    }

    /// Emits the final line if the text did not end with a line break
    pub fn finish(&mut self, mut on_line: impl FnMut(&str)) {
        if !self.partial.is_empty() {
            on_line(&self.partial);
            self.partial.clear();
        }
        self.after_cr = false;
    }
}

enum BodyDecoder {
    Latin1,
    Encoding(Decoder),
}

/// Decodes body bytes and collects the anchor fragments of each completed line
pub struct LinkCollector {
    decoder: BodyDecoder,
    decoded: String,
    lines: LineBuffer,
    found: Found,
    saw_malformed: bool,
}

#[derive(Default)]
struct Found {
    links: Vec<String>,
    lines_scanned: usize,
}

impl Found {
    fn scan(&mut self, line: &str) {
        self.lines_scanned += 1;
        self.links.extend(scan_anchors(line).map(str::to_owned));
    }
}

impl LinkCollector {
    /// Creates a collector decoding with `charset`
    ///
    /// A byte-order mark at the start of the body overrides any charset other than
    /// ISO-8859-1, which maps bytes to code points one to one.
    pub fn new(charset: BodyCharset) -> Self {
        let decoder = match charset {
            BodyCharset::Latin1 => BodyDecoder::Latin1,
            BodyCharset::Encoding(encoding) => BodyDecoder::Encoding(encoding.new_decoder()),
        };

        Self {
            decoder,
            decoded: String::new(),
            lines: LineBuffer::new(),
            found: Found::default(),
            saw_malformed: false,
        }
    }

    /// Feeds the next chunk of body bytes
    pub fn feed(&mut self, bytes: &[u8]) {
        self.decode(bytes, false);
    }

    /// Fragments found on lines completed so far
    pub fn links(&self) -> &[String] {
        &self.found.links
    }

    pub fn lines_scanned(&self) -> usize {
        self.found.lines_scanned
    }

    /// Returns true if malformed byte sequences were replaced with U+FFFD
    pub fn saw_malformed(&self) -> bool {
        self.saw_malformed
    }

    /// The charset in use, after byte-order mark sniffing
    pub fn charset(&self) -> BodyCharset {
        match &self.decoder {
            BodyDecoder::Latin1 => BodyCharset::Latin1,
            BodyDecoder::Encoding(decoder) => BodyCharset::Encoding(decoder.encoding()),
        }
    }

    /// Ends the body: flushes the decoder, scans the last line and returns all fragments
    pub fn finish(mut self) -> Vec<String> {
        self.decode(&[], true);

        let found = &mut self.found;
        self.lines.finish(|line| found.scan(line));

        if self.saw_malformed {
            tracing::warn!(
                "Body contained byte sequences invalid in {}; they were replaced",
                self.charset().name()
            );
        }

        self.found.links
    }

    /// Abandons the body, keeping only fragments from lines already completed
    pub fn into_links(self) -> Vec<String> {
        self.found.links
    }

    fn decode(&mut self, bytes: &[u8], last: bool) {
        let decoder = match &mut self.decoder {
            BodyDecoder::Latin1 => {
                let text = encoding_rs::mem::decode_latin1(bytes);
                let found = &mut self.found;
                self.lines.push_str(&text, |line| found.scan(line));
                return;
            }
            BodyDecoder::Encoding(decoder) => decoder,
        };

        let mut input = bytes;
        loop {
            self.decoded.clear();
            let needed = decoder
                .max_utf8_buffer_length(input.len())
                .unwrap_or(input.len().saturating_mul(3).saturating_add(16));
            self.decoded.reserve(needed);

            let (result, read, replaced) = decoder.decode_to_string(input, &mut self.decoded, last);
            self.saw_malformed |= replaced;
            input = &input[read..];

            let found = &mut self.found;
            self.lines.push_str(&self.decoded, |line| found.scan(line));

            match result {
                CoderResult::InputEmpty => break,
                CoderResult::OutputFull => continue,
            }
        }
    }
}
