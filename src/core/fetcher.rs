use crate::core::OddsSource;
use crate::utils::error::Result;
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::Value;
use std::io::{self, Write};

/// Pretty printer that keeps the output pure ASCII: every character outside
/// the printable ASCII range is written as `\uXXXX`, astral characters as a
/// surrogate pair.
struct AsciiPrettyFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl<'a> AsciiPrettyFormatter<'a> {
    fn new() -> Self {
        Self {
            inner: PrettyFormatter::with_indent(b"  "),
        }
    }
}

impl<'a> Formatter for AsciiPrettyFormatter<'a> {
    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            // DEL 也不屬於可列印 ASCII
            if (' '..='~').contains(&ch) {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..idx])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = idx + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

/// 2-space indented, ASCII-only JSON with a trailing newline. Key order follows the input.
pub fn render_pretty(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, AsciiPrettyFormatter::new());
    value.serialize(&mut serializer)?;
    buf.push(b'\n');

    // 輸出只含 ASCII，必為合法 UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub struct OddsFetcher<S: OddsSource> {
    source: S,
}

impl<S: OddsSource> OddsFetcher<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn fetch_rendered(&self) -> Result<String> {
        let value = self.source.fetch().await?;
        render_pretty(&value)
    }

    /// Fetch, render and write the whole document in one go.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<()> {
        let rendered = self.fetch_rendered().await?;

        // 完整渲染後才寫出，失敗時不會留下部分輸出
        out.write_all(rendered.as_bytes())?;
        out.flush()?;

        tracing::debug!("Wrote {} bytes to output", rendered.len());
        Ok(())
    }
}
