//! Minimal WordprocessingML writer.
//!
//! The agreement layout only needs paragraphs with styled runs, fixed-width
//! tables and a page break, so the document part is assembled as an XML
//! string and zipped into the OOXML package by hand. Package entries are
//! written in a fixed order with a fixed timestamp so generation is
//! byte-for-byte reproducible.

use std::fmt::Write as _;
use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::GeneratorError;

/// Twentieths of a point per point (OOXML spacing unit).
const TWIPS_PER_PT: u32 = 20;
/// Half-points per point (OOXML font size unit).
const HALF_PTS_PER_PT: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justify {
    Left,
    Center,
}

/// A styled run of text. Newlines in `text` become in-paragraph line breaks.
#[derive(Debug, Clone)]
pub struct Run {
    text: String,
    bold: bool,
    underline: bool,
    color: Option<&'static str>,
    size_pt: Option<u32>,
}

impl Run {
    pub fn text(text: impl Into<String>) -> Self {
        Run {
            text: text.into(),
            bold: false,
            underline: false,
            color: None,
            size_pt: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Hex RGB without the leading `#`, e.g. `"0000FF"`.
    pub fn color(mut self, rgb: &'static str) -> Self {
        self.color = Some(rgb);
        self
    }

    pub fn size(mut self, points: u32) -> Self {
        self.size_pt = Some(points);
        self
    }

    fn write_xml(&self, out: &mut String) {
        out.push_str("<w:r>");
        if self.bold || self.underline || self.color.is_some() || self.size_pt.is_some() {
            out.push_str("<w:rPr>");
            if self.bold {
                out.push_str("<w:b/>");
            }
            if let Some(rgb) = self.color {
                let _ = write!(out, "<w:color w:val=\"{rgb}\"/>");
            }
            if let Some(pt) = self.size_pt {
                let half = pt * HALF_PTS_PER_PT;
                let _ = write!(out, "<w:sz w:val=\"{half}\"/><w:szCs w:val=\"{half}\"/>");
            }
            if self.underline {
                out.push_str("<w:u w:val=\"single\"/>");
            }
            out.push_str("</w:rPr>");
        }
        for (i, line) in self.text.split('\n').enumerate() {
            if i > 0 {
                out.push_str("<w:br/>");
            }
            let _ = write!(
                out,
                "<w:t xml:space=\"preserve\">{}</w:t>",
                escape(line)
            );
        }
        out.push_str("</w:r>");
    }
}

#[derive(Debug, Clone)]
pub struct Paragraph {
    style: Option<&'static str>,
    justify: Justify,
    space_before_pt: Option<u32>,
    space_after_pt: Option<u32>,
    runs: Vec<Run>,
}

impl Paragraph {
    pub fn new() -> Self {
        Paragraph {
            style: None,
            justify: Justify::Left,
            space_before_pt: None,
            space_after_pt: None,
            runs: Vec::new(),
        }
    }

    /// Paragraph carrying the `Heading2` style (article headings).
    pub fn heading2() -> Self {
        let mut paragraph = Paragraph::new();
        paragraph.style = Some("Heading2");
        paragraph
    }

    pub fn center(mut self) -> Self {
        self.justify = Justify::Center;
        self
    }

    pub fn space_before(mut self, points: u32) -> Self {
        self.space_before_pt = Some(points);
        self
    }

    pub fn space_after(mut self, points: u32) -> Self {
        self.space_after_pt = Some(points);
        self
    }

    pub fn run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    /// Shorthand for a paragraph holding a single plain run.
    pub fn plain(text: impl Into<String>) -> Self {
        Paragraph::new().run(Run::text(text))
    }

    fn write_xml(&self, out: &mut String) {
        out.push_str("<w:p>");
        let has_props = self.style.is_some()
            || self.justify == Justify::Center
            || self.space_before_pt.is_some()
            || self.space_after_pt.is_some();
        if has_props {
            out.push_str("<w:pPr>");
            if let Some(style) = self.style {
                let _ = write!(out, "<w:pStyle w:val=\"{style}\"/>");
            }
            if self.space_before_pt.is_some() || self.space_after_pt.is_some() {
                out.push_str("<w:spacing");
                if let Some(pt) = self.space_before_pt {
                    let _ = write!(out, " w:before=\"{}\"", pt * TWIPS_PER_PT);
                }
                if let Some(pt) = self.space_after_pt {
                    let _ = write!(out, " w:after=\"{}\"", pt * TWIPS_PER_PT);
                }
                out.push_str("/>");
            }
            if self.justify == Justify::Center {
                out.push_str("<w:jc w:val=\"center\"/>");
            }
            out.push_str("</w:pPr>");
        }
        for run in &self.runs {
            run.write_xml(out);
        }
        out.push_str("</w:p>");
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Paragraph::new()
    }
}

#[derive(Debug, Clone)]
pub struct TableCell {
    paragraphs: Vec<Paragraph>,
}

impl TableCell {
    pub fn new(paragraph: Paragraph) -> Self {
        TableCell {
            paragraphs: vec![paragraph],
        }
    }
}

/// Fixed-layout table with single borders ("Table Grid" look).
#[derive(Debug, Clone)]
pub struct Table {
    col_widths_twips: Vec<u32>,
    rows: Vec<Vec<TableCell>>,
    borders: bool,
}

impl Table {
    /// Column widths in inches, converted to twips.
    pub fn with_column_widths_in(widths: &[f64]) -> Self {
        Table {
            col_widths_twips: widths.iter().map(|w| (w * 1440.0).round() as u32).collect(),
            rows: Vec::new(),
            borders: true,
        }
    }

    pub fn borderless(mut self) -> Self {
        self.borders = false;
        self
    }

    pub fn row(mut self, cells: Vec<TableCell>) -> Self {
        self.rows.push(cells);
        self
    }

    fn write_xml(&self, out: &mut String) {
        out.push_str("<w:tbl><w:tblPr><w:tblW w:w=\"0\" w:type=\"auto\"/>");
        if self.borders {
            out.push_str("<w:tblBorders>");
            for side in ["top", "left", "bottom", "right", "insideH", "insideV"] {
                let _ = write!(
                    out,
                    "<w:{side} w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"auto\"/>"
                );
            }
            out.push_str("</w:tblBorders>");
        }
        out.push_str("<w:tblLayout w:type=\"fixed\"/></w:tblPr><w:tblGrid>");
        for width in &self.col_widths_twips {
            let _ = write!(out, "<w:gridCol w:w=\"{width}\"/>");
        }
        out.push_str("</w:tblGrid>");
        for row in &self.rows {
            out.push_str("<w:tr>");
            for (cell, width) in row.iter().zip(&self.col_widths_twips) {
                let _ = write!(
                    out,
                    "<w:tc><w:tcPr><w:tcW w:w=\"{width}\" w:type=\"dxa\"/></w:tcPr>"
                );
                for paragraph in &cell.paragraphs {
                    paragraph.write_xml(out);
                }
                out.push_str("</w:tc>");
            }
            out.push_str("</w:tr>");
        }
        out.push_str("</w:tbl>");
    }
}

enum Block {
    Paragraph(Paragraph),
    Table(Table),
    PageBreak,
}

/// Accumulates document blocks and packages them into DOCX bytes.
pub struct DocxBuilder {
    blocks: Vec<Block>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        DocxBuilder { blocks: Vec::new() }
    }

    pub fn paragraph(&mut self, paragraph: Paragraph) -> &mut Self {
        self.blocks.push(Block::Paragraph(paragraph));
        self
    }

    pub fn table(&mut self, table: Table) -> &mut Self {
        self.blocks.push(Block::Table(table));
        self
    }

    pub fn page_break(&mut self) -> &mut Self {
        self.blocks.push(Block::PageBreak);
        self
    }

    /// Serialize the document part and zip the OOXML package.
    pub fn finish(self) -> Result<Vec<u8>, GeneratorError> {
        let mut body = String::with_capacity(16 * 1024);
        for block in &self.blocks {
            match block {
                Block::Paragraph(paragraph) => paragraph.write_xml(&mut body),
                Block::Table(table) => table.write_xml(&mut body),
                Block::PageBreak => {
                    body.push_str("<w:p><w:r><w:br w:type=\"page\"/></w:r></w:p>");
                }
            }
        }

        let document = format!(
            "{}<w:document xmlns:w=\"{}\"><w:body>{}{}</w:body></w:document>",
            XML_DECLARATION, WORDPROCESSINGML_NS, body, SECTION_PROPERTIES
        );
        pack(&document)
    }
}

impl Default for DocxBuilder {
    fn default() -> Self {
        DocxBuilder::new()
    }
}

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>";

const WORDPROCESSINGML_NS: &str =
    "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// US Letter with one-inch margins.
const SECTION_PROPERTIES: &str = "<w:sectPr><w:pgSz w:w=\"12240\" w:h=\"15840\"/>\
<w:pgMar w:top=\"1440\" w:right=\"1440\" w:bottom=\"1440\" w:left=\"1440\" \
w:header=\"720\" w:footer=\"720\" w:gutter=\"0\"/></w:sectPr>";

const CONTENT_TYPES: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
<Default Extension=\"xml\" ContentType=\"application/xml\"/>\
<Override PartName=\"/word/document.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>\
<Override PartName=\"/word/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml\"/>\
</Types>";

const PACKAGE_RELS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"word/document.xml\"/>\
</Relationships>";

const DOCUMENT_RELS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles\" Target=\"styles.xml\"/>\
</Relationships>";

/// Normal style: Calibri 11pt black, 5pt space after, left aligned.
/// Heading2 carries the article-heading outline level.
const STYLES: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<w:styles xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
<w:docDefaults><w:rPrDefault><w:rPr>\
<w:rFonts w:ascii=\"Calibri\" w:hAnsi=\"Calibri\" w:cs=\"Calibri\"/>\
<w:color w:val=\"000000\"/><w:sz w:val=\"22\"/><w:szCs w:val=\"22\"/>\
</w:rPr></w:rPrDefault>\
<w:pPrDefault><w:pPr><w:spacing w:after=\"100\"/><w:jc w:val=\"left\"/></w:pPr></w:pPrDefault>\
</w:docDefaults>\
<w:style w:type=\"paragraph\" w:default=\"1\" w:styleId=\"Normal\"><w:name w:val=\"Normal\"/></w:style>\
<w:style w:type=\"paragraph\" w:styleId=\"Heading2\"><w:name w:val=\"heading 2\"/>\
<w:basedOn w:val=\"Normal\"/>\
<w:pPr><w:keepNext/><w:spacing w:before=\"200\" w:after=\"100\"/><w:outlineLvl w:val=\"1\"/></w:pPr>\
<w:rPr><w:b/></w:rPr></w:style>\
</w:styles>";

/// Zip the package parts. Entry order and timestamps are fixed so that two
/// runs over the same record produce identical archives.
fn pack(document_xml: &str) -> Result<Vec<u8>, GeneratorError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    let parts: [(&str, &str); 5] = [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", PACKAGE_RELS),
        ("word/document.xml", document_xml),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS),
        ("word/styles.xml", STYLES),
    ];
    for (name, content) in parts {
        writer.start_file(name, options)?;
        writer.write_all(content.as_bytes())?;
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_escapes_markup() {
        let mut out = String::new();
        Run::text("Fees < Costs & Taxes").write_xml(&mut out);
        assert!(out.contains("Fees &lt; Costs &amp; Taxes"));
    }

    #[test]
    fn test_run_newline_becomes_break() {
        let mut out = String::new();
        Run::text("first\nsecond").write_xml(&mut out);
        assert!(out.contains("<w:br/>"));
        assert!(out.contains(">first</w:t>"));
        assert!(out.contains(">second</w:t>"));
    }

    #[test]
    fn test_finished_package_is_zip() {
        let mut builder = DocxBuilder::new();
        builder.paragraph(Paragraph::plain("hello"));
        let bytes = builder.finish().unwrap();
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }
}
