//! DOCX text extraction: reads `word/document.xml` out of the OOXML zip container
//! and emits one line per `<w:p>` paragraph.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

/// Paragraph texts joined with `\n`. Errors are returned as plain strings; the
/// caller wraps them with the filename.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;
    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| format!("{DOCUMENT_PART}: {e}"))?
        .read_to_string(&mut xml)
        .map_err(|e| format!("{DOCUMENT_PART}: {e}"))?;

    paragraphs_from_xml(&xml).map(|paragraphs| paragraphs.join("\n"))
}

/// Walks the WordprocessingML body. Only text inside `<w:t>` runs counts;
/// `<w:tab/>` and `<w:br/>` map to a tab and a newline.
fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>, String> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_paragraph = false;
    let mut in_text_run = false;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => {
                    in_paragraph = true;
                    current.clear();
                }
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:p" => paragraphs.push(String::new()),
                b"w:tab" if in_paragraph => current.push('\t'),
                b"w:br" | b"w:cr" if in_paragraph => current.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text_run => {
                current.push_str(&t.unescape().map_err(|e| e.to_string())?);
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => {
                    in_paragraph = false;
                    paragraphs.push(std::mem::take(&mut current));
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}


#[cfg(test)]
mod tests {
    use super::test_support::build_docx;
    use super::*;

    #[test]
    fn test_paragraphs_become_lines() {
        let docx = build_docx(&["Master&apos;s degree required", "5+ years experience with Docker"]);
        assert_eq!(
            extract_docx_text(&docx).unwrap(),
            "Master's degree required\n5+ years experience with Docker"
        );
    }

    #[test]
    fn test_runs_tabs_and_breaks_within_a_paragraph() {
        let xml = r#"<w:document xmlns:w="x"><w:body>
            <w:p><w:r><w:t>Py</w:t></w:r><w:r><w:t>thon</w:t><w:tab/><w:t>SQL</w:t><w:br/><w:t>React</w:t></w:r></w:p>
            <w:p/>
            <w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Skills</w:t></w:r></w:p>
        </w:body></w:document>"#;
        assert_eq!(
            paragraphs_from_xml(xml).unwrap(),
            vec!["Python\tSQL\nReact", "", "Skills"]
        );
    }

    #[test]
    fn test_whitespace_between_elements_is_ignored() {
        let xml = "<w:body>\n  <w:p>\n    <w:r><w:t>Java</w:t></w:r>\n  </w:p>\n</w:body>";
        assert_eq!(paragraphs_from_xml(xml).unwrap(), vec!["Java"]);
    }

    #[test]
    fn test_not_a_zip_is_an_error() {
        assert!(extract_docx_text(b"PK\x03\x04 minimal").is_err());
    }

    #[test]
    fn test_zip_without_document_part_is_an_error() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("hello.txt", zip::write::SimpleFileOptions::default())
            .unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = extract_docx_text(&bytes).unwrap_err();
        assert!(err.contains("word/document.xml"), "got {err}");
    }
}
