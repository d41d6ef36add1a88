use crate::error::Result;
use filing_browser::PageElement;
use filing_core::FilingRecord;
use url::Url;

/// Present once the results have rendered.
pub const RESULTS_TABLE: &str = "table.table tbody";
/// One filing per row.
pub const RESULT_ROWS: &str = "table.table tbody tr";
/// Form/file link; its text is the label, its `href` the filing.
pub const FORM_FILE_LINK: &str = "td.filetype a";
pub const FILED_DATE: &str = "td.filed";
pub const ENTITY_NAME: &str = "td.entity-name";

/// Fields read from one results row before validation.
///
/// `None` means the cell (or the link's `href`) was not there at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub form_file: Option<String>,
    pub href: Option<String>,
    pub filing_date: Option<String>,
    pub entity_name: Option<String>,
}

pub struct RowParser {
    base_url: Url,
}

impl RowParser {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
        })
    }

    /// Read the four cells of a row. Missing cells become `None`.
    pub async fn read_row(&self, row: &dyn PageElement) -> RawRow {
        let mut raw = RawRow::default();

        if let Ok(link) = row.find(FORM_FILE_LINK).await {
            raw.form_file = link.text().await.ok();
            raw.href = link.attribute("href").await.ok().flatten();
        }
        raw.filing_date = read_text(row, FILED_DATE).await;
        raw.entity_name = read_text(row, ENTITY_NAME).await;

        raw
    }

    /// Build a record only if every field is present and non-blank.
    pub fn validate_row(&self, raw: RawRow) -> Option<FilingRecord> {
        let form_file = non_blank(raw.form_file)?;
        let filing_url = self.resolve_link(&non_blank(raw.href)?)?;
        let filing_date = non_blank(raw.filing_date)?;
        let entity_name = non_blank(raw.entity_name)?;

        Some(FilingRecord {
            form_file,
            entity_name,
            filing_url,
            filing_date,
        })
    }

    /// Make a filing link absolute. Absolute links are kept as they are.
    pub fn resolve_link(&self, href: &str) -> Option<String> {
        self.base_url.join(href).ok().map(String::from)
    }
}

async fn read_text(row: &dyn PageElement, selector: &str) -> Option<String> {
    let cell = row.find(selector).await.ok()?;
    cell.text().await.ok()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> RowParser {
        RowParser::new("https://www.sec.gov").expect("valid base")
    }

    fn complete_row() -> RawRow {
        RawRow {
            form_file: Some(" 8-K (Current report) ".to_string()),
            href: Some("/Archives/edgar/data/320193/000032019324000010.htm".to_string()),
            filing_date: Some("2024-03-14\n".to_string()),
            entity_name: Some("Apple Inc.  (AAPL)".to_string()),
        }
    }

    #[test]
    fn test_validate_complete_row() {
        let record = parser().validate_row(complete_row()).expect("valid row");

        assert_eq!(record.form_file, "8-K (Current report)");
        assert_eq!(record.entity_name, "Apple Inc.  (AAPL)");
        assert_eq!(record.filing_date, "2024-03-14");
        assert_eq!(
            record.filing_url,
            "https://www.sec.gov/Archives/edgar/data/320193/000032019324000010.htm"
        );
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let p = parser();

        let mut row = complete_row();
        row.form_file = None;
        assert!(p.validate_row(row).is_none());

        let mut row = complete_row();
        row.href = None;
        assert!(p.validate_row(row).is_none());

        let mut row = complete_row();
        row.filing_date = None;
        assert!(p.validate_row(row).is_none());

        let mut row = complete_row();
        row.entity_name = None;
        assert!(p.validate_row(row).is_none());
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let mut row = complete_row();
        row.entity_name = Some("   ".to_string());
        assert!(parser().validate_row(row).is_none());
    }

    #[test]
    fn test_resolve_absolute_link_kept() {
        assert_eq!(
            parser()
                .resolve_link("https://efts.sec.gov/LATEST/doc.htm")
                .as_deref(),
            Some("https://efts.sec.gov/LATEST/doc.htm")
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(RowParser::new("sec.gov").is_err());
    }
}
