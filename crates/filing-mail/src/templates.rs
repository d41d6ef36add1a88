//! HTML digest rendering.

use filing_core::{FilingKey, FilingRecord};

const HEADER_CELL: &str =
    "border: 1px solid black; padding: 12px; background-color: #f2f2f2;";
const DATA_CELL: &str = "border: 1px solid black; padding: 10px;";

/// HTML email body summarizing the filings for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    /// Filing-type key the digest covers
    pub key: FilingKey,
    /// Complete HTML document
    pub html: String,
}

/// Render `records` as an HTML table, one row per record in input order.
///
/// Returns `None` for an empty slice so that no email goes out. Scraped
/// values are interpolated as-is, without HTML escaping.
pub fn build_digest(records: &[FilingRecord], key: &FilingKey) -> Option<Digest> {
    if records.is_empty() {
        return None;
    }

    let mut html = format!(
        r#"
<html>
    <body style="font-family: Arial, sans-serif; font-size: 18px;">
        <p>Dear User,</p>
        <p>Please find below the latest SEC filings for <strong>Item {key}</strong>:</p>
        <table style="border-collapse: collapse; width: 100%; font-size: 18px;">
            <tr>
                <th style="{HEADER_CELL}">Form & File</th>
                <th style="{HEADER_CELL}">Company Name</th>
                <th style="{HEADER_CELL}">Filing Date</th>
            </tr>
"#
    );

    for record in records {
        html.push_str(&format!(
            r#"            <tr>
                <td style="{DATA_CELL}">{form_file}</td>
                <td style="{DATA_CELL}">
                    <a href="{url}" target="_blank" style="text-decoration: underline; color: blue;">
                        {entity}
                    </a>
                </td>
                <td style="{DATA_CELL}">{date}</td>
            </tr>
"#,
            form_file = record.form_file,
            url = record.filing_url,
            entity = record.entity_name,
            date = record.filing_date,
        ));
    }

    html.push_str(
        r#"        </table>
        <p style="margin-top: 25px; font-size: 18px;">Thank you.</p>
    </body>
</html>
"#,
    );

    Some(Digest {
        key: key.clone(),
        html,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn record(n: usize) -> FilingRecord {
        FilingRecord {
            form_file: format!("8-K (Current report) 000{n}"),
            entity_name: format!("Company {n} Inc"),
            filing_url: format!("https://www.sec.gov/Archives/edgar/data/{n}/doc.htm"),
            filing_date: format!("2024-03-{:02}", n + 1),
        }
    }

    fn key() -> FilingKey {
        FilingKey::new("5.02").expect("valid key")
    }

    /// (form/file, entity, url, date) for every data row of the digest table.
    fn parse_rows(html: &str) -> Vec<(String, String, String, String)> {
        let document = Html::parse_document(html);
        let row_sel = Selector::parse("table tr").unwrap();
        let cell_sel = Selector::parse("td").unwrap();
        let link_sel = Selector::parse("a").unwrap();

        document
            .select(&row_sel)
            .filter_map(|row| {
                let cells: Vec<_> = row.select(&cell_sel).collect();
                if cells.is_empty() {
                    return None;
                }
                let link = cells[1].select(&link_sel).next().unwrap();
                let text = |el: scraper::ElementRef| el.text().collect::<String>().trim().to_string();
                Some((
                    text(cells[0]),
                    text(link),
                    link.value().attr("href").unwrap().to_string(),
                    text(cells[2]),
                ))
            })
            .collect()
    }

    #[test]
    fn test_empty_records_no_digest() {
        assert!(build_digest(&[], &key()).is_none());
    }

    #[test]
    fn test_digest_names_key() {
        let digest = build_digest(&[record(1)], &key()).expect("digest");
        assert_eq!(digest.key, key());
        assert!(digest.html.contains("<strong>Item 5.02</strong>"));
        assert!(digest.html.contains(">Company Name</th>"));
    }

    #[test]
    fn test_digest_rows_round_trip_in_order() {
        let records: Vec<_> = (1..=4).map(record).collect();
        let digest = build_digest(&records, &key()).expect("digest");

        let rows = parse_rows(&digest.html);
        assert_eq!(rows.len(), records.len());

        for (row, record) in rows.iter().zip(&records) {
            assert_eq!(row.0, record.form_file);
            assert_eq!(row.1, record.entity_name);
            assert_eq!(row.2, record.filing_url);
            assert_eq!(row.3, record.filing_date);
        }
    }

    #[test]
    fn test_values_are_not_escaped() {
        let mut r = record(1);
        r.entity_name = "Smith & <b>Sons</b>".to_string();
        let digest = build_digest(&[r], &key()).expect("digest");
        assert!(digest.html.contains("Smith & <b>Sons</b>"));
    }
}
