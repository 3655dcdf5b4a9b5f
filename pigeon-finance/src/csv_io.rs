//! CSV import/export of transactions (Premium).
//!
//! Columns: date,merchant,amount,category,type
//! On import `category` and `type` may be blank: a blank category goes to
//! the classifier, a blank type is taken from the amount's sign.

use pigeon_core::{Category, Error, Result, Transaction, TxType, time::parse_date};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::ledger::TransactionDraft;

#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    date: String,
    merchant: String,
    amount: f64,
    #[serde(default)]
    category: String,
    #[serde(rename = "type", default)]
    kind: String,
}

/// Write every transaction with a header row. Returns the row count.
pub fn write_transactions<W: Write>(txs: &[Transaction], writer: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    for t in txs {
        wtr.serialize(CsvRow {
            date: t.date.format("%Y-%m-%d").to_string(),
            merchant: t.merchant.clone(),
            amount: t.amount,
            category: t.category.to_string(),
            kind: t.kind.to_string(),
        })
        .map_err(csv_error)?;
    }
    wtr.flush()?;
    Ok(txs.len())
}

/// Read rows into drafts; a malformed row fails the whole read with its line number.
pub fn read_drafts<R: Read>(reader: R) -> Result<Vec<TransactionDraft>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut out = Vec::new();
    for (i, result) in rdr.deserialize::<CsvRow>().enumerate() {
        // header is line 1
        let line = i + 2;
        let row = result.map_err(csv_error)?;
        let date = parse_date(&row.date).map_err(|e| Error::format(format!("line {line}: {e}")))?;

        let category = if row.category.is_empty() {
            None
        } else {
            Some(
                row.category
                    .parse::<Category>()
                    .map_err(|e| Error::format(format!("line {line}: {e}")))?,
            )
        };

        let kind = if row.kind.is_empty() {
            if row.amount < 0.0 { TxType::Expense } else { TxType::Income }
        } else {
            row.kind
                .parse::<TxType>()
                .map_err(|e| Error::format(format!("line {line}: {e}")))?
        };

        out.push(TransactionDraft {
            date,
            merchant: row.merchant,
            amount: row.amount,
            kind,
            category,
        });
    }
    Ok(out)
}

fn csv_error(e: csv::Error) -> Error {
    Error::format(format!("csv: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_export_then_import_keeps_fields() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 18).unwrap();
        let txs = vec![
            Transaction::new("t1", date, "Coles, Richmond", 56.2, Category::Groceries, TxType::Expense),
            Transaction::new("t2", date, "Employer Pty", 1200.0, Category::Salary, TxType::Income),
        ];
        let mut buf = Vec::new();
        assert_eq!(write_transactions(&txs, &mut buf).unwrap(), 2);

        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("date,merchant,amount,category,type\n"));

        let drafts = read_drafts(buf.as_slice()).unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].merchant, "Coles, Richmond");
        assert_eq!(drafts[0].kind, TxType::Expense);
        assert_eq!(drafts[0].category, Some(Category::Groceries));
        assert_eq!(drafts[1].amount, 1200.0);
    }

    #[test]
    fn test_blank_columns_are_inferred() {
        let data = "date,merchant,amount,category,type\n\
                    2026-03-01,Myki,-4.6,,\n\
                    2026-03-02,Payroll,900,,\n";
        let drafts = read_drafts(data.as_bytes()).unwrap();
        assert_eq!(drafts[0].kind, TxType::Expense);
        assert_eq!(drafts[0].category, None);
        assert_eq!(drafts[1].kind, TxType::Income);
    }

    #[test]
    fn test_bad_date_reports_line() {
        let data = "date,merchant,amount,category,type\n\
                    2026-03-01,Myki,-4.6,,\n\
                    03/02/2026,Coles,10,,expense\n";
        let err = read_drafts(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 3"), "{err}");
    }
}
