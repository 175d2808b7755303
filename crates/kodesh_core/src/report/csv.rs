//! CSV encoding for exports.
//!
//! Every field is wrapped in double quotes, embedded quotes are doubled and
//! every record (header included) ends with CRLF. UTF-8, no BOM.

pub const CSV_RECORD_TERMINATOR: &str = "\r\n";

/// Encodes a header and rows as CSV text.
pub fn to_csv<H, C>(header: &[H], rows: &[Vec<C>]) -> String
where
    H: AsRef<str>,
    C: AsRef<str>,
{
    let mut out = String::new();
    push_record(&mut out, header);
    for row in rows {
        push_record(&mut out, row);
    }
    out
}

fn push_record<F: AsRef<str>>(out: &mut String, fields: &[F]) {
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        push_quoted(out, field.as_ref());
    }
    out.push_str(CSV_RECORD_TERMINATOR);
}

fn push_quoted(out: &mut String, field: &str) {
    out.push('"');
    out.push_str(&field.replace('"', "\"\""));
    out.push('"');
}
