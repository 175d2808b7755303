use kodesh_core::report::text::render_table;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Left-aligned columns sized to the widest cell, measured in chars.
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    print!("{}", render_table(headers, &rows));
}

/// Local wall-clock stamp printed on reports.
pub fn generated_at() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M").to_string()
}
