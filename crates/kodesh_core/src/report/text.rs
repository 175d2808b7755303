//! Fixed-width text tables for the print surface.

/// Renders a header, a dashed separator and rows as aligned columns.
/// Widths are measured in characters.
pub fn render_table<H, C>(header: &[H], rows: &[Vec<C>]) -> String
where
    H: AsRef<str>,
    C: AsRef<str>,
{
    let mut widths = header
        .iter()
        .map(|cell| cell.as_ref().chars().count())
        .collect::<Vec<_>>();
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            let width = cell.as_ref().chars().count();
            match widths.get_mut(index) {
                Some(current) => *current = (*current).max(width),
                None => widths.push(width),
            }
        }
    }

    let mut out = String::new();
    push_line(&mut out, header, &widths);
    let separator = widths.iter().map(|width| "-".repeat(*width)).collect::<Vec<_>>();
    push_line(&mut out, &separator, &widths);
    for row in rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line<C: AsRef<str>>(out: &mut String, cells: &[C], widths: &[usize]) {
    let line = cells
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let width = widths.get(index).copied().unwrap_or(0);
            format!("{:width$}", cell.as_ref())
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
