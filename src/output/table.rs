//! Terminal rendering of result rows

/// Prints each row as space-separated values
pub fn default_output(results: &[Vec<String>]) {
    for row in results {
        println!("{}", row.join(" "));
    }
}

/// Prints results as a bordered, left-aligned table
///
/// The first row is the header.
pub fn pretty_output(results: &[Vec<String>]) {
    let Some(header) = results.first() else {
        return;
    };

    let widths = column_widths(results);
    let border = border_line(&widths);

    println!("{border}");
    println!("{}", format_row(header, &widths));
    println!("{border}");
    for row in &results[1..] {
        println!("{}", format_row(row, &widths));
    }
    println!("{border}");
}

fn column_widths(results: &[Vec<String>]) -> Vec<usize> {
    let columns = results.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in results {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }
    widths
}

fn border_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line
}

fn format_row(row: &[String], widths: &[usize]) -> String {
    let mut out = String::from("|");
    for (i, width) in widths.iter().enumerate() {
        let cell = row.get(i).map(String::as_str).unwrap_or("");
        let pad = width - cell.chars().count();
        out.push(' ');
        out.push_str(cell);
        out.push_str(&" ".repeat(pad + 1));
        out.push('|');
    }
    out
}
