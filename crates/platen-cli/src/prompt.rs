// this_file: crates/platen-cli/src/prompt.rs

//! Interactive mapping: ask, per region, which column feeds it.

use std::io::{self, BufRead, Write};

use platen_batch::{RegionKind, RegionMapping, RegionSummary};

/// Asks for a column per region.
///
/// Each answer may be a column number, a column name, or blank to leave
/// the region unmapped. Returns `None` when input ends before every
/// region has been asked about.
pub fn ask_mapping(
    regions: &[RegionSummary],
    columns: &[String],
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<Option<RegionMapping>> {
    writeln!(out, "Columns:")?;
    for (i, column) in columns.iter().enumerate() {
        writeln!(out, "  {}) {column}", i + 1)?;
    }
    writeln!(
        out,
        "For each region enter a column number or name; leave blank to keep the artwork."
    )?;

    let mut mapping = RegionMapping::default();
    for region in regions {
        loop {
            write!(out, "{} [{}] {}: ", region.name, region.kind, region.bounds)?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                return Ok(None);
            }
            let answer = line.trim();
            if answer.is_empty() {
                break;
            }

            match pick_column(answer, columns) {
                Some(column) => {
                    let target = match region.kind {
                        RegionKind::Text => &mut mapping.text,
                        RegionKind::Image => &mut mapping.image,
                    };
                    target.insert(region.name.clone(), column.to_string());
                    break;
                },
                None => writeln!(out, "  no column '{answer}'")?,
            }
        }
    }

    Ok(Some(mapping))
}

fn pick_column<'a>(answer: &str, columns: &'a [String]) -> Option<&'a str> {
    if let Ok(n) = answer.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| columns.get(i)).map(String::as_str);
    }
    columns.iter().find(|c| c.as_str() == answer).map(String::as_str)
}
