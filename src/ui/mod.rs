//! Terminal presentation for command output

use console::{Style, measure_text_width, pad_str};

use crate::domain::{ArtifactRecord, ArtifactStatus, Location};

/// One row of `artifact list`, with liveness already probed
#[derive(Debug, Clone)]
pub struct ListRow<'a> {
    pub record: &'a ArtifactRecord,
    pub running: bool,
    pub watchers: Option<usize>,
}

impl ListRow<'_> {
    fn status_cell(&self) -> String {
        let (text, style) = if self.running {
            ("running", Style::new().green())
        } else if self.record.status == ArtifactStatus::Error {
            ("error", Style::new().red())
        } else {
            ("stopped", Style::new().dim())
        };
        style.apply_to(text).to_string()
    }

    fn watchers_cell(&self) -> String {
        self.watchers.map_or_else(|| "-".to_string(), |n| n.to_string())
    }

    fn location_cell(&self) -> String {
        match self.record.location {
            Location::Temp => self.record.location.to_string(),
            Location::Saved => Style::new().cyan().apply_to("saved").to_string(),
        }
    }
}

const HEADERS: [&str; 6] = ["ID", "COMPONENT", "STATUS", "WATCHERS", "LOCATION", "URL"];

/// Render rows as an aligned table
pub fn artifact_table(rows: &[ListRow<'_>]) -> String {
    let cells: Vec<[String; 6]> = rows
        .iter()
        .map(|row| {
            [
                Style::new().bold().yellow().apply_to(&row.record.id).to_string(),
                row.record.component_name.clone(),
                row.status_cell(),
                row.watchers_cell(),
                row.location_cell(),
                row.record.url.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(measure_text_width);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(measure_text_width(cell));
        }
    }

    let header = Style::new().bold();
    let mut out = String::new();
    push_line(
        &mut out,
        HEADERS.iter().map(|h| header.apply_to(*h).to_string()),
        &widths,
    );
    for row in &cells {
        push_line(&mut out, row.iter().cloned(), &widths);
    }
    out
}

fn push_line(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| pad_str(&cell, *width, console::Alignment::Left, None).into_owned())
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
