//! Raw tables and header-row detection.
//!
//! Every reader produces the same shape: an ordered header row plus rows
//! of string cells. Exported logbooks frequently carry a title row or two
//! above the real header, so the header row is located by scoring the
//! first few rows rather than trusting row zero.

/// One source table, format-agnostic.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

#[derive(Debug, Default, Clone, Copy)]
struct RowStats {
    total: usize,
    non_empty: usize,
    numeric: usize,
    alpha: usize,
}

impl RowStats {
    fn non_empty_ratio(self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.non_empty as f64 / self.total as f64
        }
    }

    fn numeric_ratio(self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.numeric as f64 / self.total as f64
        }
    }

    fn alpha_ratio(self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.alpha as f64 / self.total as f64
        }
    }

    fn empty_ratio(self) -> f64 {
        1.0 - self.non_empty_ratio()
    }
}

fn row_stats(row: &[String]) -> RowStats {
    let mut stats = RowStats {
        total: row.len(),
        ..RowStats::default()
    };
    for cell in row {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            continue;
        }
        stats.non_empty += 1;
        if trimmed.parse::<f64>().is_ok() {
            stats.numeric += 1;
        }
        if trimmed.chars().any(|ch| ch.is_alphabetic()) {
            stats.alpha += 1;
        }
    }
    stats
}

fn is_data_like(stats: RowStats) -> bool {
    stats.numeric_ratio() >= 0.2 || stats.empty_ratio() >= 0.2
}

fn is_header_like(stats: RowStats) -> bool {
    stats.non_empty_ratio() >= 0.8 && stats.alpha_ratio() >= 0.5 && stats.numeric_ratio() <= 0.1
}

/// Pick the last header-like row before the data starts, probing the
/// first few rows. Falls back to row zero.
pub(crate) fn detect_header_row(rows: &[Vec<String>]) -> usize {
    if rows.is_empty() {
        return 0;
    }
    let probe = rows.len().min(5);
    let stats: Vec<RowStats> = rows.iter().take(probe).map(|row| row_stats(row)).collect();
    let data_index = stats.iter().position(|stat| is_data_like(*stat));
    let search_end = data_index.unwrap_or(1).max(1);
    let mut candidate = 0usize;
    for (idx, stat) in stats.iter().enumerate().take(search_end) {
        if is_header_like(*stat) {
            candidate = idx;
        }
    }
    candidate
}

/// Assemble a table out of raw rows: locate the header, normalize cells,
/// pad short rows to the header width, and drop all-empty rows.
pub(crate) fn assemble(raw_rows: Vec<Vec<String>>) -> RawTable {
    if raw_rows.is_empty() {
        return RawTable::default();
    }
    let header_index = detect_header_row(&raw_rows);
    let headers: Vec<String> = raw_rows[header_index]
        .iter()
        .map(|value| normalize_header(value))
        .collect();
    let mut rows = Vec::new();
    for record in raw_rows.iter().skip(header_index + 1) {
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            let value = record.get(idx).map(String::as_str).unwrap_or("");
            row.push(normalize_cell(value));
        }
        rows.push(row);
    }
    RawTable { headers, rows }
}
