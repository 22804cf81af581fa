//! Tabular (comma-separated) dataset parser.
//!
//! Best-effort: rows that cannot be read or have too few fields are skipped.

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::models::{Food, TRACE_SENTINEL};

/// Lines at the top of the file that are always skipped.
pub const HEADER_LINES: usize = 3;

/// Minimum number of fields for a data row to be accepted.
pub const MIN_FIELDS: usize = 9;

const NAME_FIELD: usize = 0;
const PROTEIN_FIELD: usize = 1;
const FAT_FIELD: usize = 2;
const CARBS_FIELD: usize = 3;
const CALORIES_FIELD: usize = 4;
const CHOLESTEROL_FIELD: usize = 7;
const CATEGORY_FIELD: usize = 8;

/// Parse raw tabular text into foods, in file order.
///
/// The first [`HEADER_LINES`] lines are skipped regardless of content.
/// `\r\n`, `\n` and bare `\r` all end a line.
pub fn parse_foods(text: &str) -> Vec<Food> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut parser = LineParser::new();
    let mut foods = Vec::new();
    let mut skipped = 0usize;

    for (line_no, line) in normalized.split('\n').enumerate().skip(HEADER_LINES) {
        match parser.parse(line) {
            Some(food) if food.has_nutrients() => foods.push(food),
            Some(food) => {
                debug!(line = line_no + 1, name = %food.name, "dropping row without nutrients");
                skipped += 1;
            }
            None => {
                if !line.trim().is_empty() {
                    debug!(line = line_no + 1, "skipping malformed row");
                    skipped += 1;
                }
            }
        }
    }

    debug!(parsed = foods.len(), skipped, "tabular parse finished");
    foods
}

/// Parse a single data line. Returns `None` if it has fewer than
/// [`MIN_FIELDS`] fields or cannot be tokenized.
pub fn parse_line(line: &str) -> Option<Food> {
    LineParser::new().parse(line)
}

/// Splits lines into fields with one reader configuration and one record
/// buffer shared across the whole file.
struct LineParser {
    builder: ReaderBuilder,
    record: StringRecord,
}

impl LineParser {
    /// Lines are short; the default 8 KiB reader buffer is not needed.
    const BUFFER_CAPACITY: usize = 256;

    fn new() -> Self {
        let mut builder = ReaderBuilder::new();
        builder
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::None)
            .buffer_capacity(Self::BUFFER_CAPACITY);

        Self {
            builder,
            record: StringRecord::new(),
        }
    }

    fn parse(&mut self, line: &str) -> Option<Food> {
        if !self.split_fields(line) || self.record.len() < MIN_FIELDS {
            return None;
        }

        let field = |i: usize| self.record.get(i).unwrap_or("");

        Some(Food {
            name: field(NAME_FIELD).trim().to_string(),
            protein: parse_amount(field(PROTEIN_FIELD)),
            fat: parse_amount(field(FAT_FIELD)),
            carbs: parse_amount(field(CARBS_FIELD)),
            calories: parse_calories(field(CALORIES_FIELD)),
            cholesterol: parse_amount(field(CHOLESTEROL_FIELD)),
            category: field(CATEGORY_FIELD).trim().to_string(),
        })
    }

    /// Read one line into the shared record, honoring double-quote escaping.
    /// Returns false if the line is empty or cannot be tokenized.
    fn split_fields(&mut self, line: &str) -> bool {
        let mut reader = self.builder.from_reader(line.as_bytes());
        match reader.read_record(&mut self.record) {
            Ok(read) => read,
            Err(e) => {
                debug!("unreadable row: {}", e);
                false
            }
        }
    }
}

/// Trim a numeric token, dropping stray quotes a number never contains.
fn clean_token(raw: &str) -> &str {
    raw.trim().trim_matches('"').trim()
}

/// Parse a decimal nutrient amount.
///
/// `Tr` (trace) and `N` (not available) map to [`TRACE_SENTINEL`];
/// anything else that is not a non-negative number maps to 0.
pub fn parse_amount(raw: &str) -> f64 {
    let token = clean_token(raw);
    match token {
        "Tr" | "N" => TRACE_SENTINEL,
        _ => token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or(0.0),
    }
}

/// Parse a calorie count. Decimals are truncated; other junk maps to 0.
pub fn parse_calories(raw: &str) -> u32 {
    let token = clean_token(raw);
    match token {
        "Tr" | "N" => 0,
        _ => token.parse::<u32>().ok().unwrap_or_else(|| {
            token
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v.trunc().min(u32::MAX as f64) as u32)
                .unwrap_or(0)
        }),
    }
}
