//! Text formatting of numbers and timestamps.

use chrono::{DateTime, NaiveDateTime};

/// Fractional digits used for coordinates.
pub const COORDINATE_PRECISION: usize = 6;

/// Formats a number with the shortest text that parses back to it.
///
/// Integral values drop the fraction (`12.0` becomes `12`). Non-finite values
/// become empty text.
pub fn format_number(value: f64) -> String {
    if value.is_finite() {
        format!("{}", value)
    } else {
        String::new()
    }
}

/// Formats a data cell.
///
/// Finite values use [`format_number`]. Non-finite values use the
/// `xs:double` tokens `NaN`, `INF` and `-INF` so that no cell is empty.
pub fn format_data_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "INF".to_string()
    } else if value == f64::NEG_INFINITY {
        "-INF".to_string()
    } else {
        format_number(value)
    }
}

/// Formats a coordinate with [`COORDINATE_PRECISION`] fractional digits.
pub fn format_coordinate(value: f64) -> String {
    format!("{:.*}", COORDINATE_PRECISION, value)
}

/// Formats a list of coordinates separated by single spaces.
pub fn format_coordinates(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format_coordinate(*v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Groups values into lines of at most `per_line` values.
pub fn wrap_values(values: &[String], per_line: usize) -> Vec<String> {
    values
        .chunks(per_line.max(1))
        .map(|chunk| chunk.join(" "))
        .collect()
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S",
];

/// Normalizes a log timestamp to `YYYY-MM-DDTHH:MM:SS`.
///
/// RFC 3339 input keeps its offset. Returns `None` if no known layout matches.
pub fn normalize_timestamp(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.format("%Y-%m-%dT%H:%M:%S%.f%:z").to_string());
    }
    NAIVE_FORMATS.iter().find_map(|layout| {
        NaiveDateTime::parse_from_str(raw, layout)
            .ok()
            .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(120.5), "120.5");
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(-3.25), "-3.25");
        assert_eq!(format_number(f64::NAN), "");
        assert_eq!(format_number(f64::INFINITY), "");
    }

    #[test]
    fn test_format_data_value() {
        assert_eq!(format_data_value(2.5), "2.5");
        assert_eq!(format_data_value(f64::NAN), "NaN");
        assert_eq!(format_data_value(f64::INFINITY), "INF");
        assert_eq!(format_data_value(f64::NEG_INFINITY), "-INF");
    }

    #[test]
    fn test_format_number_round_trips() {
        for v in [0.1 + 0.2, 1.0 / 3.0, 1234567.891, 5e-7] {
            let text = format_number(v);
            assert_eq!(text.parse::<f64>().unwrap(), v);
        }
    }

    #[test]
    fn test_format_coordinate() {
        assert_eq!(format_coordinate(45.123456), "45.123456");
        assert_eq!(format_coordinate(-93.654321), "-93.654321");
        assert_eq!(format_coordinate(300.0), "300.000000");
        assert_eq!(format_coordinates(&[1.0, 2.5]), "1.000000 2.500000");
    }

    #[test]
    fn test_wrap_values() {
        let values: Vec<String> = (0..7).map(|v| v.to_string()).collect();
        assert_eq!(wrap_values(&values, 5), vec!["0 1 2 3 4", "5 6"]);
        assert_eq!(wrap_values(&values, 12), vec!["0 1 2 3 4 5 6"]);
        assert!(wrap_values(&[], 5).is_empty());
    }

    #[test]
    fn test_normalize_timestamp() {
        assert_eq!(
            normalize_timestamp("2024-03-05 14:22:10").as_deref(),
            Some("2024-03-05T14:22:10")
        );
        assert_eq!(
            normalize_timestamp("05/03/2024 14:22:10").as_deref(),
            Some("2024-03-05T14:22:10")
        );
        assert_eq!(
            normalize_timestamp("2024-01-15T10:30:00Z").as_deref(),
            Some("2024-01-15T10:30:00+00:00")
        );
        assert_eq!(normalize_timestamp("yesterday"), None);
    }
}
