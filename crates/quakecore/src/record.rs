use crate::error::LineError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// One parsed catalog row.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeRecord {
    pub date: DateTime<Utc>,
    pub latitude: f32,
    pub longitude: f32,
    pub depth_km: f32,
    pub magnitude: f32,
    /// Magnitude rescaled to [0, 1] over the whole catalog. Filled in by the
    /// database once every line has been read.
    pub normalized_magnitude: f32,
}

impl EarthquakeRecord {
    /// Date as milliseconds since the Unix epoch, the simulated clock's unit.
    pub fn time(&self) -> i64 {
        self.date.timestamp_millis()
    }
}

/// Result of looking at one line of the catalog.
#[derive(Debug, PartialEq)]
pub enum ParsedLine {
    Record(EarthquakeRecord),
    /// Blank lines and `#` comments.
    Ignored,
}

/// Parses one line of the whitespace-delimited ANSS readable catalog:
///
/// ```text
/// 1906/04/18 13:12:21.00  37.7500 -122.5500   8.00  7.90   Mw ...
/// ```
///
/// Columns after the magnitude are ignored.
pub fn parse_line(line: &str) -> Result<ParsedLine, LineError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(ParsedLine::Ignored);
    }

    let mut fields = trimmed.split_whitespace();
    let date = parse_date(next_field(&mut fields, "date")?)?;
    let date = parse_time(date, next_field(&mut fields, "time")?)?;

    let latitude = parse_number(next_field(&mut fields, "latitude")?, "latitude")?;
    let longitude = parse_number(next_field(&mut fields, "longitude")?, "longitude")?;
    let depth_km = parse_number(next_field(&mut fields, "depth")?, "depth")?;
    let magnitude = parse_number(next_field(&mut fields, "magnitude")?, "magnitude")?;

    if !(-90.0..=90.0).contains(&latitude) {
        return Err(LineError::OutOfRange {
            field: "latitude",
            value: latitude,
        });
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(LineError::OutOfRange {
            field: "longitude",
            value: longitude,
        });
    }

    Ok(ParsedLine::Record(EarthquakeRecord {
        date,
        latitude,
        longitude,
        depth_km,
        magnitude,
        normalized_magnitude: 0.0,
    }))
}

fn next_field<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<&'a str, LineError> {
    fields.next().ok_or(LineError::MissingField(name))
}

fn parse_date(date: &str) -> Result<NaiveDate, LineError> {
    NaiveDate::parse_from_str(date, "%Y/%m/%d").map_err(|_| LineError::InvalidDate(date.to_string()))
}

fn parse_time(day: NaiveDate, time: &str) -> Result<DateTime<Utc>, LineError> {
    let clock = NaiveTime::parse_from_str(time, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .map_err(|_| LineError::InvalidDate(format!("{day} {time}")))?;
    Ok(NaiveDateTime::new(day, clock).and_utc())
}

fn parse_number(value: &str, field: &'static str) -> Result<f32, LineError> {
    match value.parse::<f32>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(LineError::InvalidNumber {
            field,
            value: value.to_string(),
        }),
    }
}
