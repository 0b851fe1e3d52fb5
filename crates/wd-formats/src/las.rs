//! LAS 1.2/2.0 well-log reader.
//!
//! The file is split into `~` sections first. The well, curve, parameter and
//! other sections are then parsed independently: a malformed section becomes
//! an empty record list plus a [`SectionIssue`] and the remaining sections
//! load as usual. Only problems with the data itself (`~A`, or curve
//! mnemonics needed to label its columns) fail the parse.

use crate::error::{FormatError, FormatResult};
use crate::model::LasParser;
use std::collections::HashMap;
use tracing::{debug, warn};
use wd_core::{CellValue, HeaderRecord, LasHeaders, LasSection, SectionIssue, Table, WellLog};

/// In-house LAS text reader.
#[derive(Debug, Default, Clone, Copy)]
pub struct Las2Reader;

impl Las2Reader {
    pub fn new() -> Self {
        Self
    }
}

/// One `~` block: its kind, the line number of its title and its body lines.
struct RawSection<'a> {
    kind: LasSection,
    title_line: usize,
    lines: Vec<(usize, &'a str)>,
}

impl LasParser for Las2Reader {
    fn parse(&self, bytes: &[u8]) -> FormatResult<WellLog> {
        let text = String::from_utf8_lossy(bytes);
        let sections = split_sections(&text);

        let mut issues = Vec::new();
        let mut read = |kind: LasSection| -> Vec<HeaderRecord> {
            let Some(section) = sections.iter().find(|s| s.kind == kind) else {
                return Vec::new();
            };
            match parse_records(section) {
                Ok(records) => records,
                Err(err) => {
                    warn!(section = kind.label(), error = %err, "LAS section unreadable, using an empty table");
                    issues.push(SectionIssue {
                        section: kind,
                        message: err.to_string(),
                    });
                    Vec::new()
                }
            }
        };

        // Version is read for diagnostics only.
        read(LasSection::Version);
        let headers = LasHeaders {
            well: read(LasSection::Well),
            curves: read(LasSection::Curve),
            parameters: read(LasSection::Parameter),
            other: read(LasSection::Other),
        };

        let curve_section = sections
            .iter()
            .find(|s| s.kind == LasSection::Curve)
            .ok_or(FormatError::MissingSection { section: "C" })?;
        let mnemonics = if headers.curves.is_empty() {
            lenient_mnemonics(curve_section)
        } else {
            headers.curves.iter().map(|r| r.name.clone()).collect()
        };
        if mnemonics.is_empty() {
            return Err(FormatError::Malformed {
                section: LasSection::Curve.label(),
                line: curve_section.title_line,
                message: "no curve mnemonics".into(),
            });
        }

        let data = sections
            .iter()
            .find(|s| s.kind == LasSection::Data)
            .ok_or(FormatError::MissingSection { section: "A" })?;
        let null = headers
            .well
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case("NULL"))
            .and_then(|r| r.value.parse::<f64>().ok());
        let curves = read_data(data, dedupe_mnemonics(mnemonics), null)?;

        let well_name = headers
            .well_value("WELL")
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        debug!(
            rows = curves.len(),
            curves = curves.width(),
            issues = issues.len(),
            "Parsed LAS file"
        );

        Ok(WellLog {
            well_name,
            curves,
            headers,
            issues,
        })
    }
}

fn section_kind(title: &str) -> Option<LasSection> {
    match title.chars().nth(1)?.to_ascii_uppercase() {
        'V' => Some(LasSection::Version),
        'W' => Some(LasSection::Well),
        'C' => Some(LasSection::Curve),
        'P' => Some(LasSection::Parameter),
        'O' => Some(LasSection::Other),
        'A' => Some(LasSection::Data),
        _ => None,
    }
}

fn split_sections(text: &str) -> Vec<RawSection<'_>> {
    let mut sections: Vec<RawSection<'_>> = Vec::new();
    let mut current: Option<usize> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('~') {
            current = match section_kind(line) {
                Some(kind) => {
                    sections.push(RawSection {
                        kind,
                        title_line: line_no,
                        lines: Vec::new(),
                    });
                    Some(sections.len() - 1)
                }
                None => {
                    debug!(line = line_no, title = line, "Skipping unknown LAS section");
                    None
                }
            };
            continue;
        }
        if let Some(i) = current {
            sections[i].lines.push((line_no, line));
        }
    }
    sections
}

fn parse_records(section: &RawSection<'_>) -> FormatResult<Vec<HeaderRecord>> {
    section
        .lines
        .iter()
        .map(|&(line_no, line)| parse_header_line(section.kind, line_no, line))
        .collect()
}

/// Parses `MNEM.UNIT VALUE : DESCRIPTION`.
fn parse_header_line(kind: LasSection, line_no: usize, line: &str) -> FormatResult<HeaderRecord> {
    let malformed = |message: &str| FormatError::Malformed {
        section: kind.label(),
        line: line_no,
        message: message.to_string(),
    };

    let (mnemonic, rest) = line
        .split_once('.')
        .ok_or_else(|| malformed("missing '.' delimiter"))?;
    let name = mnemonic.trim();
    if name.is_empty() {
        return Err(malformed("empty mnemonic"));
    }

    let unit_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let unit_end = rest[..unit_end].find(':').unwrap_or(unit_end);
    let (unit, rest) = rest.split_at(unit_end);

    let (value, description) = match rest.rfind(':') {
        Some(i) => (&rest[..i], &rest[i + 1..]),
        None => (rest, ""),
    };

    Ok(HeaderRecord {
        name: name.to_string(),
        unit: unit.trim().to_string(),
        value: value.trim().to_string(),
        description: description.trim().to_string(),
    })
}

/// Column names from a curve section that failed strict parsing.
fn lenient_mnemonics(section: &RawSection<'_>) -> Vec<String> {
    section
        .lines
        .iter()
        .filter_map(|&(_, line)| {
            let end = line
                .find(|c: char| c == '.' || c.is_whitespace())
                .unwrap_or(line.len());
            let name = line[..end].trim();
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect()
}

/// Every occurrence of a repeated mnemonic gets a `:n` suffix, counting from 1.
fn dedupe_mnemonics(names: Vec<String>) -> Vec<String> {
    let mut totals: HashMap<String, usize> = HashMap::new();
    for name in &names {
        *totals.entry(name.clone()).or_insert(0) += 1;
    }
    let mut seen: HashMap<String, usize> = HashMap::new();
    names
        .into_iter()
        .map(|name| {
            if totals[&name] > 1 {
                let n = seen.entry(name.clone()).or_insert(0);
                *n += 1;
                format!("{}:{}", name, n)
            } else {
                name
            }
        })
        .collect()
}

fn read_data(section: &RawSection<'_>, columns: Vec<String>, null: Option<f64>) -> FormatResult<Table> {
    let width = columns.len();
    let mut table = Table::new(columns)?;
    let mut row = Vec::with_capacity(width);
    let mut last_line = section.title_line;

    for &(line_no, line) in &section.lines {
        last_line = line_no;
        for token in line.split_whitespace() {
            let value: f64 = token.parse().map_err(|_| FormatError::Malformed {
                section: LasSection::Data.label(),
                line: line_no,
                message: format!("non-numeric value '{}'", token),
            })?;
            let cell = match null {
                Some(n) if (value - n).abs() < 1e-9 => CellValue::Empty,
                _ => CellValue::Float(value),
            };
            row.push(cell);
            if row.len() == width {
                table.push_row(std::mem::replace(&mut row, Vec::with_capacity(width)))?;
            }
        }
    }

    if !row.is_empty() {
        return Err(FormatError::Malformed {
            section: LasSection::Data.label(),
            line: last_line,
            message: format!("trailing partial row of {} values, expected {}", row.len(), width),
        });
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
~VERSION INFORMATION
 VERS.                 2.0 :   CWLS LOG ASCII STANDARD - VERSION 2.0
 WRAP.                  NO :   ONE LINE PER DEPTH STEP
~WELL INFORMATION
#MNEM.UNIT       DATA                       DESCRIPTION
 STRT.M          1670.0000                : START DEPTH
 STOP.M          1669.7500                : STOP DEPTH
 STEP.M          -0.1250                  : STEP
 NULL.           -999.25                  : NULL VALUE
 COMP.           ANY OIL COMPANY INC.     : COMPANY
 WELL.           AAAAA_2                  : WELL
 DATE.           13-DEC-86                : LOG DATE
~CURVE INFORMATION
 DEPT.M                 : 1  DEPTH
 DT  .US/M              : 2  SONIC TRANSIT TIME
 RHOB.K/M3              : 3  BULK DENSITY
 NPHI.V/V               : 4  NEUTRON POROSITY
~PARAMETER INFORMATION
 BHT .DEGC      35.5000 : BOTTOM HOLE TEMPERATURE
 BS  .MM       200.0000 : BIT SIZE
~OTHER
     Note: The logging tools became stuck at 625 meters causing the data
~A  DEPTH     DT       RHOB     NPHI
1670.000   123.450 2550.000    0.450
1669.875   123.450 2550.000  -999.25
1669.750   123.450 2550.000    0.450
";

    fn parse(text: &str) -> FormatResult<WellLog> {
        Las2Reader::new().parse(text.as_bytes())
    }

    #[test]
    fn sample_file_loads_with_other_section_isolated() {
        let log = parse(SAMPLE).unwrap();

        assert_eq!(log.well_name.as_deref(), Some("AAAAA_2"));
        assert_eq!(log.curve_names(), ["DEPT", "DT", "RHOB", "NPHI"]);
        assert_eq!(log.depth_column(), Some("DEPT"));
        assert_eq!(log.curves.len(), 3);
        assert_eq!(log.curves.cell(1, "NPHI"), Some(&CellValue::Empty));
        assert_eq!(log.curves.cell(2, "DEPT"), Some(&CellValue::Float(1669.75)));

        assert_eq!(log.headers.well.len(), 7);
        assert_eq!(log.headers.curves.len(), 4);
        assert_eq!(log.headers.parameters.len(), 2);
        assert!(log.headers.other.is_empty());
        assert_eq!(log.issues.len(), 1);
        assert_eq!(log.issues[0].section, LasSection::Other);
    }

    #[test]
    fn header_line_fields() {
        let rec = parse_header_line(LasSection::Well, 1, "COMP.   ANY OIL: CO. : COMPANY").unwrap();
        assert_eq!(rec.name, "COMP");
        assert_eq!(rec.unit, "");
        assert_eq!(rec.value, "ANY OIL: CO.");
        assert_eq!(rec.description, "COMPANY");

        let rec = parse_header_line(LasSection::Curve, 1, "DT  .US/M : 2  SONIC").unwrap();
        assert_eq!(rec.name, "DT");
        assert_eq!(rec.unit, "US/M");
        assert_eq!(rec.value, "");

        let rec = parse_header_line(LasSection::Curve, 1, "GR.GAPI: gamma").unwrap();
        assert_eq!(rec.unit, "GAPI");
        assert_eq!(rec.description, "gamma");
    }

    #[test]
    fn malformed_well_section_keeps_curves() {
        let text = SAMPLE.replace(" DATE.           13-DEC-86", " DATE            13-DEC-86");
        let log = parse(&text).unwrap();

        assert!(log.headers.well.is_empty());
        assert_eq!(log.well_name, None);
        assert_eq!(log.headers.curves.len(), 4);
        assert_eq!(log.curves.len(), 3);
        let sections: Vec<_> = log.issues.iter().map(|i| i.section).collect();
        assert_eq!(sections, [LasSection::Well, LasSection::Other]);
    }

    #[test]
    fn malformed_curve_section_still_names_columns() {
        let text = SAMPLE.replace(" RHOB.K/M3", " RHOB K/M3");
        let log = parse(&text).unwrap();

        assert!(log.headers.curves.is_empty());
        assert_eq!(log.curve_names(), ["DEPT", "DT", "RHOB", "NPHI"]);
        assert!(log.issues.iter().any(|i| i.section == LasSection::Curve));
    }

    #[test]
    fn wrapped_data_is_chunked_by_curve_count() {
        let text = "\
~W
 WELL. W-9 : WELL
~C
 DEPT.M :
 GR.GAPI :
 RT.OHMM :
~A
100.0 45.0
2.5
100.5
46.0 3.0
";
        let log = parse(text).unwrap();
        assert_eq!(log.curves.len(), 2);
        assert_eq!(log.curves.cell(1, "RT"), Some(&CellValue::Float(3.0)));
    }

    #[test]
    fn duplicate_mnemonics_are_suffixed() {
        let names = dedupe_mnemonics(vec!["DEPT".into(), "GR".into(), "GR".into()]);
        assert_eq!(names, ["DEPT", "GR:1", "GR:2"]);
    }

    #[test]
    fn missing_data_section_is_fatal() {
        let text = SAMPLE.split("~A").next().unwrap();
        let err = parse(text).unwrap_err();
        assert_eq!(err, FormatError::MissingSection { section: "A" });
    }

    #[test]
    fn partial_row_is_fatal() {
        let text = format!("{}1669.625 1.0\n", SAMPLE);
        let err = parse(&text).unwrap_err();
        assert!(matches!(err, FormatError::Malformed { section: "data", .. }));
    }

    #[test]
    fn non_numeric_token_is_fatal() {
        let text = SAMPLE.replace("123.450 2550.000    0.450\n1669.875", "abc 2550.000    0.450\n1669.875");
        let err = parse(&text).unwrap_err();
        assert!(err.to_string().contains("non-numeric"));
    }
}
