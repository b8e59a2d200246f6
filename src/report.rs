use log::{debug, info, warn};

use council_results::summary::{CouncilSummary, DistrictTotals};
use council_results::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::report::config_reader::*;
use crate::report::io_common::{format_preview, resolve_path, simplify_file_name};
use crate::report::io_excel::read_excel_grid;

mod config_reader;
mod io_common;
mod io_excel;

/// Number of rows shown when nothing could be parsed.
const PREVIEW_ROWS: usize = 15;

#[derive(Debug, Snafu)]
pub enum ReportError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("The workbook {path} has no worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("No worksheet named {name:?} in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Expected a positive number"))]
    ParsingJsonNumber {},
    #[snafu(display("Error writing the report to {path}"))]
    WritingReport {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("No input file: use --input or set inputSource.filePath in the configuration"))]
    MissingInput {},
    #[snafu(display("Could not parse election data"))]
    NoCouncilResults { source: ParseErrors },
    #[snafu(display("Difference detected between the report and the reference report {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

type RResult<T> = Result<T, ReportError>;

type BRResult<T> = Result<T, Box<ReportError>>;

fn validate_rules(rules_config: &RulesConfig) -> RResult<ParseRules> {
    let defaults = ParseRules::default();
    let res = ParseRules {
        section_keywords: match &rules_config.section_keywords {
            None => defaults.section_keywords,
            Some(l) if l.iter().all(|k| k.trim().is_empty()) => {
                whatever!("sectionKeywords must contain at least one keyword")
            }
            Some(l) => l
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        },
        max_section_number: match rules_config.max_section_number()? {
            Some(0) => {
                whatever!("maxSectionNumber must be at least 1")
            }
            x => x,
        },
        header_tokens: match &rules_config.header_labels {
            None => defaults.header_tokens,
            Some(l) if l.iter().all(|k| k.trim().is_empty()) => {
                whatever!("headerLabels must contain at least one label")
            }
            Some(l) => l
                .iter()
                .map(|k| k.trim().to_uppercase())
                .filter(|k| !k.is_empty())
                .collect(),
        },
        summary_label: match &rules_config.summary_label {
            None => defaults.summary_label,
            Some(s) if s.trim().is_empty() => {
                whatever!("summaryLabel must not be empty")
            }
            Some(s) => s.trim().to_string(),
        },
        drop_zero_votes: rules_config
            .drop_zero_votes
            .unwrap_or(defaults.drop_zero_votes),
    };
    Ok(res)
}

/// Command line options take precedence over the configuration file.
fn apply_args(rules: ParseRules, args: &Args) -> RResult<ParseRules> {
    let mut rules = rules;
    if args.keep_zero_votes {
        rules.drop_zero_votes = false;
    }
    match args.max_section_number {
        Some(0) => whatever!("--max-section-number must be at least 1"),
        Some(x) => rules.max_section_number = Some(x),
        None => {}
    }
    Ok(rules)
}

fn council_to_json(summary: &CouncilSummary) -> JSValue {
    let results: Vec<JSValue> = summary
        .shares
        .iter()
        .map(|s| {
            json!({
                "party": s.party,
                "votes": s.votes,
                "seats": s.seats,
                "votePercent": s.vote_percent,
                "seatPercent": s.seat_percent,
            })
        })
        .collect();
    json!({
        "council": summary.title,
        "shortName": summary.short_name,
        "totalVotes": summary.total_votes,
        "totalSeats": summary.total_seats,
        "partiesContested": summary.parties_contested,
        "mostVotes": summary.most_votes,
        "mostSeats": summary.most_seats,
        "results": results,
    })
}

fn outcome_to_json(report: &SectionReport) -> JSValue {
    let (outcome, skipped) = match &report.outcome {
        SectionOutcome::Table { skipped, .. } => ("table", skipped.total()),
        SectionOutcome::MissingHeader => ("missingHeader", 0),
        SectionOutcome::NoRecords { skipped } => ("noRecords", skipped.total()),
        SectionOutcome::Failed { .. } => ("failed", 0),
    };
    // Rows are numbered as in the spreadsheet.
    json!({
        "council": report.section.title,
        "row": report.section.start_row + 1,
        "outcome": outcome,
        "skippedRows": skipped,
    })
}

fn diagnostics_to_json(diagnostics: &ParseDiagnostics) -> JSValue {
    let sections: Vec<JSValue> = diagnostics.sections.iter().map(outcome_to_json).collect();
    let failures: Vec<JSValue> = diagnostics
        .failures()
        .iter()
        .map(|(council, reason)| json!({ "council": council, "reason": reason }))
        .collect();
    json!({
        "sectionsFound": diagnostics.section_titles(),
        "sections": sections,
        "failures": failures,
        "warnings": diagnostics.warnings,
    })
}

fn build_report_js(config: &ReportConfig, source_path: &str, parsed: &ParsedResults) -> JSValue {
    let c = OutputConfig {
        report: config.output_settings.report_name.clone(),
        district: config.output_settings.district.clone(),
        source: simplify_file_name(source_path),
    };
    let councils: Vec<JSValue> = parsed
        .results
        .iter()
        .map(|t| council_to_json(&CouncilSummary::from_table(t)))
        .collect();
    let totals = DistrictTotals::from_results(&parsed.results);
    json!({
        "config": c,
        "councils": councils,
        "totals": {
            "councils": totals.councils,
            "votes": totals.votes,
            "seats": totals.seats,
            "partyEntries": totals.party_entries,
        },
        "diagnostics": diagnostics_to_json(&parsed.diagnostics),
    })
}

fn write_report(out: &Option<String>, pretty_js: &str) -> BRResult<()> {
    match out.as_deref() {
        None | Some("stdout") => {
            println!("{}", pretty_js);
        }
        Some(path) => {
            info!("Writing report to {:?}", path);
            fs::write(path, pretty_js).context(WritingReportSnafu { path })?;
        }
    }
    Ok(())
}

fn check_reference(reference_path: &str, pretty_js: &str) -> BRResult<()> {
    let reference = read_reference(reference_path)?;
    let pretty_js_reference =
        serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {})?;
    if pretty_js_reference != pretty_js {
        warn!("Found differences with the reference report");
        print_diff(pretty_js_reference.as_str(), pretty_js, "\n");
        return Err(Box::new(ReportError::ReferenceMismatch {
            path: reference_path.to_string(),
        }));
    }
    info!("The report matches the reference {:?}", reference_path);
    Ok(())
}

pub fn run_report(args: &Args) -> BRResult<()> {
    let (config, config_dir) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            info!("config: {:?}", config);
            let dir = Path::new(config_path.as_str())
                .parent()
                .map(|p| p.to_path_buf());
            (config, dir)
        }
        None => (ReportConfig::default(), None),
    };

    // Validate the rules:
    let rules = apply_args(validate_rules(&config.rules)?, args)?;
    debug!("run_report: rules: {:?}", rules);

    let input_path = match (&args.input, &config.input_source.file_path) {
        (Some(p), _) => p.clone(),
        (None, Some(p)) => resolve_path(config_dir.as_deref(), p),
        (None, None) => return Err(Box::new(ReportError::MissingInput {})),
    };
    let worksheet_name = args
        .excel_worksheet_name
        .clone()
        .or_else(|| config.input_source.worksheet_name.clone());
    info!("Attempting to read election results {:?}", input_path);
    let grid = read_excel_grid(&input_path, &worksheet_name)?;

    let parsed = match parse_council_results(&grid, &rules) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Could not parse election data. Please check the file format.");
            let preview = grid::NormalizedGrid::new(&grid).preview(PREVIEW_ROWS);
            for line in format_preview(&preview) {
                eprintln!("{}", line);
            }
            return Err(Box::new(ReportError::NoCouncilResults { source: e }));
        }
    };
    info!(
        "Successfully parsed {} council(s) out of {} section(s)",
        parsed.results.len(),
        parsed.diagnostics.num_sections()
    );

    let report_js = build_report_js(&config, &input_path, &parsed);
    let pretty_js = serde_json::to_string_pretty(&report_js).context(ParsingJsonSnafu {})?;

    let out = args.out.clone().or_else(|| {
        config
            .output_settings
            .output_file
            .as_ref()
            .map(|p| resolve_path(config_dir.as_deref(), p))
    });
    write_report(&out, &pretty_js)?;

    if let Some(reference_path) = &args.reference {
        check_reference(reference_path, &pretty_js)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_results::builder::GridBuilder;

    fn parsed() -> ParsedResults {
        let grid = GridBuilder::new()
            .text_row(&["1 - MANNAR URBAN COUNCIL", "", ""])
            .text_row(&["Party", "Votes", "Total"])
            .text_row(&["UNP", "1500", "2"])
            .text_row(&["SLPP", "500", "0"])
            .text_row(&["TOTAL", "2000", "2"])
            .text_row(&["2 - MADHU PRADESHIYA SABHA", "", ""])
            .text_row(&["SLFP", "800", "1"])
            .build();
        parse_council_results(&grid, &ParseRules::default()).unwrap()
    }

    #[test]
    fn default_rules() {
        let rules = validate_rules(&RulesConfig::default()).unwrap();
        assert_eq!(rules, ParseRules::default());
    }

    #[test]
    fn configured_rules() {
        let rules_config = RulesConfig {
            section_keywords: Some(vec!["Council".to_string(), " ".to_string()]),
            _max_section_number: Some(json!("23")),
            header_labels: Some(vec!["party".to_string(), "votes".to_string()]),
            summary_label: Some(" Grand Total ".to_string()),
            drop_zero_votes: Some(false),
        };
        let rules = validate_rules(&rules_config).unwrap();
        assert_eq!(
            rules,
            ParseRules {
                section_keywords: vec!["council".to_string()],
                max_section_number: Some(23),
                header_tokens: vec!["PARTY".to_string(), "VOTES".to_string()],
                summary_label: "Grand Total".to_string(),
                drop_zero_votes: false,
            }
        );
    }

    #[test]
    fn invalid_rules() {
        let empty_keywords = RulesConfig {
            section_keywords: Some(vec![]),
            ..RulesConfig::default()
        };
        assert!(validate_rules(&empty_keywords).is_err());
        let zero_cap = RulesConfig {
            _max_section_number: Some(json!(0)),
            ..RulesConfig::default()
        };
        assert!(validate_rules(&zero_cap).is_err());
        let blank_label = RulesConfig {
            summary_label: Some("".to_string()),
            ..RulesConfig::default()
        };
        assert!(validate_rules(&blank_label).is_err());
    }

    #[test]
    fn args_override_rules() {
        let args = Args {
            keep_zero_votes: true,
            max_section_number: Some(5),
            ..Args::default()
        };
        let rules = apply_args(ParseRules::default(), &args).unwrap();
        assert!(!rules.drop_zero_votes);
        assert_eq!(rules.max_section_number, Some(5));

        let args = Args {
            max_section_number: Some(0),
            ..Args::default()
        };
        assert!(apply_args(ParseRules::default(), &args).is_err());
    }

    #[test]
    fn report_json() {
        let config = ReportConfig {
            output_settings: OutputSettings {
                report_name: Some("Local authorities 2025".to_string()),
                output_file: None,
                district: Some("Mannar".to_string()),
            },
            ..ReportConfig::default()
        };
        let js = build_report_js(&config, "/data/mannar.xlsx", &parsed());
        assert_eq!(
            js["config"],
            json!({ "report": "Local authorities 2025", "district": "Mannar", "source": "mannar.xlsx" })
        );
        assert_eq!(
            js["councils"],
            json!([{
                "council": "1 - MANNAR URBAN COUNCIL",
                "shortName": "MANNAR URBAN COUNCIL",
                "totalVotes": 2000,
                "totalSeats": 2,
                "partiesContested": 2,
                "mostVotes": "UNP",
                "mostSeats": "UNP",
                "results": [
                    { "party": "UNP", "votes": 1500, "seats": 2, "votePercent": 75.0, "seatPercent": 100.0 },
                    { "party": "SLPP", "votes": 500, "seats": 0, "votePercent": 25.0, "seatPercent": 0.0 }
                ]
            }])
        );
        assert_eq!(
            js["totals"],
            json!({ "councils": 1, "votes": 2000, "seats": 2, "partyEntries": 2 })
        );
        assert_eq!(
            js["diagnostics"]["sectionsFound"],
            json!(["1 - MANNAR URBAN COUNCIL", "2 - MADHU PRADESHIYA SABHA"])
        );
        assert_eq!(
            js["diagnostics"]["sections"][0],
            json!({ "council": "1 - MANNAR URBAN COUNCIL", "row": 1, "outcome": "table", "skippedRows": 1 })
        );
        assert_eq!(
            js["diagnostics"]["sections"][1]["outcome"],
            json!("missingHeader")
        );
    }

    #[test]
    fn missing_input() {
        let res = run_report(&Args::default());
        assert!(matches!(
            res.map_err(|e| *e),
            Err(ReportError::MissingInput {})
        ));
    }

    #[test]
    fn empty_parse_message_is_not_repeated() {
        use std::error::Error as _;

        let grid = GridBuilder::new().text_row(&["Party", "Votes", "Total"]).build();
        let parse_err = parse_council_results(&grid, &ParseRules::default()).unwrap_err();
        let err = ReportError::NoCouncilResults { source: parse_err };
        let cause = err.source().unwrap().to_string();
        assert_eq!(err.to_string(), "Could not parse election data");
        assert_ne!(err.to_string(), cause);
        assert!(cause.contains("no council results found"));
    }

    #[test]
    fn unreadable_workbook() {
        let args = Args {
            input: Some("/nonexistent/results.xlsx".to_string()),
            ..Args::default()
        };
        assert!(matches!(
            run_report(&args).map_err(|e| *e),
            Err(ReportError::OpeningExcel { .. })
        ));
    }
}
