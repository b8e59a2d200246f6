use snafu::{OptionExt, ResultExt};

use crate::report::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    #[serde(rename = "reportName")]
    pub report_name: Option<String>,
    #[serde(rename = "outputFile")]
    pub output_file: Option<String>,
    pub district: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub report: Option<String>,
    pub district: Option<String>,
    pub source: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct InputSource {
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    #[serde(rename = "worksheetName")]
    pub worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct RulesConfig {
    #[serde(rename = "sectionKeywords")]
    pub section_keywords: Option<Vec<String>>,
    #[serde(rename = "maxSectionNumber")]
    pub _max_section_number: Option<JSValue>,
    #[serde(rename = "headerLabels")]
    pub header_labels: Option<Vec<String>>,
    #[serde(rename = "summaryLabel")]
    pub summary_label: Option<String>,
    #[serde(rename = "dropZeroVotes")]
    pub drop_zero_votes: Option<bool>,
}

impl RulesConfig {
    /// `None` when no cap is configured, or when it is set to "max".
    pub fn max_section_number(&self) -> RResult<Option<u64>> {
        match &self._max_section_number {
            None => Ok(None),
            Some(JSValue::String(s)) if s == "max" => Ok(None),
            x => read_js_int(x).map(Some),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReportConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "inputSource", default)]
    pub input_source: InputSource,
    #[serde(default)]
    pub rules: RulesConfig,
}

pub fn read_config(path: &str) -> BRResult<ReportConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: content: {:?}", contents);
    let config: ReportConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_reference(path: &str) -> BRResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

fn read_js_int(x: &Option<JSValue>) -> RResult<u64> {
    match x {
        Some(JSValue::Number(n)) => n.as_u64().context(ParsingJsonNumberSnafu {}),
        Some(JSValue::String(s)) => s.trim().parse::<u64>().ok().context(ParsingJsonNumberSnafu {}),
        _ => None.context(ParsingJsonNumberSnafu {}),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config() {
        let config: ReportConfig = serde_json::from_str(
            r#"{
                "outputSettings": { "reportName": "Local elections", "district": "Mannar" },
                "inputSource": { "filePath": "results.xlsx", "worksheetName": "Sheet1" },
                "rules": {
                    "sectionKeywords": ["council", "sabha"],
                    "maxSectionNumber": "23",
                    "headerLabels": ["party", "votes", "total"],
                    "summaryLabel": "Total",
                    "dropZeroVotes": false
                }
            }"#,
        )
        .unwrap();
        assert_eq!(
            config.input_source.file_path,
            Some("results.xlsx".to_string())
        );
        assert_eq!(config.output_settings.district, Some("Mannar".to_string()));
        assert_eq!(config.rules.max_section_number().unwrap(), Some(23));
        assert_eq!(config.rules.drop_zero_votes, Some(false));
    }

    #[test]
    fn empty_config() {
        let config: ReportConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.rules.max_section_number().unwrap(), None);
    }

    #[test]
    fn section_number_cap() {
        let mut rules = RulesConfig::default();
        rules._max_section_number = Some(serde_json::json!(12));
        assert_eq!(rules.max_section_number().unwrap(), Some(12));
        rules._max_section_number = Some(serde_json::json!("max"));
        assert_eq!(rules.max_section_number().unwrap(), None);
        rules._max_section_number = Some(serde_json::json!("twelve"));
        assert!(rules.max_section_number().is_err());
        rules._max_section_number = Some(serde_json::json!(-1));
        assert!(rules.max_section_number().is_err());
    }
}
