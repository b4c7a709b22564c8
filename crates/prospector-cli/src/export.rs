//! Profile export: CSV, JSON and a plain-text table

use chrono::{DateTime, Utc};
use serde::Serialize;

use prospector_core::Profile;

use crate::summary::ProfileSummary;

/// Separator between quotes in a single CSV cell
const QUOTE_SEPARATOR: &str = " | ";

#[derive(Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    designation: &'a str,
    company: &'a str,
    quotes: String,
    confidence: String,
    search_reference: &'a str,
}

impl<'a> From<&'a Profile> for CsvRow<'a> {
    fn from(profile: &'a Profile) -> Self {
        Self {
            name: &profile.name,
            designation: profile.designation.as_deref().unwrap_or_default(),
            company: profile.company.as_deref().unwrap_or_default(),
            quotes: profile.quotes.join(QUOTE_SEPARATOR),
            confidence: format!("{:.2}", profile.confidence),
            search_reference: &profile.search_reference,
        }
    }
}

/// JSON export envelope
#[derive(Serialize)]
struct ExportDocument<'a> {
    generated_at: DateTime<Utc>,
    summary: &'a ProfileSummary,
    profiles: &'a [Profile],
}

pub fn to_csv(profiles: &[Profile]) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if profiles.is_empty() {
        writer.write_record([
            "name",
            "designation",
            "company",
            "quotes",
            "confidence",
            "search_reference",
        ])?;
    }
    for profile in profiles {
        writer.serialize(CsvRow::from(profile))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}

pub fn to_json(profiles: &[Profile], summary: &ProfileSummary) -> anyhow::Result<String> {
    let document = ExportDocument {
        generated_at: Utc::now(),
        summary,
        profiles,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

pub fn to_table(profiles: &[Profile]) -> String {
    if profiles.is_empty() {
        return "No profiles found.\n".to_string();
    }

    let mut out = String::new();
    for (i, profile) in profiles.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} ({:.0}%)\n",
            i + 1,
            profile.name,
            profile.confidence * 100.0
        ));
        if let Some(designation) = &profile.designation {
            out.push_str(&format!("   Designation: {}\n", designation));
        }
        if let Some(company) = &profile.company {
            out.push_str(&format!("   Company:     {}\n", company));
        }
        for quote in &profile.quotes {
            out.push_str(&format!("   Quote:       \"{}\"\n", quote));
        }
        out.push_str(&format!("   Search:      {}\n", profile.search_reference));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Profile> {
        vec![Profile {
            name: "Satya Nadella".to_string(),
            designation: Some("CEO".to_string()),
            company: Some("Microsoft".to_string()),
            quotes: vec![
                "AI will transform every industry.".to_string(),
                "We are all learners.".to_string(),
            ],
            confidence: 0.75,
            search_reference: "https://www.google.com/search?q=LinkedIn+Satya+Nadella+Microsoft+CEO"
                .to_string(),
        }]
    }

    #[test]
    fn test_csv_export() {
        let csv = to_csv(&sample()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("name,designation,company,quotes,confidence,search_reference")
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("Satya Nadella,CEO,Microsoft,"));
        assert!(row.contains("AI will transform every industry. | We are all learners."));
        assert!(row.contains(",0.75,"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_csv_export_empty_has_header() {
        let csv = to_csv(&[]).unwrap();
        assert_eq!(
            csv.trim_end(),
            "name,designation,company,quotes,confidence,search_reference"
        );
    }

    #[test]
    fn test_json_export() {
        let profiles = sample();
        let summary = ProfileSummary::from_profiles(&profiles);
        let json = to_json(&profiles, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value["generated_at"].is_string());
        assert_eq!(value["summary"]["total"], 1);
        assert_eq!(value["profiles"][0]["name"], "Satya Nadella");
        assert_eq!(value["profiles"][0]["quotes"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_table() {
        let table = to_table(&sample());
        assert!(table.starts_with("1. Satya Nadella (75%)"));
        assert!(table.contains("Company:     Microsoft"));
        assert_eq!(to_table(&[]), "No profiles found.\n");
    }
}
