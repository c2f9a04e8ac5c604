use focusboard_charts::{CatalogEntry, InputSet};

pub fn run() -> anyhow::Result<()> {
    let (paths, config) = super::load_config()?;
    let pipeline = super::pipeline(&paths, &config);

    println!("Charts");
    println!("======");
    for entry in pipeline.catalog().entries() {
        println!("{}", format_entry(&entry, config.canonical_length_minutes));
    }
    Ok(())
}

fn format_entry(entry: &CatalogEntry, canonical_minutes: u32) -> String {
    let input = match entry.input {
        InputSet::Full => "all sessions".to_string(),
        InputSet::ExcludingCanonical => format!("excludes {}-minute sessions", canonical_minutes),
    };
    format!("  {:<30} {} ({})", entry.name.as_str(), entry.title, input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use focusboard_charts::{Catalog, DerivationName};

    #[test]
    fn test_format_entry_mentions_exclusion() {
        let entry = CatalogEntry {
            name: DerivationName::TimeVsElapsed,
            title: "Session Time vs Elapsed Time".to_string(),
            input: InputSet::ExcludingCanonical,
        };
        let line = format_entry(&entry, 60);
        assert!(line.contains("time_vs_elapsed"));
        assert!(line.contains("excludes 60-minute sessions"));
    }

    #[test]
    fn test_every_chart_listed() {
        let lines: Vec<_> = Catalog::new()
            .entries()
            .iter()
            .map(|e| format_entry(e, 60))
            .collect();
        assert_eq!(lines.len(), DerivationName::ALL.len());
    }
}
