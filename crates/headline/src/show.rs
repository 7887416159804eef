use crate::options::{PrefixOptions, SourceOptions};
use crate::prelude::{println, *};
use colored::Colorize;
use headline_core::record::transform_with;
use headline_core::{InputRecord, OutputRecord};
use serde_json::Value;

#[derive(Debug, clap::Args)]
pub struct ShowOptions {
    /// Sample id, or 0-based position when no id matches
    #[arg(value_name = "SAMPLE")]
    pub selector: String,

    #[command(flatten)]
    pub source: SourceOptions,

    #[command(flatten)]
    pub prefixes: PrefixOptions,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ShowOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("{}: {}", "Source".green(), options.source.describe());
        println!();
    }

    let extractor = options.prefixes.extractor()?;
    let records = crate::source::load_records(&options.source, None).await?;

    let record = find_record(&records, &options.selector)
        .ok_or_else(|| Error::RecordNotFound(options.selector.clone()))?;

    let output = transform_with(record, &extractor)?;

    if options.json {
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        println!("{json}");
    } else {
        println!("{}", format_output_text(&output));
    }

    Ok(())
}

/// Find a record by id, falling back to its position in the dataset.
pub fn find_record<'a>(records: &'a [InputRecord], selector: &str) -> Option<&'a InputRecord> {
    records
        .iter()
        .find(|record| id_matches(&record.id, selector))
        .or_else(|| {
            selector
                .parse::<usize>()
                .ok()
                .and_then(|idx| records.get(idx))
        })
}

fn id_matches(id: &Value, selector: &str) -> bool {
    match id {
        Value::String(s) => s == selector,
        Value::Number(n) => n.to_string() == selector,
        _ => false,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn format_output_text(output: &OutputRecord) -> String {
    let mut result = String::new();

    result.push_str(&format!(
        "\n{} {}\n",
        "Sample".bold().cyan(),
        display_value(&output.id).bright_yellow()
    ));
    result.push_str(&format!(
        "{}: {}\n",
        "Class".green(),
        display_value(&output.class_id).bright_white()
    ));

    result.push_str(&format!(
        "\n{} ({})\n",
        "Example QA".bold().cyan(),
        output.example_qa.len()
    ));
    for (idx, example) in output.example_qa.iter().enumerate() {
        result.push_str(&format!("\n{}\n", format!("[{}]", idx + 1).yellow().bold()));
        for line in example.lines() {
            result.push_str(&format!("    {}\n", line));
        }
    }

    result.push_str(&format!("\n{}\n", "Question".bold().cyan()));
    result.push_str(&format!("    {}\n", output.question.bright_white()));

    result.push_str(&format!("\n{}\n", "Options".bold().cyan()));
    for (idx, option) in output.options.iter().enumerate() {
        if idx as i64 == output.labels {
            result.push_str(&format!("  {} {}\n", "*".bright_green(), option.bright_green()));
        } else {
            result.push_str(&format!("    {}\n", option));
        }
    }

    result
}
