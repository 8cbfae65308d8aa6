use anyhow::{bail, Context, Result};
use bill_service::{extract_bill, observability, ExtractError};
use std::{env, fs};

/// Run the extractor over a bill page saved to disk and print the record as
/// JSON. Handy for checking captures of the live site.
fn main() -> Result<()> {
    observability::init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("usage: extract_bill_file <html_file_path> [reference_number]");
    }
    let file_path = &args[1];
    let reference = args.get(2).map(String::as_str).unwrap_or("");

    let html = fs::read_to_string(file_path)
        .with_context(|| format!("failed to read bill page {file_path}"))?;

    match extract_bill(reference, &html) {
        Ok(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        Err(ExtractError::RecordNotFound) => bail!("{file_path} is a not-found notice"),
        Err(e) => Err(e.into()),
    }
}
