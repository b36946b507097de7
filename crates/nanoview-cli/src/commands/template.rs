//! Template command implementation.

use crate::cli::TemplateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use nanoview_syntax::{extract_prefixes, parse_template};
use std::fs;

/// Execute the template command.
pub async fn execute_template(
    args: TemplateArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let text = fs::read_to_string(&args.file)?;
    let prefixes = extract_prefixes(&text);
    let template = parse_template(Some(&text), &prefixes, &config.viewer.syntax);
    println!("{}", formatter.format_template(&template)?);
    Ok(())
}
