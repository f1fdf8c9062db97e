use anyhow::Result;

use autocodegen::implementations::schema::{ asset_response_schema, REQUIRED_FIELDS };
use autocodegen::SCHEMA_VERSION;

use crate::cli::ui;
use crate::cli::OutputFormat;

/// Schema command: print the contract the service is asked to follow
pub fn execute(format: OutputFormat) -> Result<()> {
    let schema = serde_json::to_string_pretty(&asset_response_schema())?;
    match format {
        OutputFormat::Json => println!("{}", schema),
        OutputFormat::Text => {
            ui::print_header("Asset Response Schema");
            ui::print_result("Version", SCHEMA_VERSION);
            ui::print_result("Required fields", &REQUIRED_FIELDS.join(", "));
            println!("\n{}", schema);
        }
    }
    Ok(())
}
