//! Print the JSON Schema of the configuration file

use schemars::schema_for;
use structural_editor::config::Config;

fn main() -> anyhow::Result<()> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
