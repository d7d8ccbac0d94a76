//! The `create` subcommand: construct an object from the command line
//! and print its canonical JSON.

use anyhow::{bail, Context};
use clap::Args;
use cyntel_objects::{sdo, Properties, PropertyValue, Record, ValueKind};

/// Arguments for `cyntel create`.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Object kind to construct (e.g. indicator, malware, relationship).
    pub kind: String,

    /// Property assignments, repeatable: --set name=value. List-valued
    /// properties take comma-separated values; booleans take true/false.
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub set: Vec<String>,
}

/// Construct the object and print its canonical form.
pub fn run(args: &CreateArgs) -> anyhow::Result<()> {
    let props = parse_props(&args.kind, &args.set)?;
    let record = Record::construct(&args.kind, props)?;
    tracing::debug!(kind = %args.kind, id = ?record.id(), "constructed record");
    println!("{record}");
    Ok(())
}

/// Convert `name=value` pairs into typed properties, using the kind's
/// schema to decide each value's shape. Names the schema does not
/// declare pass through as strings so construction reports them with
/// its own unexpected-keyword error.
fn parse_props(kind: &str, assignments: &[String]) -> anyhow::Result<Properties> {
    let schema = sdo::standard_registry().get(kind)?;
    let mut props = Properties::new();
    for assignment in assignments {
        let Some((name, value)) = assignment.split_once('=') else {
            bail!("property assignment '{assignment}' is not of the form name=value");
        };
        let typed = match schema.property(name).map(|d| d.value_kind()) {
            Some(ValueKind::Boolean) => PropertyValue::from(
                value
                    .parse::<bool>()
                    .with_context(|| format!("property '{name}' expects true or false"))?,
            ),
            Some(ValueKind::StringList) => PropertyValue::from(
                value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect::<Vec<String>>(),
            ),
            _ => PropertyValue::from(value),
        };
        props = props.set(name.to_string(), typed);
    }
    Ok(props)
}
