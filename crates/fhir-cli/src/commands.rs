use std::fs;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info;

use fhir_cli::check::{CheckReport, check_files};
use fhir_cli::input::{encode, read_resource};
use fhir_codec::{WireFormat, default_registry};

use crate::cli::{CheckArgs, ConvertArgs, ReportFormatArg};
use crate::summary::{apply_table_style, print_check_report};

pub fn run_convert(args: &ConvertArgs) -> Result<()> {
    let (from, resource) = read_resource(&args.input, args.from.map(WireFormat::from))?;
    let to = WireFormat::from(args.to);
    let output = encode(&resource, to, args.pretty)
        .with_context(|| format!("encode {} as {to}", resource.resource_type()))?;
    match &args.output {
        Some(path) => {
            fs::write(path, output.as_bytes())
                .with_context(|| format!("write {}", path.display()))?;
            info!(
                input = %args.input.display(),
                output = %path.display(),
                resource_type = resource.resource_type(),
                %from,
                %to,
                "converted"
            );
        }
        None => println!("{output}"),
    }
    Ok(())
}

pub fn run_check(args: &CheckArgs) -> Result<CheckReport> {
    let report = check_files(&args.inputs);
    match args.format {
        ReportFormatArg::Table => print_check_report(&report),
        ReportFormatArg::Json => {
            let text = serde_json::to_string_pretty(&report).context("serialize check report")?;
            println!("{text}");
        }
    }
    Ok(report)
}

pub fn run_types() {
    let mut table = Table::new();
    table.set_header(vec!["Resource type"]);
    apply_table_style(&mut table);
    for resource_type in default_registry().resource_types() {
        table.add_row(vec![resource_type]);
    }
    println!("{table}");
}
