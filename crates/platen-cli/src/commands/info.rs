//! `platen info`: what a template and a data source contain.

use anyhow::Result;

use platen_batch::{describe_region, JsonlRows, ManifestTemplate, RowSource, TemplateSource};

use crate::cli::InfoArgs;

pub fn run(args: &InfoArgs) -> Result<()> {
    let template = ManifestTemplate::new(args.template.clone()).load()?;
    println!("Template {}: {}x{}", args.template, template.width, template.height);
    println!("Regions ({}):", template.regions.len());
    for region in &template.regions {
        println!("  {}", describe_region(region));
    }

    if let Some(data) = &args.data {
        let table = JsonlRows::new(data.clone()).load()?;
        println!();
        println!("Data {data}: {} row(s)", table.rows.len());
        println!("Columns ({}):", table.columns.len());
        for column in &table.columns {
            println!("  {column}");
        }
    }

    Ok(())
}
