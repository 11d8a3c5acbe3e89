//! `platen fonts`: font files in the directories the resolver searches.

use anyhow::Result;

use platen_fontdb::{discover_font_files, ResolverConfig};

use crate::cli::FontsArgs;

pub fn run(args: &FontsArgs) -> Result<()> {
    let mut config = ResolverConfig::from_env();
    if let Some(root) = &args.font_root {
        config = config.with_local_root(root.as_std_path());
    }

    let listings = discover_font_files(&config.search_dirs());
    if listings.is_empty() {
        println!("No font directories found; text will use the builtin bitmap font.");
        return Ok(());
    }

    for listing in &listings {
        println!("{} ({} font file(s))", listing.dir.display(), listing.files.len());
        let (shown, rest) = listing.preview(args.limit);
        for file in shown {
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());
            println!("  {name}");
        }
        if rest > 0 {
            println!("  ... and {rest} more");
        }
    }

    Ok(())
}
