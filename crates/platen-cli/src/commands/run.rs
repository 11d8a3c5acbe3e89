//! `platen run`: the batch on a worker thread, prompt and progress here.

use std::io;
use std::sync::mpsc;
use std::thread;

use anyhow::{anyhow, Context, Result};
use camino::Utf8Path;

use platen_batch::{
    run_batch, BatchOptions, ChannelMapping, CompositorOptions, FileMapping, JsonlRows,
    ManifestTemplate, MappingProvider, Progress,
};
use platen_fontdb::ResolverConfig;

use crate::cli::RunArgs;
use crate::prompt::ask_mapping;

pub fn run(args: &RunArgs, quiet: bool) -> Result<()> {
    let template = ManifestTemplate::new(args.template.clone());
    let rows = JsonlRows::new(args.data.clone());
    let data_dir = args
        .assets
        .clone()
        .or_else(|| args.data.parent().map(Utf8Path::to_path_buf))
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| ".".into());

    let mut resolver = ResolverConfig::from_env();
    if let Some(root) = &args.font_root {
        resolver = resolver.with_local_root(root.as_std_path());
    }
    let options = BatchOptions {
        output_dir: args.output.clone(),
        compositor: CompositorOptions {
            strategy: args.strategy.into(),
            debug_dir: args.debug.then(|| args.output.join("debug")),
            name_alignment_heuristic: !args.no_name_heuristic,
            data_dir,
        },
        resolver,
    };

    let (mapping, requests): (Box<dyn MappingProvider + Send>, _) = match &args.mapping {
        Some(path) => (Box::new(FileMapping::new(path.clone())), None),
        None => {
            let (provider, requests) = ChannelMapping::channel();
            (Box::new(provider), Some(requests))
        },
    };

    let (progress_tx, progress_rx) = mpsc::channel();
    let worker = thread::spawn(move || {
        run_batch(&template, &rows, &*mapping, options, Some(&progress_tx))
    });

    // The worker drops its end after asking, or after failing before it could.
    if let Some(requests) = requests {
        if let Ok(request) = requests.recv() {
            let stdin = io::stdin();
            let answer = ask_mapping(
                &request.regions,
                &request.columns,
                &mut stdin.lock(),
                &mut io::stdout(),
            )
            .context("Failed to read the mapping")?;
            match answer {
                Some(mapping) => {
                    request.respond(mapping);
                },
                None => request.cancel(),
            }
        }
    }

    for event in progress_rx {
        if quiet {
            continue;
        }
        match event {
            Progress::Started { rows } => println!("Rendering {rows} row(s)"),
            Progress::Row { index, total } => println!("  {}/{total}", index + 1),
            Progress::Finished { .. } => {},
        }
    }

    let summary = worker
        .join()
        .map_err(|_| anyhow!("Batch worker panicked"))??;

    println!(
        "Done: {} of {} image(s) written to {} ({} region(s) kept their artwork)",
        summary.written, summary.rows, summary.output_dir, summary.substitutions
    );
    Ok(())
}
