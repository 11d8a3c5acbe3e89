// this_file: crates/platen-batch/src/run.rs

//! The batch driver: load inputs, agree on a mapping, render every row.

use std::fs;
use std::sync::mpsc::Sender;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};

use platen_export::write_png;
use platen_fontdb::{discover_font_files, FontResolver, ResolverConfig};

use crate::compositor::{Compositor, CompositorOptions};
use crate::error::BatchError;
use crate::mapping::MappingProvider;
use crate::rows::RowSource;
use crate::template::{describe_region, TemplateSource};
use crate::types::{BatchSummary, Progress};

/// A row is reported when its index is a multiple of this, and at the end
const PROGRESS_EVERY: usize = 5;

/// Where a batch writes and how it renders.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory receiving `<n>.png`
    pub output_dir: Utf8PathBuf,
    /// Composition settings
    pub compositor: CompositorOptions,
    /// Font search settings
    pub resolver: ResolverConfig,
}

impl BatchOptions {
    /// Defaults writing into `output_dir`
    pub fn new(output_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            compositor: CompositorOptions::default(),
            resolver: ResolverConfig::from_env(),
        }
    }
}

/// Runs a whole batch.
///
/// Everything fatal happens before the first row is rendered. After that
/// the run always completes; region failures are logged and counted in
/// [`BatchSummary::substitutions`], and a row whose PNG cannot be written
/// is logged and left out of [`BatchSummary::written`].
pub fn run_batch(
    template: &dyn TemplateSource,
    rows: &dyn RowSource,
    mapping: &dyn MappingProvider,
    options: BatchOptions,
    progress: Option<&Sender<Progress>>,
) -> Result<BatchSummary, BatchError> {
    let template = template.load()?;
    template.validate()?;
    if template.regions.is_empty() {
        return Err(BatchError::NoRegions);
    }
    log::info!(
        "Template {}x{} with {} region(s)",
        template.width,
        template.height,
        template.regions.len()
    );
    for region in &template.regions {
        log::debug!("  {}", describe_region(region));
    }

    let table = rows.load()?;
    log::info!(
        "Data has {} row(s) and {} column(s)",
        table.rows.len(),
        table.columns.len()
    );

    let summaries = template.summaries();
    let mut mapping = mapping.mapping(&summaries, &table.columns)?;
    mapping.retain_known(&summaries, &table.columns);
    if mapping.is_empty() {
        return Err(BatchError::NoMappings);
    }
    log::info!("{} region(s) mapped", mapping.len());

    let output_dir = options.output_dir;
    create_dir(&output_dir)?;
    if let Some(debug_dir) = &options.compositor.debug_dir {
        create_dir(debug_dir)?;
        log_font_listing(&options.resolver);
    }

    let resolver = Arc::new(FontResolver::new(options.resolver));
    let compositor = Compositor::new(resolver, options.compositor);

    let send = |event: Progress| {
        if let Some(tx) = progress {
            tx.send(event).ok();
        }
    };

    let total = table.rows.len();
    send(Progress::Started { rows: total });

    let mut written = 0;
    let mut substitutions = 0;
    for (index, row) in table.rows.iter().enumerate() {
        let rendered = compositor.render_row(&template, &mapping, row, index);
        substitutions += rendered.substitutions;

        let path = output_dir.join(format!("{}.png", index + 1));
        match write_png(&path, &rendered.image) {
            Ok(()) => written += 1,
            Err(err) => log::error!("Row {}: cannot write {path}: {err}", index + 1),
        }

        if index % PROGRESS_EVERY == 0 || index + 1 == total {
            send(Progress::Row { index, total });
        }
    }

    log::info!(
        "Wrote {written} of {total} image(s) to {output_dir} ({substitutions} substitution(s))"
    );
    send(Progress::Finished {
        output: output_dir.clone(),
    });

    Ok(BatchSummary {
        rows: total,
        written,
        substitutions,
        output_dir,
    })
}

fn create_dir(dir: &Utf8Path) -> Result<(), BatchError> {
    fs::create_dir_all(dir).map_err(|e| BatchError::Output {
        path: dir.to_string(),
        reason: e.to_string(),
    })
}

fn log_font_listing(config: &ResolverConfig) {
    for listing in discover_font_files(&config.search_dirs()) {
        let (shown, rest) = listing.preview(10);
        log::debug!("Fonts in {}: {} file(s)", listing.dir.display(), listing.files.len());
        for file in shown {
            log::debug!("  {}", file.display());
        }
        if rest > 0 {
            log::debug!("  ... and {rest} more");
        }
    }
}
