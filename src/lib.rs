pub mod codec;
pub mod error;
pub mod parse;
pub mod render;
pub mod table;

pub use codec::{RECORD_SIZE, SpanTable, decode, encode};
pub use error::{AgeError, Result};
pub use table::{UcdVersion, VersionedSpan};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use table::SourceInfo;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// What kind of artifact to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// A Rust source module embedding the table (see [`render`]).
    #[default]
    Rust,
    /// The bare byte table.
    Raw,
}

/// Everything a generation run needs; there is no global configuration.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,

    /// If set, also write a JSON [`table::TableManifest`] here.
    pub manifest: Option<PathBuf>,

    pub header: parse::HeaderPattern,
    pub render: render::RenderOptions,
}

impl GenerateOptions {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            format: OutputFormat::default(),
            manifest: None,
            header: parse::HeaderPattern::default(),
            render: render::RenderOptions::default(),
        }
    }
}

/// Outcome of a successful [`generate`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    pub ucd_version: UcdVersion,
    pub span_count: usize,
    pub bytes_written: usize,
}

/// Read the header version and every span of `input`, and encode them.
///
/// The header is checked before the body is touched.
pub fn build_table(input: &Path, header: &parse::HeaderPattern) -> Result<SpanTable> {
    let ucd_version = parse::parse_ucd_version_with(input, header)?;
    info!(
        "Scanning for version spans for UCD {ucd_version}: {}",
        input.display()
    );

    let spans = parse::parse_spans(input)?.collect::<Result<Vec<_>>>()?;
    info!("Found {} versioned spans", spans.len());

    SpanTable::build(ucd_version, &spans)
}

/// Parse `opts.input`, encode it, and write the artifact (and manifest).
///
/// Nothing is written unless every step succeeds; outputs are staged in
/// temporary files next to their destinations and moved into place last.
pub fn generate(opts: &GenerateOptions) -> Result<GenerateSummary> {
    let table = build_table(&opts.input, &opts.header)?;

    let content = match opts.format {
        OutputFormat::Rust => {
            let mut render_opts = opts.render.clone();
            if render_opts.source_label.is_none() {
                render_opts.source_label = opts
                    .input
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned());
            }
            render::render_table_with_options(&table, &render_opts).into_bytes()
        }
        OutputFormat::Raw => table.as_bytes().to_vec(),
    };

    let manifest = match &opts.manifest {
        Some(path) => {
            let source_len = fs::metadata(&opts.input)
                .map_err(|e| AgeError::io(&opts.input, e))?
                .len();
            let manifest = table.manifest(SourceInfo {
                path: Some(opts.input.to_string_lossy().to_string()),
                byte_len: source_len,
            });
            // prettify JSON so it's easy to inspect / diff.
            let json = serde_json::to_string_pretty(&manifest)?;
            Some((path, stage(path, json.as_bytes())?))
        }
        None => None,
    };

    let artifact = stage(&opts.output, &content)?;
    persist(artifact, &opts.output)?;
    info!("Wrote to {}", opts.output.display());

    if let Some((path, staged)) = manifest {
        if let Err(e) = persist(staged, path) {
            // the artifact must not outlive a failed run.
            let _ = fs::remove_file(&opts.output);
            return Err(e);
        }
        info!("Wrote manifest to {}", path.display());
    }

    Ok(GenerateSummary {
        ucd_version: table.ucd_version(),
        span_count: table.len(),
        bytes_written: content.len(),
    })
}

/// Write `content` to a temporary file in `dest`'s directory.
fn stage(dest: &Path, content: &[u8]) -> Result<NamedTempFile> {
    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| AgeError::io(dir, e))?;
    tmp.write_all(content).map_err(|e| AgeError::io(dest, e))?;
    tmp.flush().map_err(|e| AgeError::io(dest, e))?;
    debug!(dest = %dest.display(), bytes = content.len(), "staged output");
    Ok(tmp)
}

/// Move a staged file onto `dest`; on failure the staged file is deleted.
fn persist(staged: NamedTempFile, dest: &Path) -> Result<()> {
    staged.persist(dest).map_err(|e| AgeError::Persist {
        path: dest.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
