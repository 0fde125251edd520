use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use papermark_config::Settings;
use papermark_engine::Document;
use papermark_engine::plugins::references;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Html,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Html => "html",
        }
    }
}

#[derive(Parser)]
#[command(
    name = "papermark",
    version,
    about = "Render report-style markdown with numbered sections, captions and citations"
)]
struct Cli {
    /// Markdown source file
    input: PathBuf,

    /// Output file (defaults to the input path with the format's extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// YAML style sheet applied before the document's own front matter
    #[arg(short, long)]
    style: Option<PathBuf>,

    /// Do not append the generated references section
    #[arg(long)]
    no_references: bool,

    /// Print the parsed document tree instead of rendering
    #[arg(long)]
    outline: bool,

    /// Print the effective style configuration as YAML instead of rendering
    #[arg(long)]
    print_style: bool,

    /// Settings file (defaults to ~/.config/papermark/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log parser decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let settings = match &cli.config {
        Some(path) => Settings::load_from_path(path)?.unwrap_or_default(),
        None => Settings::load()?,
    };
    debug!("settings: {settings:?}");

    let source = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;

    let mut doc = Document::new();
    if settings.references_list && !cli.no_references {
        references::install(&mut doc);
    }
    if let Some(path) = cli.style.as_ref().or(settings.stylesheet.as_ref()) {
        install_stylesheet(&mut doc, path)?;
    }
    doc.parse(&source)
        .with_context(|| format!("Failed to parse {}", cli.input.display()))?;

    if cli.outline || cli.print_style {
        if cli.outline {
            print!("{}", doc.outline());
        }
        if cli.print_style {
            print!("{}", doc.style().to_yaml()?);
        }
        return Ok(());
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| output_path(&cli.input, cli.format));
    if output == cli.input {
        bail!(
            "Output {} would overwrite the input; pass --output",
            output.display()
        );
    }

    let rendered = match cli.format {
        Format::Html => papermark_html::to_html(&doc)
            .with_context(|| format!("Failed to render {}", cli.input.display()))?,
    };
    std::fs::write(&output, rendered)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("wrote {}", output.display());
    println!("Wrote {}", output.display());
    Ok(())
}

/// Applies a style sheet as a pre-parse hook so it runs after extensions
/// have registered their kinds but before the front matter is read.
fn install_stylesheet(doc: &mut Document, path: &Path) -> Result<()> {
    let sheet = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read style sheet {}", path.display()))?;
    let name = path.display().to_string();
    doc.add_pre_parse_hook(move |doc| {
        let applied = doc
            .style_mut()
            .apply_yaml(&sheet)
            .with_context(|| format!("Invalid style sheet {name}"))?;
        debug!("style sheet {name} overrode {} kind(s)", applied.len());
        Ok(())
    });
    Ok(())
}

fn output_path(input: &Path, format: Format) -> PathBuf {
    input.with_extension(format.extension())
}
