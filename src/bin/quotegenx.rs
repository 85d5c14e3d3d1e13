use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "quotegenx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a quote-card document to PNG.
    Render(RenderArgs),
    /// Split a quote into statement and attribution and print it as JSON.
    Parse(ParseArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path. Defaults to the theme/aspect file name next to the input.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Extra font directory (TTF/OTF/TTC).
    #[arg(long)]
    fonts: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ParseArgs {
    quote: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Parse(args) => cmd_parse(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let doc = quotegenx::RenderDocument::from_path(&args.in_path)?;
    let mut session = quotegenx::EditorSession::from_document(&doc)?;
    if let Some(dir) = &args.fonts {
        session.text_mut().load_dir(dir)?;
    }

    let export = session.render_png()?;
    let out = args.out.unwrap_or_else(|| {
        args.in_path
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join(&export.file_name)
    });

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&out, &export.bytes)
        .with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_parse(args: ParseArgs) -> anyhow::Result<()> {
    let parsed = quotegenx::parse_quote(&args.quote);
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}
