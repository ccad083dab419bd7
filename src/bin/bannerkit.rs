use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::Level;

use bannerkit::{
    Configuration, CpuRasterizer, ExportFormat, ExportNote, ExportOptions,
    ExportOrchestrator, ExportOutcome, GifEncoderFactory, Rng64, markdown_snippet, random_style,
    suggested_file_name, template,
};

#[derive(Parser, Debug)]
#[command(name = "bannerkit", version)]
struct Cli {
    /// Log state transitions to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the compiled style tree of a configuration.
    Compile(CompileArgs),
    /// Export a configuration as PNG or GIF.
    Export(ExportArgs),
    /// Write a template (or a random style) as a configuration file.
    Template(TemplateArgs),
}

#[derive(Parser, Debug)]
struct CompileArgs {
    /// Input configuration JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Print CSS rule blocks instead of JSON.
    #[arg(long)]
    css: bool,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input configuration JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output file; defaults to a name derived from the title, in the current directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Override the configuration's export format.
    #[arg(long, value_enum)]
    format: Option<FormatChoice>,

    /// Frames sampled for animated output.
    #[arg(long, default_value_t = ExportOptions::default().frame_count)]
    frames: u32,

    /// Sampled duration for animated output, in milliseconds.
    #[arg(long, default_value_t = ExportOptions::default().duration_ms)]
    duration_ms: u32,

    /// Print a README markdown snippet referencing the output file.
    #[arg(long)]
    markdown: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct TemplateSource {
    /// Template id.
    #[arg(long)]
    name: Option<String>,

    /// Randomize palette, layout and effects instead.
    #[arg(long)]
    random: bool,
}

#[derive(Parser, Debug)]
struct TemplateArgs {
    #[command(flatten)]
    source: TemplateSource,

    /// Seed for `--random`; the wall clock when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Output configuration JSON.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Still,
    Animated,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Compile(args) => cmd_compile(args),
        Command::Export(args) => cmd_export(args),
        Command::Template(args) => cmd_template(args),
    }
}

fn read_config_json(path: &Path) -> anyhow::Result<Configuration> {
    Configuration::from_path(path)
        .with_context(|| format!("load configuration '{}'", path.display()))
}

fn write_config_json(path: &Path, cfg: &Configuration) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(cfg)?;
    std::fs::write(path, json + "\n")
        .with_context(|| format!("write configuration '{}'", path.display()))
}

fn cmd_compile(args: CompileArgs) -> anyhow::Result<()> {
    let cfg = read_config_json(&args.in_path)?;
    let tree = bannerkit::compile_style(&cfg);
    if args.css {
        print!("{}", tree.to_css());
    } else {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    }
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let mut cfg = read_config_json(&args.in_path)?;
    if let Some(f) = args.format {
        cfg.canvas.export_format = match f {
            FormatChoice::Still => ExportFormat::Still,
            FormatChoice::Animated => ExportFormat::Animated,
        };
    }

    let orch = ExportOrchestrator::new(ExportOptions {
        frame_count: args.frames,
        duration_ms: args.duration_ms,
        ..ExportOptions::default()
    });
    let mut rasterizer = CpuRasterizer::new();
    let encoders = GifEncoderFactory::default();

    let outcome = orch
        .export(&mut rasterizer, &cfg, &cfg, &encoders)
        .map_err(|e| anyhow::anyhow!("{}: {e}", e.user_message()))?;
    let report = match outcome {
        ExportOutcome::Finished(report) => report,
        ExportOutcome::Stale => anyhow::bail!("export was cancelled"),
    };

    if report.note == Some(ExportNote::Downgraded) {
        eprintln!("note: no active animation, exported a still PNG instead");
    }

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(suggested_file_name(&cfg, report.artifact.kind)));
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    std::fs::write(&out, &report.artifact.bytes)
        .with_context(|| format!("write artifact '{}'", out.display()))?;

    println!(
        "wrote {} ({}, {}x{}, {} frame(s))",
        out.display(),
        report.artifact.mime_type(),
        report.artifact.width,
        report.artifact.height,
        report.artifact.frame_count
    );
    if args.markdown {
        let file_name = out
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("{}", markdown_snippet(&cfg, &file_name));
    }
    Ok(())
}

fn cmd_template(args: TemplateArgs) -> anyhow::Result<()> {
    let cfg = match args.source.name {
        Some(name) => template(&name).with_context(|| {
            format!(
                "unknown template '{name}' (known: {})",
                bannerkit::TEMPLATE_IDS.join(", ")
            )
        })?,
        None => {
            let mut rng = args.seed.map_or_else(Rng64::from_time, Rng64::new);
            random_style(&mut rng, &Configuration::default())
        }
    };
    write_config_json(&args.out, &cfg)?;
    println!("wrote {}", args.out.display());
    Ok(())
}
