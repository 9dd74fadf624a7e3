use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use kanji_drill::engine::{compile_sheet, DrillConfig, DrillSheet};
use kanji_drill::input::{clipboard, file, LoadError, LoadedSheet};
use kanji_drill::markup::lex;
use kanji_drill::rendering::{
    get_font_with_config, Color, RasterEncoding, RasterRenderer, SheetRenderer, TextRenderer,
};

/// Base name of the image written when no output path is given
const DEFAULT_OUTPUT_STEM: &str = "kanji-drill";

#[derive(Parser, Debug)]
#[command(
    name = "kanji-drill",
    version,
    about = "Render fill-in-the-blank kanji drill sheets from {reading|answer} markup"
)]
struct Cli {
    /// Log debug details to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the question sheet to an image or a text preview
    Render(RenderArgs),
    /// Report malformed markup with line and column
    Check(SourceArgs),
    /// Print the token stream of every line
    Tokens(SourceArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Question file, one question per line; "-" or nothing reads stdin
    input: Option<PathBuf>,

    /// Read the questions from the system clipboard
    #[arg(long, conflicts_with = "input")]
    clipboard: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Png,
    DataUrl,
    Text,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output path ("-" for stdout). PNG defaults to kanji-drill.png, other formats to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Png)]
    format: OutputFormat,

    /// TrueType/OpenType font with Japanese glyphs
    #[arg(long, env = "KANJI_DRILL_FONT")]
    font: Option<PathBuf>,

    /// Glyph size and line height in pixels [default: 20]
    #[arg(long)]
    font_size: Option<f32>,

    /// Canvas width in pixels [default: 600]
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels [default: 600]
    #[arg(long)]
    height: Option<u32>,

    /// [default: black]
    #[arg(long, value_enum)]
    question_color: Option<Color>,

    /// [default: transparent]
    #[arg(long, value_enum)]
    background_color: Option<Color>,

    /// Colour of the masked answer key [default: white]
    #[arg(long, value_enum)]
    answer_color: Option<Color>,

    /// [default: red]
    #[arg(long, value_enum)]
    underline_color: Option<Color>,

    /// Always draw this many question rows, padding with blanks
    #[arg(long)]
    slots: Option<usize>,

    /// Fail instead of drawing malformed lines verbatim
    #[arg(long)]
    strict: bool,
}

impl RenderArgs {
    fn to_config(&self) -> DrillConfig {
        let mut config = DrillConfig::default();
        config.font.path = self.font.clone();
        if let Some(size) = self.font_size {
            config.font.size_px = size;
        }
        if let Some(width) = self.width {
            config.canvas.width = width;
        }
        if let Some(height) = self.height {
            config.canvas.height = height;
        }
        if let Some(color) = self.question_color {
            config.theme.question = color;
        }
        if let Some(color) = self.background_color {
            config.theme.background = color;
        }
        if let Some(color) = self.answer_color {
            config.theme.answer = color;
        }
        if let Some(color) = self.underline_color {
            config.theme.underline = color;
        }
        config.question_slots = self.slots;
        config.strict = self.strict;
        config
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Render(args) => handle_render(&args),
        Command::Check(args) => handle_check(&args),
        Command::Tokens(args) => handle_tokens(&args),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(Level::DEBUG.as_str())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.as_str()))
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
}

fn load_source(args: &SourceArgs) -> Result<LoadedSheet, LoadError> {
    if args.clipboard {
        return clipboard::load();
    }
    match &args.input {
        Some(path) if path != Path::new("-") => file::load(path),
        _ => file::load_stdin(),
    }
}

fn handle_render(args: &RenderArgs) -> anyhow::Result<()> {
    let config = args.to_config();
    let loaded = load_source(&args.source)?;
    let build = compile_sheet(&loaded, &config)?;

    let mut renderer: Box<dyn SheetRenderer> = match args.format {
        OutputFormat::Text => Box::new(TextRenderer::new(config.layout.clone())),
        OutputFormat::Png | OutputFormat::DataUrl => {
            let encoding = if args.format == OutputFormat::Png {
                RasterEncoding::Png
            } else {
                RasterEncoding::DataUrl
            };
            let font = get_font_with_config(&config.font)?;
            Box::new(RasterRenderer::new(font, config.clone(), encoding))
        }
    };

    let output = match (&args.output, args.format) {
        (Some(path), _) if path == Path::new("-") => None,
        (Some(path), _) => Some(path.clone()),
        (None, OutputFormat::Png) => Some(PathBuf::from(format!(
            "{}.{}",
            DEFAULT_OUTPUT_STEM,
            renderer.file_extension()
        ))),
        (None, _) => None,
    };

    // Output is only written once rendering has succeeded
    let mut rendered = Vec::new();
    renderer.render(&build.sheet, &mut rendered)?;

    match &output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(output = %path.display(), "wrote drill sheet");
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(&rendered)?;
            handle.flush()?;
        }
    }

    if !build.errors.is_empty() {
        info!(
            malformed = build.errors.len(),
            "malformed lines were drawn verbatim"
        );
    }
    Ok(())
}

fn handle_check(args: &SourceArgs) -> anyhow::Result<()> {
    let loaded = load_source(args)?;
    let build = DrillSheet::build(&loaded.lines, None);

    for error in &build.errors {
        println!("{}: {}", loaded.source, error);
    }

    if !build.errors.is_empty() {
        bail!(
            "{} of {} lines in {} have malformed markup",
            build.errors.len(),
            loaded.lines.len(),
            loaded.source
        );
    }

    println!(
        "{}: {} questions, {} answers, ok",
        loaded.source,
        build.sheet.questions.len(),
        build.sheet.answer_count()
    );
    Ok(())
}

fn handle_tokens(args: &SourceArgs) -> anyhow::Result<()> {
    let loaded = load_source(args)?;

    for (index, line) in loaded.lines.iter().enumerate() {
        let tokens: Vec<String> = lex(line).iter().map(ToString::to_string).collect();
        println!("{}: {}", index + 1, tokens.join(" "));
    }
    Ok(())
}
