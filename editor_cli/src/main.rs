//! Compiscript highlighter - renders source files as highlighted markup.
//!
//! Usage: cs-highlight [OPTIONS] [FILE]

use clap::{Parser, ValueEnum};
use compiscript_editor_core::perf::as_ms;
use compiscript_editor_core::syntax::tokenize;
use compiscript_editor_core::{Editor, MarkupStyle, SyntaxHighlighter, Theme};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Highlighted markup only
    Markup,
    /// Standalone HTML page with the theme stylesheet
    Html,
    /// JSON token dump, one entry per line
    Tokens,
}

#[derive(Debug, Parser)]
#[command(name = "cs-highlight", version, about = "Highlight Compiscript source as markup")]
struct Cli {
    /// Source file; reads stdin when absent or `-`
    path: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Markup)]
    format: Format,

    /// Theme used for `html` output and `--stylesheet`
    #[arg(short, long, default_value = "dark")]
    theme: String,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Class emitted on every span before the kind class ([A-Za-z0-9_-], may be empty)
    #[arg(long = "class-prefix", value_name = "PREFIX", default_value = "token", value_parser = parse_class_prefix)]
    style: MarkupStyle,

    /// Print only the theme stylesheet
    #[arg(long)]
    stylesheet: bool,
}

fn parse_class_prefix(prefix: &str) -> Result<MarkupStyle, String> {
    MarkupStyle::with_prefix(prefix.to_string())
        .ok_or_else(|| format!("'{prefix}' may only contain ASCII letters, digits, '-' and '_'"))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> io::Result<()> {
    let theme = Theme::by_name(&cli.theme).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Unknown theme '{}' (available: dark, light)", cli.theme),
        )
    })?;

    if cli.stylesheet {
        return write_output(cli, &theme.stylesheet(&cli.style));
    }

    let highlighter = SyntaxHighlighter::with_style(cli.style.clone());
    let mut editor = Editor::with_highlighter(highlighter);
    let title = match cli.path.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            editor.open_file(path)?;
            path.display().to_string()
        }
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            editor.set_text(&text);
            "stdin".to_string()
        }
    };

    let rendered = match cli.format {
        Format::Markup => editor.markup().to_string(),
        Format::Html => theme.render_page(&title, &editor.overlay_markup(), &cli.style),
        Format::Tokens => {
            let text = editor.text();
            serde_json::to_string_pretty(&tokenize(&text))
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
        }
    };

    let stats = editor.highlight_stats();
    log::debug!(
        "Highlighted {} lines of {} in {:.3}ms (avg {:.3}ms, min {:.3}ms, max {:.3}ms over {} passes)",
        editor.line_numbers().len(),
        title,
        as_ms(stats.last()),
        as_ms(stats.average()),
        as_ms(stats.min()),
        as_ms(stats.max()),
        stats.count()
    );

    write_output(cli, &rendered)
}

fn write_output(cli: &Cli, rendered: &str) -> io::Result<()> {
    match &cli.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            log::info!("Wrote {}", path.display());
            Ok(())
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()
        }
    }
}
