use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, IsTerminal, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use clef_reader::cli::{Cli, ColorMode, ErrorPolicy};
use clef_reader::config::Config;
use clef_reader::error::ClefError;
use clef_reader::formatter::format_event;
use clef_reader::reader::LogEventReader;

fn main() -> ExitCode {
    // Reset SIGPIPE to default behavior so upstream writers get a clean
    // SIGPIPE signal instead of a BrokenPipeError when clef exits early.
    reset_sigpipe();

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "clef", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    init_tracing(cli.verbose);

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("clef: {e}");
            return ExitCode::from(1);
        }
    };

    let use_color = resolve_color_mode(config.color_mode);

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    let stdin_only = [Path::new("-")];
    let sources: Vec<&Path> = if cli.files.is_empty() {
        stdin_only.to_vec()
    } else {
        cli.files.iter().map(|p| p.as_path()).collect()
    };

    for path in sources {
        let name = if path == Path::new("-") {
            "<stdin>".to_string()
        } else {
            path.display().to_string()
        };

        let result = if path == Path::new("-") {
            decode_source(io::stdin().lock(), &name, &config, use_color, &mut writer)
        } else {
            File::open(path)
                .map_err(ClefError::from)
                .and_then(|file| {
                    decode_source(BufReader::new(file), &name, &config, use_color, &mut writer)
                })
        };

        if let Err(e) = result {
            return report_failure(&name, &e);
        }
    }

    if let Err(e) = writer.flush() {
        return report_failure("<stdout>", &ClefError::Io(e));
    }

    ExitCode::SUCCESS
}

/// Decode every event from one source and write it out.
fn decode_source<R: BufRead, W: Write>(
    source: R,
    name: &str,
    config: &Config,
    use_color: bool,
    writer: &mut W,
) -> Result<(), ClefError> {
    let mut reader = LogEventReader::new(source);
    let mut line_buf = String::new();

    loop {
        match reader.try_read() {
            Ok(Some(event)) => {
                line_buf.clear();
                format_event(&event, config, use_color, &mut line_buf);
                writeln!(writer, "{line_buf}")?;
            }
            Ok(None) => break,
            Err(e) if e.is_recoverable() && config.on_error == ErrorPolicy::Skip => {
                tracing::warn!(source = name, "skipping undecodable input: {e}");
            }
            Err(e) => return Err(e),
        }
    }

    tracing::debug!(source = name, lines = reader.line_number(), "finished source");
    reader.close();
    Ok(())
}

fn report_failure(name: &str, error: &ClefError) -> ExitCode {
    match error {
        ClefError::Io(e) if e.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        ClefError::Io(_) => {
            eprintln!("clef: {name}: {error}");
            ExitCode::from(2)
        }
        _ => {
            eprintln!("clef: {name}: {error}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn resolve_color_mode(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            let stdout = io::stdout();
            if !stdout.is_terminal() {
                return false;
            }
            if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
                return false;
            }
            if std::env::var("TERM").is_ok_and(|v| v == "dumb") {
                return false;
            }
            true
        }
    }
}

/// Reset SIGPIPE to the default (terminate) behavior.
///
/// By default, Rust ignores SIGPIPE to surface `BrokenPipe` I/O errors.
/// For a CLI filter like `clef`, this causes the *upstream* writer to receive
/// a `BrokenPipeError` when `clef` exits. Restoring `SIG_DFL` lets the OS
/// handle the signal normally.
#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}
