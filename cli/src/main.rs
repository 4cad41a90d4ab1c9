//! scriptbook CLI - script/notebook conversion tool

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use scriptbook::{
    parse_bytes, parse_str, render, send_code_cells, CodecRegistry, Dialect, JsonFormat,
    ShellSession,
};

#[derive(Parser)]
#[command(name = "scriptbook")]
#[command(version)]
#[command(
    about = "Convert shell and PowerShell scripts to and from notebook cells",
    long_about = None
)]
struct Cli {
    /// Input script or notebook file (shows its information)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a script to a raw notebook (JSON)
    #[command(alias = "nb")]
    Notebook {
        /// Input script file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Script dialect (detected from the input extension if not given)
        #[arg(long, value_enum)]
        dialect: Option<DialectArg>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Convert a raw notebook (JSON) back to a script
    Script {
        /// Input notebook file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Script dialect (detected from the output extension if not given)
        #[arg(long, value_enum)]
        dialect: Option<DialectArg>,
    },

    /// Show notebook information for a file
    Info {
        /// Input script or notebook file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Verify that a script survives a decode/encode round trip unchanged
    Check {
        /// Input script file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Send a script's code cells to an interactive shell
    Run {
        /// Input script or notebook file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Shell program (default: the dialect's shell)
        #[arg(long, value_name = "PROGRAM")]
        shell: Option<String>,

        /// Script dialect (detected from the input extension if not given)
        #[arg(long, value_enum)]
        dialect: Option<DialectArg>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum DialectArg {
    /// POSIX-style shell (# comments)
    Shell,
    /// PowerShell (# and <# ... #> comments)
    Powershell,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Shell => Dialect::Shell,
            DialectArg::Powershell => Dialect::PowerShell,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Notebook {
            input,
            output,
            dialect,
            pretty,
        }) => cmd_notebook(&input, output.as_deref(), dialect, pretty),
        Some(Commands::Script {
            input,
            output,
            dialect,
        }) => cmd_script(&input, output.as_deref(), dialect),
        Some(Commands::Info { input, json }) => cmd_info(&input, json),
        Some(Commands::Check { input }) => cmd_check(&input),
        Some(Commands::Run {
            input,
            shell,
            dialect,
        }) => cmd_run(&input, shell.as_deref(), dialect),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if let Some(input) = cli.input {
                cmd_info(&input, false)
            } else {
                println!("{}", "Usage: scriptbook <FILE>".yellow());
                println!("       scriptbook --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn resolve_dialect(
    flag: Option<DialectArg>,
    path: &Path,
) -> Result<Dialect, Box<dyn std::error::Error>> {
    match flag {
        Some(arg) => Ok(arg.into()),
        None => Ok(Dialect::from_path(path)?),
    }
}

fn cmd_notebook(
    input: &Path,
    output: Option<&Path>,
    dialect: Option<DialectArg>,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dialect = resolve_dialect(dialect, input)?;
    let data = fs::read(input)?;
    let notebook = parse_bytes(&data, dialect);

    let format = if pretty {
        JsonFormat::Pretty
    } else {
        JsonFormat::Compact
    };
    let json = scriptbook::to_json(&notebook, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!(
            "{} {} ({} cells)",
            "Saved to".green(),
            path.display(),
            notebook.cell_count()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_script(
    input: &Path,
    output: Option<&Path>,
    dialect: Option<DialectArg>,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let notebook = render::from_json(&data);

    let dialect = match (dialect, output) {
        (Some(arg), _) => arg.into(),
        (None, Some(path)) => Dialect::from_path(path)?,
        (None, None) => {
            return Err("specify --dialect or an output path with a script extension".into())
        }
    };

    let script = scriptbook::to_script(&notebook, dialect);

    if let Some(path) = output {
        fs::write(path, &script)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        // Byte-exact output: the script carries its own trailing newline.
        print!("{}", script);
        std::io::stdout().flush()?;
    }

    Ok(())
}

fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let registry = CodecRegistry::with_defaults();

    let ext = input.extension().and_then(|e| e.to_str()).unwrap_or("");
    let format = registry
        .get_by_extension(ext)
        .map(|c| c.name().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let notebook = registry.open(input)?;
    let code = notebook.code_cells().count();
    let markup = notebook.markup_cells().count();

    if json {
        let info = serde_json::json!({
            "file": input.display().to_string(),
            "format": format,
            "line_ending": notebook.metadata.line_ending.to_string(),
            "cells": notebook.cell_count(),
            "code_cells": code,
            "markup_cells": markup,
            "lines": notebook.line_count(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", "Notebook Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);
    println!("{}: {}", "Line endings".bold(), notebook.metadata.line_ending);
    println!("{}: {}", "Cells".bold(), notebook.cell_count());
    println!("{}: {}", "Code cells".bold(), code);
    println!("{}: {}", "Markup cells".bold(), markup);
    println!("{}: {}", "Lines".bold(), notebook.line_count());

    Ok(())
}

fn cmd_check(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let dialect = Dialect::from_path(input)?;
    let data = fs::read(input)?;
    let original = String::from_utf8_lossy(&data);

    let notebook = parse_str(&original, dialect);
    let rendered = scriptbook::to_script(&notebook, dialect);

    if rendered == original {
        println!(
            "{} {} ({} cells, {} line endings)",
            "Exact round trip:".green().bold(),
            input.display(),
            notebook.cell_count(),
            notebook.metadata.line_ending
        );
        return Ok(());
    }

    let separator = notebook.metadata.line_ending.as_str();
    let (line, before, after) = first_divergence(&original, &rendered, separator);
    println!("{}", "Re-encoding differs from the input:".yellow().bold());
    println!("  {} {}", format!("line {}:", line).bold(), before.dimmed());
    println!("  {} {}", "becomes:".bold(), after.dimmed());
    Err(format!("{} does not round-trip exactly", input.display()).into())
}

/// First line where two documents differ: (1-based number, left, right).
fn first_divergence<'a>(a: &'a str, b: &'a str, separator: &str) -> (usize, &'a str, &'a str) {
    let mut left = a.split(separator);
    let mut right = b.split(separator);
    let mut line = 1;
    loop {
        match (left.next(), right.next()) {
            (Some(l), Some(r)) if l == r => line += 1,
            (l, r) => return (line, l.unwrap_or(""), r.unwrap_or("")),
        }
    }
}

fn cmd_run(
    input: &Path,
    shell: Option<&str>,
    dialect: Option<DialectArg>,
) -> Result<(), Box<dyn std::error::Error>> {
    let notebook = CodecRegistry::with_defaults().open(input)?;

    // Shell choice: explicit flag, then the file's dialect, then whatever
    // language the first code cell carries.
    let dialect = dialect
        .map(Dialect::from)
        .or_else(|| Dialect::from_path(input).ok())
        .or_else(|| {
            notebook
                .code_cells()
                .next()
                .and_then(|c| Dialect::from_language(&c.language))
        })
        .unwrap_or(Dialect::Shell);
    log::debug!("resolved dialect {} for {}", dialect, input.display());
    let program = shell.unwrap_or_else(|| dialect.shell_program());

    let total = notebook.code_cells().count();
    println!(
        "{} {} code cells with '{}'",
        "Running".cyan().bold(),
        total,
        program
    );

    let mut session = ShellSession::spawn(program)?;
    send_code_cells(&notebook, &mut session)?;
    let code = session.close()?;

    if code != 0 {
        return Err(format!("shell exited with code {}", code).into());
    }
    println!("{}", "Done!".green().bold());
    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "scriptbook".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("Script/notebook conversion tool");
    println!();
    println!("License: MIT");
}
