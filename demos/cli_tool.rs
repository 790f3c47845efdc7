//! CLI Tool Example
//!
//! This example demonstrates how to build a command-line tool
//! using sheetvoice for compiling a workbook into a voice-assistant schema.

use std::io::{self, Write};
use std::process;
use sheetvoice::{CompilerBuilder, PlatformType, SheetVoiceError, XlsxSource};

fn main() {
    // Set RUST_LOG=sheetvoice=debug to trace worksheet classification
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <input.xlsx> [options]", args[0]);
        eprintln!("\nOptions:");
        eprintln!("  --platform <name>    Target platform: alexa (default), dialogFlow, cortana");
        eprintln!("  --other <title>      Treat the worksheet as an extra table (repeatable)");
        eprintln!("  --locale <code>      Candidate locale (repeatable, first is the default)");
        eprintln!("\nExamples:");
        eprintln!("  {} room-booker.xlsx", args[0]);
        eprintln!("  {} room-booker.xlsx --platform dialogFlow", args[0]);
        eprintln!("  {} room-booker.xlsx --other FAQ --locale de-DE", args[0]);
        process::exit(1);
    }

    let input_path = &args[1];

    // Parse options
    let mut platform = PlatformType::default();
    let mut others: Vec<String> = Vec::new();
    let mut locales: Vec<String> = Vec::new();
    let mut i = 2;
    while i < args.len() {
        let option = args[i].as_str();
        if !matches!(option, "--platform" | "--other" | "--locale") {
            eprintln!("Error: Unknown option: {}", option);
            process::exit(1);
        }
        if i + 1 >= args.len() {
            eprintln!("Error: {} requires a value", option);
            process::exit(1);
        }
        let value = args[i + 1].clone();
        match option {
            "--platform" => {
                platform = value.parse().unwrap_or_else(|e| {
                    handle_error(e);
                    process::exit(1);
                });
            }
            "--other" => others.push(value),
            _ => locales.push(value),
        }
        i += 2;
    }

    if let Err(e) = compile_workbook(input_path, platform, others, locales) {
        handle_error(e);
        process::exit(1);
    }
}

fn compile_workbook(
    input_path: &str,
    platform: PlatformType,
    others: Vec<String>,
    locales: Vec<String>,
) -> Result<(), SheetVoiceError> {
    let mut builder = CompilerBuilder::new()
        .with_platform(platform)
        .with_other_sheets(others);
    if !locales.is_empty() {
        builder = builder.with_locales(locales);
    }
    let compiler = builder.build()?;

    let source = XlsxSource::open(input_path)?;
    let schema = compiler.compile(&source)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, &schema.to_json_value())?;
    writeln!(handle)?;
    handle.flush()?;

    Ok(())
}

fn handle_error(error: SheetVoiceError) {
    match error {
        SheetVoiceError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
            eprintln!("Please check that the file exists and you have permission to access it.");
        }
        SheetVoiceError::Parse(parse_err) => {
            eprintln!("Parse Error: {}", parse_err);
            eprintln!("The file may not be a valid workbook or may be corrupted.");
        }
        SheetVoiceError::Json(json_err) => {
            eprintln!("JSON Error: {}", json_err);
        }
        SheetVoiceError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
            eprintln!("Please check the --platform and --locale values.");
        }
        SheetVoiceError::Fetch { worksheet, message } => {
            eprintln!("Fetch Error:");
            eprintln!("  Worksheet: {}", worksheet);
            eprintln!("  Details: {}", message);
        }
        SheetVoiceError::SecurityViolation(msg) => {
            eprintln!("Security Violation: {}", msg);
            eprintln!("The file violates security constraints (e.g., file size limit).");
        }
    }
}
