//! # chatstats CLI
//!
//! Command-line interface for chatstats library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

use chatstats::ChatstatsError;
use chatstats::cli::Args;
use chatstats::config::StatsConfig;
use chatstats::core::FilterSettings;
use chatstats::format::{OutputFormat, render_text, to_format_string, write_to_format};
use chatstats::loader::load_messages;
use chatstats::session::StatsSession;

const DEFAULT_LOG_LEVEL: &str = "warn";

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ChatstatsError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    init_logging(args.log_level.as_deref());

    let format: OutputFormat = args.format.into();
    // JSON and CSV on stdout stay machine-readable
    let show_progress = format == OutputFormat::Text || args.output.is_some();

    let config = match &args.config {
        Some(path) => StatsConfig::from_json_file(Path::new(path))?,
        None => StatsConfig::new(),
    };
    debug!(?config, "using stats config");

    let settings = FilterSettings::new()
        .with_text(args.query.clone().unwrap_or_default())
        .with_case_sensitive(args.case_sensitive);

    if show_progress {
        println!("📦 chatstats v{}", env!("CARGO_PKG_VERSION"));
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("📂 Input:   {}", args.input);
        if let Some(ref output) = args.output {
            println!("💾 Output:  {}", output);
        }
        println!("📄 Format:  {}", format);
        if settings.is_active() {
            println!(
                "🔍 Query:   \"{}\"{}",
                settings.text_filter,
                if settings.case_sensitive { " (case-sensitive)" } else { "" }
            );
        }
        println!();
        println!("⏳ Loading messages...");
    }

    let load_start = Instant::now();
    let messages = load_messages(Path::new(&args.input))?;
    let load_time = load_start.elapsed();
    let original_count = messages.len();
    if show_progress {
        println!(
            "   Found {} messages ({:.2}s)",
            original_count,
            load_time.as_secs_f64()
        );
    }

    let stats_start = Instant::now();
    let mut session = StatsSession::new(messages, settings, config)?;
    session.set_page(args.page);
    if show_progress {
        println!(
            "📊 Computed statistics for {} messages ({:.2}s)",
            session.filtered_count(),
            stats_start.elapsed().as_secs_f64()
        );
    }

    match args.output {
        Some(ref output_path) => {
            println!("💾 Writing {}...", format);
            let write_start = Instant::now();
            write_to_format(&session, output_path, format)?;
            println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());
            println!();
            println!("✅ Done! Output saved to {}", output_path);
        }
        None if format == OutputFormat::Text => {
            println!();
            print!("{}", render_text(&session.report()));
        }
        None => {
            println!("{}", to_format_string(&session, format)?);
            return Ok(());
        }
    }

    let total_time = total_start.elapsed();
    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());
    let msgs_per_sec = original_count as f64 / total_time.as_secs_f64();
    println!("   Throughput:  {:.0} messages/sec", msgs_per_sec);

    Ok(())
}

/// Installs the stderr subscriber. `--log-level` wins over `RUST_LOG`.
fn init_logging(level: Option<&str>) {
    let env_filter = match level {
        Some(level) => EnvFilter::try_new(level).ok(),
        None => EnvFilter::try_from_default_env().ok(),
    }
    .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
