use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use order_fixtures::fonts::load_typeface;
use order_fixtures::{run_batch, BatchConfig, GeneratorBuilder, Locale, Suite, WrittenFixture};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Generates synthetic order images with matching JSON records.
///
/// Text is rendered with the first usable font among `ORDER_FIXTURES_FONT`,
/// `ORDER_FIXTURES_FONTS_DIR`, `assets/fonts` and the usual system locations. Pass
/// `--font` to choose one explicitly.
#[derive(Parser)]
#[command(author, version, about = "Synthetic order document fixtures")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    options: Options,
}

#[derive(Args)]
struct Options {
    /// Number of fixtures per suite (defaults: retail 10, complex 20).
    #[arg(long, short = 'n', global = true)]
    count: Option<usize>,

    /// Output directory. With `all`, each suite gets a subdirectory here.
    #[arg(long, short = 'o', global = true)]
    out: Option<PathBuf>,

    /// Seed for reproducible output.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Label language: `en` or `zh`.
    #[arg(long, short = 'l', global = true, default_value = "en")]
    locale: Locale,

    /// TrueType/OpenType font used for all text.
    #[arg(long, global = true)]
    font: Option<PathBuf>,

    /// Log every font candidate and written file.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Store receipts and invoices (simple, detailed, invoice, condensed, modern).
    Retail,

    /// Chinese e-commerce, B2B, international, mixed and customized orders.
    Complex,

    /// The fixed showcase order as `order_image.png` / `order_image_chinese.png`.
    Sample,

    /// Every suite; retail and sample in both languages.
    #[command(aliases = ["run-all", "run_all"])]
    All,
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.options.verbose);

    let result = run(&cli);

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let options = &cli.options;
    let mut builder = GeneratorBuilder::new().with_locale(options.locale);
    if let Some(seed) = options.seed {
        builder = builder.with_seed(seed);
    }
    if let Some(font) = &options.font {
        builder = builder.with_typeface(load_typeface(font)?);
    }
    let mut generator = builder.build();
    tracing::info!("rendering text with {}", generator.typeface().describe());

    let batches = match cli.command {
        Commands::Retail => vec![config(Suite::Retail, options.locale, options, false)],
        Commands::Complex => vec![config(Suite::Complex, Locale::Chinese, options, false)],
        Commands::Sample => vec![config(Suite::Sample, options.locale, options, false)],
        Commands::All => vec![
            config(Suite::Retail, Locale::English, options, true),
            config(Suite::Retail, Locale::Chinese, options, true),
            config(Suite::Complex, Locale::Chinese, options, true),
            config(Suite::Sample, Locale::English, options, true),
            config(Suite::Sample, Locale::Chinese, options, true),
        ],
    };

    for batch in &batches {
        let written = run_batch(&mut generator, batch)?;
        report(&written, &batch.output_dir);
    }
    Ok(())
}

fn config(suite: Suite, locale: Locale, options: &Options, nested: bool) -> BatchConfig {
    let mut config = BatchConfig::new(suite, locale);
    if suite != Suite::Sample {
        if let Some(count) = options.count {
            config = config.with_count(count);
        }
    }
    if let Some(out) = &options.out {
        config = if nested {
            config.with_output_dir(out.join(suite.default_dir(locale)))
        } else {
            config.with_output_dir(out)
        };
    }
    config
}

fn report(written: &[WrittenFixture], dir: &Path) {
    for fixture in written {
        println!("{} -> {}", fixture.order_id, fixture.image_path.display());
    }
    println!("{} fixture(s) written to {}", written.len(), dir.display());
}

fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("order_fixtures=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("order_fixtures=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
