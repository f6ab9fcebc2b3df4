use clap::Parser;
use codemod_native::logging::init_tracing;
use codemod_native::options::{
    QuoteStyle, TransformOptions, DEFAULT_SIZE, NEXT_MODULE, TARGET_MODULE,
};
use codemod_native::runner::{self, RunnerConfig, DEFAULT_EXTENSIONS};
use std::path::PathBuf;
use std::process::ExitCode;

/// Rewrites size-suffixed icon imports (`Add16`) to size-less icons with an explicit `size` prop.
#[derive(Parser, Debug)]
#[command(name = "codemod", version)]
struct Args {
    /// Files or directories to transform.
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Report what would change without writing files.
    #[arg(long, short = 'd')]
    dry_run: bool,

    /// Print transformed sources to stdout.
    #[arg(long, short = 'p')]
    print: bool,

    /// Print a JSON summary to stdout.
    #[arg(long)]
    json: bool,

    /// File extensions to consider.
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect::<Vec<_>>()
    )]
    extensions: Vec<String>,

    /// Skip paths containing this substring. Repeatable.
    #[arg(long = "ignore-pattern", default_value = "node_modules")]
    ignore_patterns: Vec<String>,

    /// Module whose imports are rewritten.
    #[arg(long, default_value = TARGET_MODULE)]
    target_module: String,

    /// Module specifier rewritten imports point at.
    #[arg(long, default_value = NEXT_MODULE)]
    rewrite_module_to: String,

    /// Keep the original module specifier.
    #[arg(long)]
    no_rewrite_source: bool,

    /// Size that needs no explicit `size` prop.
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    default_size: u32,

    /// Force the quote style of rewritten string literals.
    #[arg(long, value_parser = parse_quote, default_value = "auto")]
    quote: QuoteStyle,

    /// Omit the trailing comma in synthesized multi-line objects.
    #[arg(long)]
    no_trailing_comma: bool,

    /// Log each changed file.
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn parse_quote(value: &str) -> Result<QuoteStyle, String> {
    match value {
        "auto" => Ok(QuoteStyle::Auto),
        "single" => Ok(QuoteStyle::Single),
        "double" => Ok(QuoteStyle::Double),
        other => Err(format!("unknown quote style '{}'", other)),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut options = TransformOptions::new()
        .with_target_module(args.target_module)
        .with_rewrite_module_to((!args.no_rewrite_source).then_some(args.rewrite_module_to))
        .with_default_size(args.default_size);
    options.print_options.quote = args.quote;
    options.print_options.trailing_comma = !args.no_trailing_comma;

    let config = RunnerConfig {
        extensions: args.extensions,
        ignore_patterns: args.ignore_patterns,
        dry_run: args.dry_run,
        options,
    };

    let summary = runner::run(&args.paths, &config, args.print);

    if args.print {
        for file in &summary.files {
            if let Some(code) = &file.output {
                println!("// {}", file.path.display());
                println!("{}", code);
            }
        }
    }

    if args.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!("failed to serialize summary: {}", e),
        }
    } else {
        eprintln!(
            "{} changed, {} unchanged, {} failed{}",
            summary.changed,
            summary.unchanged,
            summary.failed,
            if config.dry_run { " (dry run)" } else { "" }
        );
    }

    if summary.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
