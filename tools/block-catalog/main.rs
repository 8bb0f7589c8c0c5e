use clap::Parser;
use radio2diac::catalog::{BlockCatalog, CategoryRules, DEFAULT_BLOCKS_DIR};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Lists the block ids and categories of installed GNU Radio block definitions
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory containing GNU Radio `.block.yml` definitions
    #[arg(default_value = DEFAULT_BLOCKS_DIR)]
    dir: PathBuf,
    /// JSON category rules; without it the built-in table is used
    #[arg(long)]
    rules: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    if !cli.dir.is_dir() {
        exit_with_error(&format!("Directory does not exist: {}", cli.dir.display()));
    }

    let catalog = BlockCatalog::scan(&cli.dir)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to scan block definitions: {}", e)));

    println!("Unique IDs:");
    for id in &catalog.ids {
        println!("{}", id);
    }
    println!("\nUnique Categories:");
    for category in &catalog.categories {
        println!("{}", category);
    }

    let rules = match &cli.rules {
        Some(path) => CategoryRules::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load rules: {}", e))),
        None => CategoryRules::builtin(),
    };
    println!("\nBlocks grouped by categories:");
    for (category, ids) in rules.categorize(catalog.ids.iter().map(String::as_str)) {
        println!("\nCategory: {}", category);
        for id in ids {
            println!("  - {}", id);
        }
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
