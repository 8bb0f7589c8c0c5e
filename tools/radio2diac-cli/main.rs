use clap::Parser;
use radio2diac::catalog::CategoryRules;
use radio2diac::prelude::*;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// A command line tool to convert GNU Radio projects to Eclipse 4diac projects
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the GNU Radio project file (.grc)
    radio: PathBuf,
    /// Path to the Eclipse 4diac project file whose network is replaced
    #[arg(long)]
    diac: PathBuf,
    /// Output directory for the function block network
    #[arg(long)]
    fbn: PathBuf,
    /// Output directory for the generated function block types
    #[arg(long)]
    blocks: PathBuf,
    /// Output directory for the shared data and adapter types
    #[arg(long)]
    types: PathBuf,
    /// Optional JSON file with block category rules
    #[arg(long)]
    rules: Option<PathBuf>,
    /// IEC 61499 package of the generated types
    #[arg(long, default_value = "gnu_radio")]
    package: String,
    /// Fail on connections from unknown blocks instead of dropping them
    #[arg(long)]
    strict: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    run(cli);
}

fn run(cli: Cli) {
    let total_start = Instant::now();

    // --- 1. Flow graph model ---
    println!("Reading GNU Radio project file...\n=====================");
    println!("{}\n", cli.radio.display());
    let graph = GraphModelBuilder::new()
        .strict(cli.strict)
        .parse_file(&cli.radio)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read flow graph: {}", e)));

    println!("\nConnections:\n=====================");
    for connection in graph.connections() {
        println!("{} -> {}", connection.src, connection.dst);
    }

    if let Some(rules_path) = &cli.rules {
        let rules = CategoryRules::from_file(rules_path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load rules: {}", e)));
        println!("\nBlock categories:\n=====================");
        for (category, ids) in rules.categorize(graph.blocks.iter().map(|b| b.id.as_str())) {
            println!("{}: {}", category, ids.join(", "));
        }
    }

    // --- 2. Conversion ---
    println!("\nGenerating 4diac types and network...\n=====================");
    let convert_start = Instant::now();
    let artifacts = Converter::builder(graph)
        .with_package(&cli.package)
        .build()
        .convert()
        .unwrap_or_else(|e| exit_with_error(&format!("Conversion failed: {}", e)));
    let convert_duration = convert_start.elapsed();

    // --- 3. Output ---
    println!("\nWriting documents...\n=====================");
    let dirs = OutputDirs {
        blocks: cli.blocks,
        network: cli.fbn,
        types: cli.types,
    };
    let written = artifacts
        .write(&dirs)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to write documents: {}", e)));
    for path in &written {
        println!("  -> {}", path.display());
    }

    // --- 4. Host project ---
    println!("\nReplacing the function block network in the 4diac project file...\n=====================");
    DocumentPatcher::default()
        .patch_file(&cli.diac, &artifacts.network_element())
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to patch '{}': {}", cli.diac.display(), e)));

    println!("\n--- Summary ---");
    println!("Function blocks:      {}", artifacts.function_blocks.len());
    println!("Adapters:             {}", artifacts.adapters.len());
    println!("Network instances:    {}", artifacts.network.instances.len());
    println!("Adapter connections:  {}", artifacts.network.adapter_connections.len());
    println!("Conversion:           {:?}", convert_duration);
    println!("Total Execution:      {:?}", total_start.elapsed());
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
