use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use num_bigint::BigUint;
use pow2_finder::{
    evaluate_exponent, run_search, summarize, CheckpointStore, FileCheckpointStore,
    FileResultSink, SearchConfig, SearchEvent,
};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::time::Instant;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(name = "pow2-finder")]
#[command(about = "Find powers of two whose decimal digits avoid 1, 2, 4 and 8", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Run the resumable search loop from the checkpoint file")]
    Run {
        #[arg(long, help = "Configuration file (JSON) - CLI options override config file values")]
        config: Option<String>,

        #[arg(short = 'f', long, help = "Checkpoint file path (overrides config file)")]
        checkpoint_file: Option<String>,

        #[arg(short = 'r', long, help = "Results file path (overrides config file)")]
        results_file: Option<String>,

        #[arg(short = 'p', long, help = "Print progress every N exponents (0 disables)")]
        progress_interval: Option<u64>,

        #[arg(short = 'l', long, help = "Stop after testing N exponents (default: run until killed)")]
        limit: Option<u64>,
    },

    #[command(about = "Test a single exponent for forbidden digits in 2^n")]
    Test {
        #[arg(help = "The exponent to test")]
        exponent: u64,
    },

    #[command(about = "Create the checkpoint file the search resumes from")]
    Init {
        #[arg(short = 'f', long, default_value = "checkpoint.txt")]
        checkpoint_file: String,

        #[arg(short, long, default_value = "0", help = "First exponent to test")]
        start: String,

        #[arg(long, help = "Overwrite an existing checkpoint file")]
        force: bool,
    },

    #[command(about = "Show search progress and results summary")]
    Status {
        #[arg(short = 'f', long, default_value = "checkpoint.txt")]
        checkpoint_file: String,

        #[arg(short = 'r', long, default_value = "results.txt")]
        results_file: String,
    },

    #[command(about = "Generate a default configuration file")]
    InitConfig {
        #[arg(help = "Output file path (default: search_config.json)")]
        output: Option<String>,
    },

    #[command(about = "Run benchmark tests")]
    Benchmark,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            checkpoint_file,
            results_file,
            progress_interval,
            limit,
        } => {
            run_loop(config, checkpoint_file, results_file, progress_interval, limit);
        }
        Commands::Test { exponent } => {
            test_exponent(exponent);
        }
        Commands::Init {
            checkpoint_file,
            start,
            force,
        } => {
            init_checkpoint(&checkpoint_file, &start, force);
        }
        Commands::Status {
            checkpoint_file,
            results_file,
        } => {
            show_status(&checkpoint_file, &results_file);
        }
        Commands::InitConfig { output } => {
            init_config_file(output.as_deref().unwrap_or("search_config.json"));
        }
        Commands::Benchmark => {
            run_benchmark();
        }
    }
}

fn run_loop(
    config_file: Option<String>,
    checkpoint_file: Option<String>,
    results_file: Option<String>,
    progress_interval: Option<u64>,
    limit: Option<u64>,
) {
    // Load config from file or use defaults
    let mut config = if let Some(config_path) = config_file {
        match SearchConfig::load_from_file(Path::new(&config_path)) {
            Ok(c) => {
                println!("Loaded configuration from: {}\n", config_path);
                c
            }
            Err(e) => {
                eprintln!("Error loading config file '{}': {}", config_path, e);
                std::process::exit(1);
            }
        }
    } else {
        SearchConfig::default()
    };

    // Apply CLI overrides
    if let Some(v) = checkpoint_file {
        config.checkpoint_file = v;
    }
    if let Some(v) = results_file {
        config.results_file = v;
    }
    if let Some(v) = progress_interval {
        config.progress_interval = v;
    }
    if let Some(v) = limit {
        config.limit = Some(v);
    }

    let mut checkpoint = FileCheckpointStore::new(&config.checkpoint_file);
    let mut results = FileResultSink::new(&config.results_file);

    // The checkpoint file must exist and be valid before the loop starts
    let resume_from = match checkpoint.load() {
        Ok(exponent) => exponent,
        Err(e) => {
            eprintln!(
                "Error: cannot read checkpoint file '{}': {}",
                config.checkpoint_file, e
            );
            eprintln!("Run 'pow2-finder init' to create one.");
            std::process::exit(1);
        }
    };

    println!("========================================");
    println!("  POWER OF TWO DIGIT SEARCH");
    println!("========================================");
    println!("Checkpoint file:   {}", config.checkpoint_file);
    println!("Results file:      {}", config.results_file);
    println!("Next exponent:     {}", resume_from);
    if config.progress_interval > 0 {
        println!("Progress interval: every {} exponents", config.progress_interval);
    } else {
        println!("Progress interval: disabled");
    }
    match config.limit {
        Some(n) => println!("Run limit:         {} exponents", n),
        None => println!("Run limit:         none (stop with a process signal)"),
    }
    println!("========================================\n");

    let cancel = AtomicBool::new(false);
    let start_time = Instant::now();
    let mut found_so_far = 0u64;

    let outcome = run_search(&config, &mut checkpoint, &mut results, &cancel, |event| {
        match event {
            SearchEvent::Progress { exponent } => {
                println!(
                    "[Search] Testing 2^{} | Found so far: {} | Time: {:.2}s",
                    exponent,
                    found_so_far,
                    start_time.elapsed().as_secs_f64()
                );
            }
            SearchEvent::Found { exponent, value } => {
                found_so_far += 1;
                announce_find(exponent, value);
            }
        }
    });

    match outcome {
        Ok(outcome) => {
            println!("\nSearch stopped.");
            println!("  Exponents tested:  {}", outcome.exponents_tested);
            println!("  Qualifying found:  {}", outcome.qualifying_found);
            println!("  Next exponent:     {}", outcome.next_exponent);
            println!("  Time elapsed:      {:.3}s", start_time.elapsed().as_secs_f64());
        }
        Err(e) => {
            eprintln!("Error: search aborted: {}", e);
            std::process::exit(1);
        }
    }
}

fn announce_find(exponent: u64, value: &BigUint) {
    let value_str = value.to_string();

    println!("\n========================================");
    println!("  QUALIFYING POWER FOUND!");
    println!("========================================");
    println!("Exponent:  2^{}", exponent);
    println!("Digits:    {}", value_str.len());
    if value_str.len() > 100 {
        println!("Value:     {}... ({} digits)", &value_str[..100], value_str.len());
    } else {
        println!("Value:     {}", value_str);
    }
    println!(
        "Found at:  {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!("========================================\n");
}

fn test_exponent(exponent: u64) {
    println!("Testing exponent: {}", exponent);
    println!();

    let start_time = Instant::now();
    let result = evaluate_exponent(exponent);
    let elapsed = start_time.elapsed();

    let value_str = result.value.to_string();
    println!("Results:");
    println!("  Digits: {}", value_str.len());
    if value_str.len() > 100 {
        println!("  Value:  {}... ({} digits)", &value_str[..100], value_str.len());
    } else {
        println!("  Value:  {}", value_str);
    }

    if result.qualifies {
        println!("  Status: QUALIFIES - no digit is 1, 2, 4 or 8");
    } else {
        println!("  Status: does not qualify");
    }

    println!("\nTime elapsed: {:.6}s", elapsed.as_secs_f64());
}

fn init_checkpoint(checkpoint_file: &str, start: &str, force: bool) {
    let start: BigUint = match start.parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("Error: Invalid starting exponent '{}'", start);
            std::process::exit(1);
        }
    };

    if Path::new(checkpoint_file).exists() && !force {
        eprintln!(
            "Error: checkpoint file '{}' already exists (use --force to overwrite)",
            checkpoint_file
        );
        std::process::exit(1);
    }

    let mut store = FileCheckpointStore::new(checkpoint_file);
    if let Err(e) = store.store(&start) {
        eprintln!("Error: could not write checkpoint file '{}': {}", checkpoint_file, e);
        std::process::exit(1);
    }

    println!("Checkpoint file created: {}", checkpoint_file);
    println!("The search will start at exponent {}.", start);
}

fn show_status(checkpoint_file: &str, results_file: &str) {
    println!("========================================");
    println!("  SEARCH STATUS");
    println!("========================================");
    println!("Checked at: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));

    match FileCheckpointStore::new(checkpoint_file).load() {
        Ok(next) => {
            println!("Next exponent:     {}", next);
            println!("Exponents tested:  all below {}", next);
        }
        Err(e) => {
            eprintln!("Error: cannot read checkpoint file '{}': {}", checkpoint_file, e);
            std::process::exit(1);
        }
    }

    match summarize(Path::new(results_file)) {
        Ok(summary) => {
            println!("Qualifying found:  {}", summary.count);
            if let Some(last) = summary.last {
                let last_str = last.to_string();
                if last_str.len() > 100 {
                    println!("Latest find:       {}... ({} digits)", &last_str[..100], last_str.len());
                } else {
                    println!("Latest find:       {}", last_str);
                }
            }
        }
        Err(e) => {
            eprintln!("Error: cannot read results file '{}': {}", results_file, e);
            std::process::exit(1);
        }
    }
    println!("========================================");
}

fn init_config_file(output: &str) {
    let config = SearchConfig::default();

    match config.save_to_file(Path::new(output)) {
        Ok(_) => {
            println!("Default configuration file created: {}", output);
            println!("\nConfiguration:");
            println!("  Checkpoint file:   {}", config.checkpoint_file);
            println!("  Results file:      {}", config.results_file);
            println!("  Progress interval: {}", config.progress_interval);
            println!("\nYou can now edit this file and use:");
            println!("  pow2-finder run --config {}", output);
        }
        Err(e) => {
            eprintln!("Error creating config file: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_benchmark() {
    println!("Running benchmarks...\n");

    let test_cases = vec![
        (1_000u64, "2^1000 (302 digits)"),
        (10_000u64, "2^10000 (3011 digits)"),
        (100_000u64, "2^100000 (30103 digits)"),
    ];

    for (exponent, description) in test_cases {
        println!("Test: {}", description);
        let start_time = Instant::now();
        let result = evaluate_exponent(exponent);
        let elapsed = start_time.elapsed();

        println!("  Qualifies: {}", result.qualifies);
        println!("  Time: {:.6}s", elapsed.as_secs_f64());
        println!();
    }

    println!("Scan benchmark (exponents 0-2000):");
    let start_time = Instant::now();
    let found = (0u64..=2000).filter(|&n| pow2_finder::qualifies(n)).count();
    let elapsed = start_time.elapsed();
    println!("  Qualifying found: {}", found);
    println!("  Time: {:.3}s", elapsed.as_secs_f64());
    println!(
        "  Rate: {:.0} exponents/second",
        2001.0 / elapsed.as_secs_f64()
    );
}
