use clap::Parser;
use netops_etl::config::parse_args;
use netops_etl::core::tabulate::TabulatePipeline;
use netops_etl::utils::logger;
use netops_etl::EtlEngine;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "converter")]
#[command(about = "Flatten a site-keyed JSON mapping into one CSV table")]
struct Args {
    /// Input JSON document: {site: [records...]}
    input: PathBuf,

    /// Output CSV file
    output: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args: Args = parse_args();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    let pipeline = TabulatePipeline::new(args.input, args.output);
    let engine = EtlEngine::new(pipeline);

    match engine.run() {
        Ok(summary) => {
            println!("✅ {}", summary);
        }
        Err(e) => {
            tracing::error!("convert failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
