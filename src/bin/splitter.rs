use clap::Parser;
use netops_etl::config::parse_args;
use netops_etl::core::split::SplitPipeline;
use netops_etl::utils::logger;
use netops_etl::EtlEngine;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "splitter")]
#[command(about = "Split one JSON document into per-entry files")]
struct Args {
    /// Input JSON document
    input: PathBuf,

    /// Output directory, created if absent
    output_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args: Args = parse_args();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!(
        "Splitting {} into {}",
        args.input.display(),
        args.output_dir.display()
    );

    let pipeline = SplitPipeline::new(args.input, args.output_dir);
    let engine = EtlEngine::new(pipeline);

    match engine.run() {
        Ok(summary) => {
            println!("✅ {}", summary);
        }
        Err(e) => {
            tracing::error!("split failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
