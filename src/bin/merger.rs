use clap::Parser;
use netops_etl::config::parse_args;
use netops_etl::core::merge::MergePipeline;
use netops_etl::utils::logger;
use netops_etl::EtlEngine;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "merger")]
#[command(about = "Merge a directory of JSON array files into one mapping")]
struct Args {
    /// Directory of .json input files
    input_dir: PathBuf,

    /// Output JSON file
    output: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args: Args = parse_args();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    let pipeline = MergePipeline::new(args.input_dir, args.output);
    let engine = EtlEngine::new(pipeline);

    match engine.run() {
        Ok(summary) => {
            println!("✅ {}", summary);
        }
        Err(e) => {
            tracing::error!("merge failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
