use clap::Parser;
use netops_etl::config::parse_args;
use netops_etl::core::mac_xref::XrefPipeline;
use netops_etl::utils::logger;
use netops_etl::EtlEngine;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mac-xref")]
#[command(about = "Cross-reference a MAC list against a network-scan XML report")]
struct Args {
    /// MAC address list, one per line
    #[arg(default_value = "mac_list.txt")]
    mac_list: PathBuf,

    /// Network-scan XML report
    #[arg(default_value = "myscan.xml")]
    scan_report: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args: Args = parse_args();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    let pipeline = XrefPipeline::new(args.mac_list, args.scan_report);
    let engine = EtlEngine::new(pipeline);

    match engine.run() {
        Ok(summary) => {
            tracing::info!("{}", summary);
        }
        Err(e) => {
            tracing::error!("cross-reference failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
