use clap::Parser;
use netops_etl::config::parse_args;
use netops_etl::core::filter::FilterPipeline;
use netops_etl::utils::logger;
use netops_etl::utils::validation::Validate;
use netops_etl::{EtlEngine, FilterRules};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "port-filter")]
#[command(about = "Drop interface records whose port is in the exclusion set")]
struct Args {
    /// Input JSON file, or a directory of .json files (batch mode)
    input: PathBuf,

    /// Output file, or output directory in batch mode
    output: PathBuf,

    /// Also exclude every port seen on the trigger VLAN
    #[arg(long)]
    vlan_aware: bool,

    /// TOML file overriding mode, excluded ports and VLAN trigger
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args: Args = parse_args();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    // 排除規則：優先用 --rules 指定的檔案，否則依模式取預設
    let rules = match &args.rules {
        Some(path) => match FilterRules::from_file(path) {
            Ok(rules) => rules,
            Err(e) => {
                eprintln!("❌ Failed to load rules file '{}': {}", path.display(), e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None if args.vlan_aware => FilterRules::vlan_aware_default(),
        None => FilterRules::static_default(),
    };

    if let Err(e) = rules.validate() {
        eprintln!("❌ Invalid filter rules: {}", e);
        std::process::exit(1);
    }

    tracing::debug!("filter rules: {:?}", rules);

    let pipeline = FilterPipeline::new(args.input, args.output, rules);
    let engine = EtlEngine::new(pipeline);

    match engine.run() {
        Ok(summary) => {
            println!("✅ {}", summary);
        }
        Err(e) => {
            tracing::error!("filter failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
