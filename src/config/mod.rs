pub mod filter_rules;

pub use filter_rules::{FilterMode, FilterRules};

use clap::error::ErrorKind;
use clap::Parser;

/// 解析命令列參數：用法錯誤印出 usage 後以 1 結束，
/// --help / --version 正常以 0 結束。
pub fn parse_args<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}
