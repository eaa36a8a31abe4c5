//! 命令行脚本依赖的通用组件.

use std::fmt::Display;
use std::process;

use clap::error::ErrorKind;
use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;

pub mod loader;

/// 位置参数不足时输出到 stdout 的提示.
pub const WRONG_ARGS: &str = "Wrong number of arguments";

/// 失败时的退出码. 在 unix 上表现为 255.
pub const FAILURE: i32 = -1;

/// 初始化日志. 日志写到 stderr, 默认级别 `warn`, 可由 `RUST_LOG` 覆盖.
pub fn init_logger() {
    // 重复初始化不是错误.
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()
        .ok();
}

/// 解析命令行参数.
///
/// 缺少位置参数时在 stdout 输出 [`WRONG_ARGS`] 并以 [`FAILURE`] 退出;
/// 其余情况 (例如 `--help`) 交给 clap 处理.
pub fn parse_args<A: Parser>() -> A {
    match A::try_parse() {
        Ok(args) => args,
        Err(e) if e.kind() == ErrorKind::MissingRequiredArgument => {
            println!("{WRONG_ARGS}");
            process::exit(FAILURE)
        }
        Err(e) => e.exit(),
    }
}

/// 在 stderr 输出错误并以 [`FAILURE`] 退出.
pub fn exit_with_error(e: &dyn Display) -> ! {
    log::debug!("aborting: {e}");
    eprintln!("{e}");
    process::exit(FAILURE)
}
