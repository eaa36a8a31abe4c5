//! 计算 MRI 切片与组织学切片组织边界之间的距离指标, 以 JSON 输出到 stdout.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use curve_berry::prelude::*;
use utils::loader;

#[derive(Parser, Debug)]
#[command(version, about = "Boundary distance metrics between an MRI slice and a histology slice")]
struct Args {
    /// TOML 参数文件.
    #[arg(long)]
    config: Option<PathBuf>,

    /// MRI 切片 (nii).
    mri: PathBuf,

    /// 组织学切片 (nii).
    hist: PathBuf,

    /// 多余的参数被忽略.
    #[arg(hide = true)]
    rest: Vec<OsString>,
}

fn run(args: &Args) -> Result<()> {
    let cfg = loader::load_config(args.config.as_deref())?;
    let (mri, hist) = loader::load_pair(&args.mri, &args.hist)?;

    let pair = CurvePair::extract(&mri, &hist, &cfg, Variant::SingleTissue)?;
    let record = pair.measure();
    log::info!("{record:?}");

    println!("{}", serde_json::to_string(&record)?);
    Ok(())
}

fn main() {
    utils::init_logger();
    let args: Args = utils::parse_args();
    if !args.rest.is_empty() {
        log::warn!("ignoring {} extra argument(s)", args.rest.len());
    }
    if let Err(e) = run(&args) {
        utils::exit_with_error(&e);
    }
}
