//! 修剪两条边界曲线的失配端点后计算距离指标.
//!
//! 结果写入 JSON 文件, 修剪情况画成 SVG. 两个文件都只在所有步骤成功后才写出.

use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use curve_berry::prelude::*;
use utils::loader;

#[derive(Parser, Debug)]
#[command(version, about = "Trimmed boundary distance metrics with an SVG of the trimming")]
struct Args {
    /// TOML 参数文件.
    #[arg(long)]
    config: Option<PathBuf>,

    /// MRI 标签切片 (nii).
    mri: PathBuf,

    /// 组织学切片 (nii).
    hist: PathBuf,

    /// 输出 SVG 路径.
    out_svg: PathBuf,

    /// 输出 JSON 路径.
    out_json: PathBuf,

    /// 多余的参数被忽略.
    #[arg(hide = true)]
    rest: Vec<OsString>,
}

fn run(args: &Args) -> Result<()> {
    let cfg = loader::load_config(args.config.as_deref())?;
    let (mri, hist) = loader::load_pair(&args.mri, &args.hist)?;

    let pair = CurvePair::extract(&mri, &hist, &cfg, Variant::LabelAware)?;
    let (record, bounds) = pair.measure_trimmed();
    log::info!("{record:?}");
    let json = serde_json::to_string(&record)?;

    pair.plot(mri.shape(), bounds).save(&args.out_svg)?;
    fs::write(&args.out_json, json)?;

    let (n, m) = (pair.mri.len(), pair.hist.len());
    let (n1, n2) = bounds.trimmed_count(n, m);
    println!("Trimmed {n1} of {n} MRI points and {n2} of {m} histology points");
    println!("{} {} {} {}", bounds.am, bounds.bm, bounds.ah, bounds.bh);
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
