//! 对 `curve_berry` 加载功能的一层封装.

use std::path::Path;

use curve_berry::config::CurveMetricConfig;
use curve_berry::{Result, Volume};

/// 加载配置. 未给出路径时使用默认参数.
pub fn load_config(path: Option<&Path>) -> Result<CurveMetricConfig> {
    match path {
        Some(p) => CurveMetricConfig::load(p),
        None => Ok(CurveMetricConfig::default()),
    }
}

/// 依次加载 MRI 切片和组织学切片.
pub fn load_pair<P: AsRef<Path>, Q: AsRef<Path>>(mri: P, hist: Q) -> Result<(Volume, Volume)> {
    let mri = Volume::open(mri)?;
    let hist = Volume::open(hist)?;
    Ok((mri, hist))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        assert_eq!(load_config(None).unwrap(), CurveMetricConfig::default());
    }

    #[test]
    fn test_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("cfg.toml");
        fs::write(&p, "[mri_single]\nerosion_radius = 3\n").unwrap();
        let cfg = load_config(Some(p.as_path())).unwrap();
        assert_eq!(cfg.mri_single.erosion_radius, 3);
    }

    #[test]
    fn test_missing_volume() {
        assert!(load_pair("/nonexistent/mri.nii", "/nonexistent/hist.nii").is_err());
    }
}
