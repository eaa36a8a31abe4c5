use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use ndarray::Array2;
use nifti::writer::WriterOptions;
use nifti::NiftiHeader;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_curve_metric_viz"))
}

/// 写出一张 20×20 切片: 上半部分为 `top`, 下半部分为 `bottom`, 沿 x 平移 `tx` 毫米.
fn write_slice(path: &Path, top: f32, bottom: f32, tx: f32) {
    let data = Array2::from_shape_fn((20, 20), |(h, _)| if h < 10 { top } else { bottom });
    let header = NiftiHeader {
        sform_code: 1,
        srow_x: [1.0, 0.0, 0.0, tx],
        srow_y: [0.0, 1.0, 0.0, 0.0],
        srow_z: [0.0, 0.0, 1.0, 0.0],
        ..NiftiHeader::default()
    };
    WriterOptions::new(path)
        .reference_header(&header)
        .write_nifti(&data)
        .unwrap();
}

struct Run {
    out: Output,
    svg: PathBuf,
    json: PathBuf,
}

/// MRI 为标签 2 (上) / 6 (下), 组织学切片上下两部分强度由参数给出.
fn run_with(dir: &Path, hist_top: f32, hist_bottom: f32) -> Run {
    let mri = dir.join("mri.nii");
    let hist = dir.join("hist.nii");
    write_slice(&mri, 2.0, 6.0, 0.0);
    write_slice(&hist, hist_top, hist_bottom, 1.0);

    let svg = dir.join("out.svg");
    let json = dir.join("out.json");
    let out = bin()
        .args([&mri, &hist, &svg, &json])
        .output()
        .unwrap();
    Run { out, svg, json }
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn wrong_number_of_arguments() {
    let out = bin().args(["a.nii", "b.nii", "c.svg"]).output().unwrap();
    assert!(!out.status.success());
    #[cfg(unix)]
    assert_eq!(out.status.code(), Some(255));
    assert_eq!(stdout(&out).trim(), "Wrong number of arguments");
}

#[test]
fn trimmed_parallel_boundaries() {
    let dir = tempfile::tempdir().unwrap();
    let run = run_with(dir.path(), 30.0, 90.0);
    assert!(run.out.status.success(), "stderr: {}", stderr(&run.out));

    let text = stdout(&run.out);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Trimmed 2 of 20 MRI points and 2 of 20 histology points",
            "1 18 1 18"
        ]
    );

    let json = std::fs::read_to_string(&run.json).unwrap();
    assert!(json.starts_with("{\"label\":2,"), "{json}");
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    for k in ["bde_hd", "bde_median", "frechet"] {
        let x = v[k].as_f64().unwrap();
        assert!((x - 1.0).abs() < 1e-3, "{k} = {x}");
    }

    let svg = std::fs::read_to_string(&run.svg).unwrap();
    assert!(svg.contains(r#"width="20" height="20""#));
    assert_eq!(svg.matches(r#"stroke="orange""#).count(), 17);
    assert_eq!(svg.matches(r#"stroke="red""#).count(), 17);
    assert_eq!(svg.matches(r#"stroke="yellow""#).count(), 4);
}

#[test]
fn no_contour_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let run = run_with(dir.path(), 0.0, 0.0);
    assert!(!run.out.status.success());
    #[cfg(unix)]
    assert_eq!(run.out.status.code(), Some(255));
    assert!(stderr(&run.out).contains("No contours in histology: 0"));
    assert!(!run.svg.exists());
    assert!(!run.json.exists());
}
