use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::model::AnalysisMode;
use crate::model::result::BatchResult;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::build_summary;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("summary serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Emits `images.tsv`, `summary.json`, and `report.txt` under `out_dir`.
pub fn write_reports(
    result: &BatchResult,
    mode: AnalysisMode,
    out_dir: &Path,
) -> Result<(), ReportError> {
    fs::create_dir_all(out_dir)?;

    let tsv_path = out_dir.join("images.tsv");
    write_images_tsv(result, &tsv_path)?;

    let summary = build_summary(result, mode);

    let summary_path = out_dir.join("summary.json");
    fs::write(&summary_path, render_summary_json(&summary)?)?;

    let report_path = out_dir.join("report.txt");
    fs::write(&report_path, render_report_text(&summary))?;

    info!("reports written to {}", out_dir.display());
    Ok(())
}

const TSV_HEADER: &[&str] = &[
    "index",
    "file_name",
    "n1",
    "n2",
    "m1",
    "m2",
    "necrosis",
    "tumor_cells",
    "total",
    "pct_n1",
    "pct_n2",
    "pct_m1",
    "pct_m2",
    "pct_necrosis",
    "pct_tumor_cells",
    "survival_rate",
    "final_precision",
    "final_recall",
    "final_f1_score",
    "final_r_squared",
];

fn write_images_tsv(result: &BatchResult, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "{}", TSV_HEADER.join("\t"))?;
    for (i, image) in result.images.iter().enumerate() {
        let c = &image.counts;
        let p = &image.percentages;
        let m = &image.metrics;
        writeln!(
            w,
            "{i}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{:.1}\t{:.6}\t{:.6}\t{:.6}\t{:.6}",
            image.file_name,
            c.n1,
            c.n2,
            c.m1,
            c.m2,
            c.necrosis,
            c.tumor_cells,
            c.total,
            p.n1,
            p.n2,
            p.m1,
            p.m2,
            p.necrosis,
            p.tumor_cells,
            image.survival_rate,
            m.final_precision,
            m.final_recall,
            m.final_f1_score,
            m.final_r_squared,
        )?;
    }
    w.flush()
}
