use std::fmt::Write;

use crate::report::BatchSummary;

pub fn render_report_text(summary: &BatchSummary) -> String {
    let mut out = String::new();

    out.push_str("Tumor Microenvironment Composition Report\n");
    out.push_str("=========================================\n\n");

    out.push_str("1. Batch overview\n");
    let _ = writeln!(out, "Analysis mode: {}", summary.mode);
    let _ = writeln!(out, "Images analyzed: {}", summary.n_images);
    out.push('\n');

    out.push_str("2. Composition (mean across images)\n");
    let c = &summary.composition_mean;
    let _ = writeln!(out, "N1 (anti-tumor neutrophils): {:.2}%", c.n1);
    let _ = writeln!(out, "N2 (pro-tumor neutrophils): {:.2}%", c.n2);
    let _ = writeln!(out, "M1 (anti-tumor macrophages): {:.2}%", c.m1);
    let _ = writeln!(out, "M2 (pro-tumor macrophages): {:.2}%", c.m2);
    let _ = writeln!(out, "Necrosis: {:.2}%", c.necrosis);
    let _ = writeln!(out, "Tumor cells: {:.2}%", c.tumor_cells);
    out.push('\n');

    out.push_str("3. Survival outlook\n");
    let _ = writeln!(out, "Mean survival rate: {:.1}%", summary.survival.mean);
    let _ = writeln!(
        out,
        "Range: {:.1}% - {:.1}%",
        summary.survival.min, summary.survival.max
    );
    let _ = writeln!(out, "{}", survival_statement(summary.survival.mean));
    out.push('\n');

    out.push_str("4. Model evaluation\n");
    let m = &summary.overall_metrics;
    let _ = writeln!(out, "Final precision: {:.6}", m.final_precision);
    let _ = writeln!(out, "Final recall: {:.6}", m.final_recall);
    let _ = writeln!(out, "Final F1 score: {:.6}", m.final_f1_score);
    let _ = writeln!(out, "Final R-squared: {:.6}", m.final_r_squared);
    let _ = writeln!(
        out,
        "Confusion matrix (TP/FP/FN/TN): {}/{}/{}/{}",
        m.confusion.true_positive,
        m.confusion.false_positive,
        m.confusion.false_negative,
        m.confusion.true_negative
    );
    out.push_str(
        "Note: confusion matrix and training history reflect the first image of the batch.\n",
    );

    out
}

fn survival_statement(mean: f64) -> &'static str {
    if mean >= 70.0 {
        "Composition is dominated by anti-tumor populations; outlook is favorable."
    } else if mean >= 40.0 {
        "Mixed anti- and pro-tumor composition; outlook is intermediate."
    } else {
        "Pro-tumor populations dominate the composition; outlook is poor."
    }
}
