//! Delimited and JSON export.

use crate::render::{format_rsd, latex_escape};
use crate::report::Report;
use crate::tables::{RuntimeRow, SpeedupRow, SummaryRow};

/// Options for the delimited exports.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Field delimiter. `;` by default so it never clashes with numeric
    /// formatting or the commas inside passthrough command lines.
    pub delimiter: u8,
    /// Escape instance keys for LaTeX inclusion.
    pub latex_instances: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            latex_instances: false,
        }
    }
}

impl ExportOptions {
    fn instance(&self, key: &str) -> String {
        if self.latex_instances {
            latex_escape(key)
        } else {
            key.to_string()
        }
    }
}

fn writer(opts: &ExportOptions) -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .delimiter(opts.delimiter)
        .from_writer(Vec::new())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> String {
    // In-memory writers cannot fail on flush.
    String::from_utf8(writer.into_inner().expect("in-memory csv writer"))
        .expect("csv output is utf-8")
}

/// Render the summary table as delimited text.
///
/// One row per instance with the baseline average runtime, its RSD, one
/// speedup column per non-baseline variant, and the passthrough metadata.
/// Numbers are rounded to 2 decimals here and only here.
pub fn summary_csv(rows: &[SummaryRow], variants: &[String], opts: &ExportOptions) -> String {
    let mut w = writer(opts);

    let mut header = vec!["instance".to_string(), "avg_runtime".to_string(), "rsd".to_string()];
    header.extend(variants.iter().map(|v| format!("speedup_{v}")));
    header.extend(
        ["status", "nodes", "omega", "clique", "commandline", "started_at"]
            .iter()
            .map(|s| s.to_string()),
    );
    w.write_record(&header).expect("in-memory csv writer");

    for row in rows {
        let mut fields = vec![
            opts.instance(&row.instance),
            format!("{:.2}", row.avg_runtime_ms),
            format_rsd(row.rsd),
        ];
        for variant in variants {
            let cell = match row.speedups.get(variant) {
                Some(value) => value.to_string(),
                None => "undefined".to_string(),
            };
            fields.push(cell);
        }
        fields.push(row.meta.status.clone());
        fields.push(row.meta.nodes.clone());
        fields.push(row.meta.omega.clone());
        fields.push(row.meta.clique_size.clone());
        fields.push(row.meta.commandline.clone());
        fields.push(row.meta.started_at.clone());
        w.write_record(&fields).expect("in-memory csv writer");
    }

    finish(w)
}

/// Render the long-form runtime view as delimited text.
pub fn runtime_csv(rows: &[RuntimeRow], opts: &ExportOptions) -> String {
    let mut w = writer(opts);
    w.write_record(["instance", "variant", "repetition", "runtime"])
        .expect("in-memory csv writer");
    for row in rows {
        w.write_record(&[
            opts.instance(&row.instance),
            row.variant.clone(),
            row.repetition.to_string(),
            format!("{:.2}", row.runtime_ms),
        ])
        .expect("in-memory csv writer");
    }
    finish(w)
}

/// Render the long-form speedup view as delimited text.
pub fn speedup_csv(rows: &[SpeedupRow], opts: &ExportOptions) -> String {
    let mut w = writer(opts);
    w.write_record(["instance", "variant", "speedup"])
        .expect("in-memory csv writer");
    for row in rows {
        w.write_record(&[
            opts.instance(&row.instance),
            row.variant.clone(),
            row.speedup.to_string(),
        ])
        .expect("in-memory csv writer");
    }
    finish(w)
}

/// Generate a prettified JSON report.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
