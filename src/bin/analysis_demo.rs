use dermatoglyph::config::{load_config, OutputFormat, RuntimeConfig};
use dermatoglyph::diagnostics::AnalysisReport;
use dermatoglyph::image::io::{
    load_grayscale_image, save_binary, save_grayscale_f32, write_json_file, GrayImageU8,
};
use dermatoglyph::{AnalysisInput, FingerprintAnalyzer};
use std::env;
use std::path::{Path, PathBuf};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "analysis_demo".to_string());
    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or_else(|| format!("Usage: {program} <config.json>"))?;
    let config = load_config(&config_path)?;

    let gray = load_grayscale_image(&config.input_path)?;
    let analyzer = FingerprintAnalyzer::new(config.params.clone());
    let input = AnalysisInput {
        variant: config.variant,
        hand: config.hand,
        count_ridges: true,
    };
    let report = analyzer
        .analyze_with_diagnostics(gray.as_view(), input)
        .map_err(|e| format!("{}: {e}", e.kind()))?;

    let format = config.output.format;
    if format.includes_text() {
        print_text_summary(&report);
    }

    if format.includes_json() {
        if let Some(path) = &config.output.json_out {
            write_json_file(path, &report)?;
            println!("JSON report written to {}", path.display());
        } else {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
            if format == OutputFormat::Both {
                println!("\nJSON report:\n{json}");
            } else {
                println!("{json}");
            }
        }
    }

    if let Some(dir) = &config.output.debug_dir {
        save_debug_artifacts(dir, &gray, &report, &analyzer, &config)?;
        eprintln!("Debug artifacts written to {}", dir.display());
    }

    Ok(())
}

fn print_text_summary(report: &AnalysisReport) {
    let res = &report.result;
    println!("Analysis summary");
    println!("  pattern: {}{}", res.pattern_type, if res.fallback { " (fallback)" } else { "" });
    for (label, points) in [("core", &res.cores), ("delta", &res.deltas)] {
        for p in points {
            println!(
                "  {label}: ({:.1}, {:.1}) winding={:.3}",
                p.point.x, p.point.y, p.winding
            );
        }
    }
    match res.ridge_count {
        Some(rc) => println!("  ridge_count: {rc}"),
        None => println!("  ridge_count: -"),
    }
    println!("  latency_ms: {:.3}", res.latency_ms);
    println!();
    for line in report.trace.summary_lines() {
        println!("{line}");
    }
}

fn save_debug_artifacts(
    dir: &Path,
    gray: &GrayImageU8,
    report: &AnalysisReport,
    analyzer: &FingerprintAnalyzer,
    config: &RuntimeConfig,
) -> Result<(), String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create debug dir {}: {e}", dir.display()))?;

    write_json_file(&dir.join("analysis_report.json"), report)?;
    write_json_file(&dir.join("params.json"), analyzer.params())?;

    let prepared = analyzer
        .prepare(gray.as_view(), config.variant)
        .map_err(|e| e.to_string())?;
    save_grayscale_f32(&prepared.normalized, &dir.join("normalized.png"))?;
    save_binary(&prepared.binary, &dir.join("binary.png"))?;
    save_binary(&prepared.skeleton, &dir.join("skeleton.png"))?;

    let field = dermatoglyph::orientation::estimate_orientation(
        &prepared.normalized,
        &analyzer.params().orientation,
    );
    write_json_file(&dir.join("orientation_field.json"), &field)?;
    Ok(())
}
