mod bootstrap;

use std::path::Path;

use anyhow::{Context, Result};
use kovaak_core::rosters::RosterKind;
use kovaak_core::settings::{describe_source, Command, OutputFormat, Settings};
use kovaak_data::analysis::{LoadMode, ScenarioIndex};
use kovaak_report::chart::render_scenario_chart;
use kovaak_report::table_view::{render_scenario_list, BenchmarkReport, ReportStyle};
use tracing::{debug, info, warn};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;
    info!("kovaak-stats v{} starting", env!("CARGO_PKG_VERSION"));

    let stats_dir = settings.resolve_stats_dir()?;
    debug!(
        "Stats directory {} (from {})",
        stats_dir.display(),
        describe_source(settings.statsdir_source)
    );

    // Chart output is checked before any file is read.
    let img_dir = match &settings.command {
        Command::Charts(args) => {
            let img_dir = args.resolve_img_dir()?;
            debug!(
                "Image directory {} (from {})",
                img_dir.display(),
                describe_source(settings.imgdir_source)
            );
            Some(img_dir)
        }
        _ => None,
    };

    let index = ScenarioIndex::scan(&stats_dir)?;
    debug!(
        "{} stat files under {}",
        index.file_count(),
        index.root().display()
    );

    match &settings.command {
        Command::Charts(_) => {
            if let Some(img_dir) = img_dir {
                run_charts(&index, &img_dir)?;
            }
        }
        Command::Sparky(args) => run_report(
            RosterKind::Sparky,
            &index,
            ReportStyle::RecentScores,
            args.format,
        )?,
        Command::Voltaic(args) => run_report(
            RosterKind::Voltaic,
            &index,
            ReportStyle::RecentAverage { runs: args.avg },
            args.report.format,
        )?,
        Command::Scenarios => print!("{}", render_scenario_list(&index)),
    }

    Ok(())
}

/// Draw one chart per scenario, skipping files that fail to parse.
fn run_charts(index: &ScenarioIndex, img_dir: &Path) -> Result<()> {
    bootstrap::ensure_img_dir(img_dir)
        .with_context(|| format!("creating image directory {}", img_dir.display()))?;

    for scenario in index.scenarios() {
        let sessions = index.load(scenario, LoadMode::Lenient)?;
        if sessions.is_empty() {
            warn!("No readable sessions for {}; no chart drawn", scenario);
            continue;
        }
        let path = render_scenario_chart(scenario, &sessions, img_dir)
            .with_context(|| format!("drawing chart for {scenario}"))?;
        println!("Saved {}", path.display());
    }
    Ok(())
}

fn run_report(
    kind: RosterKind,
    index: &ScenarioIndex,
    style: ReportStyle,
    format: OutputFormat,
) -> Result<()> {
    let roster = kind.roster();
    info!("Building {} report over {} scenarios", roster.name, roster.len());

    let report = BenchmarkReport::build(roster, index, style)?;
    match format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", report.render_json()?),
    }
    Ok(())
}
