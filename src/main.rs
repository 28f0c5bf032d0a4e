use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;
use production_dashboard::app::DashboardApp;
use production_dashboard::chart::ChartBuilder;
use production_dashboard::config::Cli;
use production_dashboard::data::loader::load_table;
use production_dashboard::data::model::ProductionTable;
use production_dashboard::state::AppState;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let builder = ChartBuilder::new(cli.locale.labels());
    let load_options = cli.load_options()?;

    // Preparation runs once; the table is read-only afterwards.
    let table = match &cli.data {
        Some(path) => Some(
            load_table(path, &load_options)
                .with_context(|| format!("loading {}", path.display()))?,
        ),
        None => None,
    };

    if let Some(target) = &cli.export {
        let table = table.context("--export needs --data")?;
        return export_chart(&builder, &table, &cli, target);
    }

    let mut state = AppState {
        criteria: cli.criteria(),
        builder,
        load_options,
        ..AppState::default()
    };
    if let Some(table) = table {
        state.set_table(table);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &builder.labels().heading,
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("UI error: {e}"))
}

/// Headless mode: build the chart for the command-line selection and write
/// it as JSON.
fn export_chart(
    builder: &ChartBuilder,
    table: &ProductionTable,
    cli: &Cli,
    target: &Path,
) -> Result<()> {
    let chart = builder.build(table.records(), &cli.criteria())?;
    let json = serde_json::to_string_pretty(&chart).context("serializing chart")?;
    if target == Path::new("-") {
        writeln!(std::io::stdout().lock(), "{json}").context("writing chart to stdout")?;
    } else {
        std::fs::write(target, json)
            .with_context(|| format!("writing chart to {}", target.display()))?;
        log::info!("Chart written to {}", target.display());
    }
    Ok(())
}
