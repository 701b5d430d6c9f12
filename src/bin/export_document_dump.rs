use figure_rs::api::{
    Figure, FigureOptions, FinalizeRequest, LegendLabelExtra, RenderConfig, RenderContext,
    SubplotComposer,
};
use figure_rs::core::{
    AxisId, AxisLayout, CellSpec, GridOptions, LineDash, ReferenceLineStyle, Theme, Trace,
};
use figure_rs::error::{FigureError, FigureResult};
use figure_rs::render::NullRenderer;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug)]
struct CliArgs {
    output: Option<PathBuf>,
    command_location: String,
}

fn main() {
    #[cfg(feature = "telemetry")]
    let _ = figure_rs::telemetry::init_default_tracing();

    if let Err(err) = run() {
        eprintln!("export_document_dump: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args(env::args().skip(1))?;
    let config = RenderConfig::from_env().map_err(|e| e.to_string())?;
    let theme = config.load_theme().map_err(|e| e.to_string())?;

    let json = build_document(&args.command_location, theme).map_err(|e| e.to_string())?;
    match args.output {
        Some(path) => fs::write(&path, json)
            .map_err(|e| format!("failed to write {}: {e}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut output = None;
    let mut command_location = "/stocks/candle".to_owned();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--output" => {
                output = Some(PathBuf::from(
                    args.next().ok_or("--output requires a path")?,
                ));
            }
            "--command-location" => {
                command_location = args.next().ok_or("--command-location requires a value")?;
            }
            other => return Err(format!("unknown argument `{other}`")),
        }
    }
    Ok(CliArgs {
        output,
        command_location,
    })
}

/// Two-panel price/volume + RSI figure, finalized in export mode.
fn build_document(command_location: &str, theme: Theme) -> FigureResult<String> {
    let template = Arc::new(theme);
    let composer = SubplotComposer::new(RenderContext::export()).with_template(template.clone());
    let grid = composer.create_grid(
        2,
        1,
        GridOptions::default()
            .with_specs(vec![
                vec![CellSpec::with_secondary_y()],
                vec![CellSpec::default()],
            ])
            .with_row_width(vec![0.3, 0.7]),
    )?;

    let times: Vec<f64> = (0..20_u32).map(|i| 1_704_153_600.0 + f64::from(i) * 86_400.0).collect();
    let closes: Vec<f64> = (0..20_u32).map(|i| 100.0 + f64::from(i % 7) * 1.25).collect();
    let volumes: Vec<f64> = (0..20_u32).map(|i| 1_000.0 + f64::from(i) * 50.0).collect();
    let rsi: Vec<f64> = (0..20_u32).map(|i| 30.0 + f64::from(i) * 2.5).collect();

    let mut price = Figure::with_template(template.clone(), FigureOptions::default())?;
    price.add_trace(Trace::scatter("close").with_points(times.clone(), closes)?)?;
    price.set_yaxis(AxisId::PRIMARY, AxisLayout::titled("Price"));

    let mut volume = Figure::with_template(template.clone(), FigureOptions::default())?;
    volume.add_trace(Trace::bar("volume").with_points(times.clone(), volumes)?)?;

    let mut oscillator = Figure::with_template(template, FigureOptions::default())?;
    oscillator.add_trace(Trace::scatter("rsi").with_points(times, rsi)?)?;

    let figure = composer.merge_into(price, grid, 1, 1, false)?;
    let figure = composer.merge_into(volume, figure, 1, 1, true)?;
    let mut figure = composer.merge_into(oscillator, figure, 2, 1, false)?;
    figure.add_hline_legend(
        70.0,
        "Overbought",
        &ReferenceLineStyle::new("red", LineDash::Dash),
        Some(1.0),
        LegendLabelExtra::default(),
    )?;

    let mut renderer = NullRenderer::default();
    let outcome = RenderContext::export().finalize(
        figure,
        &mut renderer,
        FinalizeRequest::default().with_command_location(command_location),
    )?;
    let document = outcome.into_document().ok_or_else(|| {
        FigureError::InvalidData("export finalize did not return a document".to_owned())
    })?;
    document.to_json_contract_v1_pretty()
}
