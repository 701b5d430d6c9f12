use figure_rs::api::{Figure, FigureOptions, RenderContext, SubplotComposer};
use figure_rs::core::{AxisId, AxisLayout, CellSpec, GridOptions, Margin, Trace};
use figure_rs::error::FigureError;

fn panel(name: &str) -> Figure {
    let mut figure = Figure::new(FigureOptions::default()).expect("panel");
    figure
        .add_trace(
            Trace::scatter(name)
                .with_points(vec![1.0, 2.0], vec![3.0, 4.0])
                .expect("points"),
        )
        .expect("trace");
    figure
}

#[test]
fn create_grid_flags_subplot_and_layout() {
    let composer = SubplotComposer::new(RenderContext::export());
    let figure = composer
        .create_grid(2, 1, GridOptions::default())
        .expect("grid");

    assert!(figure.is_subplot());
    assert!(!figure.has_secondary_y());
    let grid = figure.grid().expect("grid state");
    assert_eq!((grid.rows(), grid.cols()), (2, 1));
    assert_eq!(figure.layout().xaxes.len(), 2);
    assert_eq!(figure.layout().yaxes.len(), 2);
}

#[test]
fn create_grid_with_secondary_spec_sets_flag() {
    let composer = SubplotComposer::new(RenderContext::export());
    let options = GridOptions::default().with_specs(vec![
        vec![CellSpec::with_secondary_y()],
        vec![CellSpec::default()],
    ]);
    let figure = composer.create_grid(2, 1, options).expect("grid");

    assert!(figure.has_secondary_y());
    assert!(figure.layout().has_overlaying_yaxis());
}

#[test]
fn create_grid_rejects_zero_rows() {
    let composer = SubplotComposer::new(RenderContext::export());
    let err = composer
        .create_grid(0, 1, GridOptions::default())
        .expect_err("zero rows");
    assert!(matches!(err, FigureError::InvalidGridSpec { rows: 0, cols: 1 }));
}

#[test]
fn shared_xaxes_link_upper_rows_to_bottom_row() {
    let composer = SubplotComposer::new(RenderContext::export());
    let figure = composer
        .create_grid(3, 1, GridOptions::default())
        .expect("grid");

    let xaxes = &figure.layout().xaxes;
    assert_eq!(xaxes[&AxisId::new(1)].matches, Some(AxisId::new(3)));
    assert_eq!(xaxes[&AxisId::new(2)].matches, Some(AxisId::new(3)));
    assert_eq!(xaxes[&AxisId::new(3)].matches, None);
}

#[test]
fn row_width_controls_relative_heights_from_bottom() {
    let composer = SubplotComposer::new(RenderContext::export());
    let options = GridOptions::default()
        .with_row_width(vec![0.25, 0.75])
        .with_vertical_spacing(0.0);
    let figure = composer.create_grid(2, 1, options).expect("grid");

    let yaxes = &figure.layout().yaxes;
    let top = yaxes[&AxisId::new(1)].domain.expect("top domain");
    let bottom = yaxes[&AxisId::new(2)].domain.expect("bottom domain");
    assert!((top[1] - top[0] - 0.75).abs() <= 1e-12);
    assert!((bottom[1] - bottom[0] - 0.25).abs() <= 1e-12);
}

#[test]
fn subplot_titles_become_paper_annotations() {
    let composer = SubplotComposer::new(RenderContext::export());
    let options = GridOptions::default().with_subplot_titles(["Price", "Volume"]);
    let figure = composer.create_grid(2, 1, options).expect("grid");

    let texts: Vec<&str> = figure
        .layout()
        .annotations
        .iter()
        .map(|annotation| annotation.text.as_str())
        .collect();
    assert_eq!(texts, vec!["Price", "Volume"]);
}

#[test]
fn merge_routes_traces_and_tags_legend_group() {
    let composer = SubplotComposer::new(RenderContext::export());
    let target = composer
        .create_grid(2, 1, GridOptions::default())
        .expect("grid");

    let merged = composer
        .merge_into(panel("volume"), target, 2, 1, false)
        .expect("merge");

    let trace = merged.find_trace("volume").expect("merged trace");
    assert_eq!(trace.xaxis, AxisId::new(2));
    assert_eq!(trace.yaxis, AxisId::new(2));
    assert_eq!(trace.legend_group.as_deref(), Some("2"));
}

#[test]
fn merge_transplants_only_row_and_col_axis_fragments() {
    let composer = SubplotComposer::new(RenderContext::export());
    let target = composer
        .create_grid(2, 3, GridOptions::default())
        .expect("grid");
    let untouched_x1 = target.layout().xaxes[&AxisId::new(1)].clone();
    let untouched_y3 = target.layout().yaxes[&AxisId::new(3)].clone();

    let mut source = panel("rsi");
    source.set_xaxis(AxisId::new(3), AxisLayout::titled("source x3"));
    source.set_yaxis(AxisId::new(2), AxisLayout::titled("source y2"));
    source.set_yaxis(AxisId::new(3), AxisLayout::titled("source y3"));

    let merged = composer
        .merge_into(source, target, 2, 3, false)
        .expect("merge");

    let layout = merged.layout();
    assert_eq!(layout.xaxes[&AxisId::new(3)].title_text(), Some("source x3"));
    assert_eq!(layout.yaxes[&AxisId::new(2)].title_text(), Some("source y2"));
    assert_eq!(layout.xaxes[&AxisId::new(1)], untouched_x1);
    assert_eq!(layout.yaxes[&AxisId::new(3)], untouched_y3);
}

#[test]
fn merge_without_matching_source_axes_keeps_target_axes() {
    let composer = SubplotComposer::new(RenderContext::export());
    let target = composer
        .create_grid(2, 1, GridOptions::default())
        .expect("grid");
    let before = target.layout().yaxes.clone();

    let merged = composer
        .merge_into(panel("close"), target, 2, 1, false)
        .expect("merge");
    assert_eq!(merged.layout().yaxes, before);
}

#[test]
fn export_merge_tightens_margins() {
    let composer = SubplotComposer::new(RenderContext::export());
    let target = composer
        .create_grid(2, 1, GridOptions::default())
        .expect("grid");

    let merged = composer
        .merge_into(panel("close"), target, 1, 1, false)
        .expect("merge");
    assert_eq!(
        merged.layout().margin,
        Margin::fixed(30.0, 30.0, 50.0, 50.0, 0.0)
    );
}

#[test]
fn interactive_merge_keeps_margins() {
    let composer = SubplotComposer::new(RenderContext::interactive());
    let target = composer
        .create_grid(2, 1, GridOptions::default())
        .expect("grid");

    let merged = composer
        .merge_into(panel("close"), target, 1, 1, false)
        .expect("merge");
    assert_eq!(merged.layout().margin, Margin::default());
}

#[test]
fn merge_into_secondary_axis_routes_to_overlay() {
    let composer = SubplotComposer::new(RenderContext::export());
    let options = GridOptions::default().with_specs(vec![
        vec![CellSpec::with_secondary_y()],
        vec![CellSpec::default()],
    ]);
    let target = composer.create_grid(2, 1, options).expect("grid");

    let merged = composer
        .merge_into(panel("volume"), target, 1, 1, true)
        .expect("merge");
    assert_eq!(
        merged.find_trace("volume").map(|trace| trace.yaxis),
        Some(AxisId::new(2))
    );
}

#[test]
fn merge_errors_for_missing_secondary_axis_and_bad_cells() {
    let composer = SubplotComposer::new(RenderContext::export());

    let target = composer
        .create_grid(2, 1, GridOptions::default())
        .expect("grid");
    let err = composer
        .merge_into(panel("volume"), target, 1, 1, true)
        .expect_err("no secondary axis");
    assert!(matches!(
        err,
        FigureError::SecondaryAxisUnavailable { row: 1, col: 1 }
    ));

    let target = composer
        .create_grid(2, 1, GridOptions::default())
        .expect("grid");
    let err = composer
        .merge_into(panel("volume"), target, 3, 1, false)
        .expect_err("row out of range");
    assert!(matches!(err, FigureError::CellOutOfRange { row: 3, .. }));

    let plain = Figure::new(FigureOptions::default()).expect("plain");
    let err = composer
        .merge_into(panel("volume"), plain, 1, 1, false)
        .expect_err("not a grid");
    assert!(matches!(err, FigureError::NotAGrid));
}
