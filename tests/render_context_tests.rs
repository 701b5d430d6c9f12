use figure_rs::api::{
    BRANDING_TEXT, FinalizeOutcome, FinalizeRequest, Figure, FigureOptions, RenderConfig,
    RenderContext, RenderMode,
};
use figure_rs::core::{Margin, Theme, Trace};
use figure_rs::render::{DisplayOptions, ImageFormat, NullRenderer};
use std::sync::Arc;

fn sample_figure() -> Figure {
    let mut figure = Figure::new(FigureOptions::default()).expect("figure");
    figure
        .add_trace(
            Trace::scatter("close")
                .with_points(vec![1.0, 2.0, 3.0], vec![10.0, 12.0, 11.0])
                .expect("points"),
        )
        .expect("trace");
    figure
}

#[test]
fn export_flag_overrides_interactive_surface() {
    assert_eq!(RenderContext::resolve(&true, true).mode(), RenderMode::Export);
    assert_eq!(
        RenderContext::resolve(&true, false).mode(),
        RenderMode::Interactive
    );
    assert_eq!(RenderContext::resolve(&false, false).mode(), RenderMode::Export);
}

#[test]
fn config_export_mode_selects_export() {
    let config = RenderConfig::default().with_export_mode(true);
    assert!(RenderContext::from_config(&true, &config).is_export());
}

#[test]
fn export_finalize_returns_document_without_display() {
    let mut renderer = NullRenderer::default();
    let outcome = RenderContext::export()
        .finalize(sample_figure(), &mut renderer, FinalizeRequest::default())
        .expect("finalize");

    let document = outcome.into_document().expect("export document");
    assert_eq!(renderer.show_count, 0);
    assert_eq!(document.data.len(), 1);
    assert_eq!(
        document.layout.margin,
        Margin::fixed(40.0, 40.0, 50.0, 50.0, 10.0)
    );
    assert!(
        document
            .layout
            .annotations
            .iter()
            .any(|annotation| annotation.text == BRANDING_TEXT)
    );
}

#[test]
fn interactive_finalize_hands_off_with_fixed_display_settings() {
    let mut renderer = NullRenderer::default();
    let request = FinalizeRequest::default()
        .with_command_location("/stocks/load")
        .with_display(DisplayOptions {
            image_format: Some(ImageFormat::Png),
            ..DisplayOptions::default()
        });

    let outcome = RenderContext::interactive()
        .finalize(sample_figure(), &mut renderer, request)
        .expect("finalize");

    let FinalizeOutcome::Displayed(config) = outcome else {
        panic!("interactive finalize must display");
    };
    assert!(config.scroll_zoom);
    assert!(!config.display_logo);
    assert_eq!(config.image_format, Some(ImageFormat::Png));
    assert_eq!(renderer.show_count, 1);
    assert_eq!(renderer.last_trace_count, 1);
    assert_eq!(renderer.last_annotation_count, 2);
    assert_eq!(renderer.last_config, Some(config));
}

#[test]
fn dark_style_applies_dark_modebar() {
    let mut renderer = NullRenderer::default();
    let mut figure = sample_figure();
    figure.set_map_style("dark");

    let document = RenderContext::export()
        .finalize(figure, &mut renderer, FinalizeRequest::default())
        .expect("finalize")
        .into_document()
        .expect("document");

    let modebar = document.layout.modebar.expect("modebar");
    assert_eq!(modebar.bg_color, "#2A2A2A");
    assert_eq!(modebar.color, "#FFFFFF");
    assert_eq!(modebar.active_color, "#d1030d");
    assert_eq!(document.layout.new_shape_line_color.as_deref(), Some("gold"));
}

#[test]
fn light_style_leaves_modebar_unset() {
    let mut renderer = NullRenderer::default();
    let light = Arc::new(Theme::builtin("light").expect("light theme"));
    let figure = Figure::with_template(light, FigureOptions::default()).expect("figure");

    let document = RenderContext::export()
        .finalize(figure, &mut renderer, FinalizeRequest::default())
        .expect("finalize")
        .into_document()
        .expect("document");
    assert!(document.layout.modebar.is_none());
    assert!(document.layout.new_shape_line_color.is_none());
}

#[test]
fn dark_template_without_layout_style_applies_modebar() {
    let mut renderer = NullRenderer::default();
    let dark = Arc::new(Theme::builtin("dark").expect("dark theme"));
    let figure = Figure::with_template(dark, FigureOptions::default()).expect("figure");

    let document = RenderContext::export()
        .finalize(figure, &mut renderer, FinalizeRequest::default())
        .expect("finalize")
        .into_document()
        .expect("document");
    assert!(document.layout.modebar.is_some());
}

#[test]
fn layout_style_overrides_dark_template() {
    let mut renderer = NullRenderer::default();
    let dark = Arc::new(Theme::builtin("dark").expect("dark theme"));
    let mut figure = Figure::with_template(dark, FigureOptions::default()).expect("figure");
    figure.set_map_style("light");

    let document = RenderContext::export()
        .finalize(figure, &mut renderer, FinalizeRequest::default())
        .expect("finalize")
        .into_document()
        .expect("document");
    assert!(document.layout.modebar.is_none());
}

#[test]
fn invalid_margin_policy_fails_before_display() {
    let mut renderer = NullRenderer::default();
    let request = FinalizeRequest::default().with_margin_policy(figure_rs::api::MarginPolicy {
        legend_gap_divisor: -1.0,
        ..figure_rs::api::MarginPolicy::default()
    });

    let result = RenderContext::interactive().finalize(sample_figure(), &mut renderer, request);
    assert!(result.is_err());
    assert_eq!(renderer.show_count, 0);
}
