use approx::assert_relative_eq;
use figure_rs::api::{Figure, FigureOptions, MarginPolicy, MarginValues, RenderContext};
use figure_rs::core::{AxisLayout, Margin};
use figure_rs::error::FigureError;

#[test]
fn interactive_deltas_accumulate_per_call() {
    let policy = MarginPolicy::default();
    let mut figure = Figure::new(FigureOptions::default()).expect("figure");

    policy.apply(&mut figure, RenderContext::interactive());
    assert_eq!(
        figure.layout().margin,
        Margin::fixed(90.0, 100.0, 80.0, 40.0, 10.0)
    );

    policy.apply(&mut figure, RenderContext::interactive());
    assert_eq!(
        figure.layout().margin,
        Margin::fixed(180.0, 200.0, 160.0, 80.0, 20.0)
    );
}

#[test]
fn interactive_deltas_keep_autoexpand() {
    let policy = MarginPolicy::default();
    let mut figure = Figure::new(FigureOptions::default()).expect("figure");
    figure.set_margin(Margin {
        autoexpand: Some(true),
        ..Margin::fixed(0.0, 0.0, 0.0, 0.0, 0.0)
    });

    policy.apply(&mut figure, RenderContext::interactive());
    let margin = figure.layout().margin;
    assert_eq!(margin.r, Some(100.0));
    assert_eq!(margin.autoexpand, Some(true));
}

#[test]
fn secondary_y_uses_narrow_right_delta() {
    let policy = MarginPolicy::default();
    let mut figure = Figure::new(FigureOptions::default()).expect("figure");
    figure.add_secondary_y_axis(AxisLayout::titled("Volume"));

    policy.apply(&mut figure, RenderContext::interactive());
    assert_eq!(
        figure.layout().margin,
        Margin::fixed(90.0, 40.0, 80.0, 40.0, 10.0)
    );
}

#[test]
fn export_margins_are_idempotent() {
    let policy = MarginPolicy::default();
    let mut figure = Figure::new(FigureOptions::default()).expect("figure");
    figure.set_margin(Margin::fixed(5.0, 5.0, 5.0, 5.0, 5.0));

    policy.apply(&mut figure, RenderContext::export());
    let once = figure.layout().margin;
    policy.apply(&mut figure, RenderContext::export());

    assert_eq!(once, Margin::fixed(40.0, 40.0, 50.0, 50.0, 10.0));
    assert_eq!(figure.layout().margin, once);
}

#[test]
fn legend_gap_follows_layout_height() {
    let policy = MarginPolicy::default();

    let mut unsized_figure = Figure::new(FigureOptions::default()).expect("figure");
    policy.apply(&mut unsized_figure, RenderContext::export());
    let gap = unsized_figure
        .layout()
        .legend
        .trace_group_gap
        .expect("gap");
    assert_relative_eq!(gap, 600.0 / 4.5, epsilon = 1e-9);

    let mut sized = Figure::new(FigureOptions::default().with_size(1400.0, 900.0))
        .expect("figure");
    policy.apply(&mut sized, RenderContext::interactive());
    let gap = sized.layout().legend.trace_group_gap.expect("gap");
    assert_relative_eq!(gap, 200.0, epsilon = 1e-9);
}

#[test]
fn custom_policy_values_are_used() {
    let policy = MarginPolicy {
        export_margin: MarginValues::new(1.0, 2.0, 3.0, 4.0, 0.0),
        default_height: 450.0,
        ..MarginPolicy::default()
    }
    .validate()
    .expect("valid policy");
    let mut figure = Figure::new(FigureOptions::default()).expect("figure");

    policy.apply(&mut figure, RenderContext::export());
    assert_eq!(figure.layout().margin, Margin::fixed(1.0, 2.0, 3.0, 4.0, 0.0));
    assert_relative_eq!(
        figure.layout().legend.trace_group_gap.expect("gap"),
        100.0,
        epsilon = 1e-9
    );
}

#[test]
fn invalid_policy_values_are_rejected() {
    let negative = MarginPolicy {
        interactive_delta: MarginValues::new(-1.0, 0.0, 0.0, 0.0, 0.0),
        ..MarginPolicy::default()
    };
    assert!(matches!(
        negative.validate(),
        Err(FigureError::InvalidConfig(_))
    ));

    let zero_divisor = MarginPolicy {
        legend_gap_divisor: 0.0,
        ..MarginPolicy::default()
    };
    assert!(zero_divisor.validate().is_err());
}

#[test]
fn policy_parses_partial_json_over_defaults() {
    let policy: MarginPolicy =
        serde_json::from_str(r#"{"default_height": 800.0}"#).expect("policy json");
    assert_eq!(policy.default_height, 800.0);
    assert_eq!(policy.export_margin, MarginPolicy::default().export_margin);
}
