use tracing::trace;

use crate::core::{
    Annotation, AxisId, AxisSide, CoordinateRef, Font, Layout, XAnchor, YAnchor,
};

use super::Figure;

pub const BRANDING_TEXT: &str = "OpenBB Terminal";

const OVERLAY_COLOR: &str = "gray";
const OVERLAY_OPACITY: f64 = 0.5;
const COMMAND_LOCATION_FONT_SIZE: f64 = 24.0;
const BRANDING_FONT_SIZE: f64 = 17.0;

/// Horizontal shift for the command-location annotation.
///
/// | primary y side | secondary y overlaying primary | shift |
/// |---|---|---|
/// | right | none | -60 |
/// | left | none | -80 |
/// | any | untitled | -110 |
/// | any | titled | -130 |
#[must_use]
pub fn command_location_xshift(layout: &Layout) -> f64 {
    if let Some((_, secondary)) = layout.secondary_yaxis() {
        return if secondary.title_text().is_some() {
            -130.0
        } else {
            -110.0
        };
    }
    let primary_side = layout
        .yaxes
        .get(&AxisId::PRIMARY)
        .and_then(|axis| axis.side);
    if primary_side == Some(AxisSide::Right) {
        -60.0
    } else {
        -80.0
    }
}

impl Figure {
    /// Adds the command-location (when non-empty) and branding annotations.
    pub fn apply_standard_overlays(&mut self, command_location: Option<&str>) {
        if let Some(location) = command_location.filter(|location| !location.is_empty()) {
            let xshift = command_location_xshift(&self.layout);
            trace!(location, xshift, "add command location overlay");
            self.add_annotation(
                Annotation::new(location)
                    .at(-0.015, 0.5)
                    .with_refs(CoordinateRef::Paper, CoordinateRef::Paper)
                    .with_anchors(XAnchor::Left, YAnchor::Middle)
                    .with_shift(xshift, 0.0)
                    .with_text_angle(-90.0)
                    .with_font(Font::sized(COMMAND_LOCATION_FONT_SIZE, OVERLAY_COLOR))
                    .with_opacity(OVERLAY_OPACITY),
            );
        }

        let yref = if self.is_subplot {
            CoordinateRef::Paper
        } else {
            CoordinateRef::y_domain()
        };
        self.add_annotation(
            Annotation::new(BRANDING_TEXT)
                .at(1.0, 0.0)
                .with_refs(CoordinateRef::x_domain(), yref)
                .with_anchors(XAnchor::Right, YAnchor::Bottom)
                .with_shift(40.0, -80.0)
                .with_font(Font::sized(BRANDING_FONT_SIZE, OVERLAY_COLOR))
                .with_opacity(OVERLAY_OPACITY),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::command_location_xshift;
    use crate::core::{AxisId, AxisLayout, AxisSide, Layout};

    fn layout_with(primary: AxisLayout, secondary: Option<AxisLayout>) -> Layout {
        let mut layout = Layout::default();
        layout.yaxes.insert(AxisId::PRIMARY, primary);
        if let Some(secondary) = secondary {
            layout.yaxes.insert(AxisId::new(2), secondary);
        }
        layout
    }

    #[test]
    fn xshift_table_is_exact() {
        let right = AxisLayout::default().with_side(AxisSide::Right);
        let left = AxisLayout::default().with_side(AxisSide::Left);
        let untitled = AxisLayout::default().with_overlaying(AxisId::PRIMARY);
        let titled = AxisLayout::titled("Volume").with_overlaying(AxisId::PRIMARY);

        assert_eq!(command_location_xshift(&layout_with(right.clone(), None)), -60.0);
        assert_eq!(command_location_xshift(&layout_with(left.clone(), None)), -80.0);
        assert_eq!(
            command_location_xshift(&layout_with(right, Some(untitled))),
            -110.0
        );
        assert_eq!(
            command_location_xshift(&layout_with(left, Some(titled))),
            -130.0
        );
    }

    #[test]
    fn unset_side_counts_as_left() {
        assert_eq!(command_location_xshift(&Layout::default()), -80.0);
    }

    #[test]
    fn non_overlaying_second_axis_is_not_secondary() {
        let layout = layout_with(
            AxisLayout::default().with_side(AxisSide::Right),
            Some(AxisLayout::titled("Other panel")),
        );
        assert_eq!(command_location_xshift(&layout), -60.0);
    }
}
