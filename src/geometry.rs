use log::warn;

/// Outer pixel size of the whole chart, including axis labels.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Default for Size {
    fn default() -> Self {
        Self {
            width: 460.0,
            height: 140.0,
        }
    }
}

/// Margins reserved around the data plot area. These bound the rendered
/// data, they are NOT the margins of the whole chart.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 10.0,
            right: 30.0,
            bottom: 30.0,
            left: 60.0,
        }
    }
}

/// The usable plot rectangle once margins are subtracted: origin offset
/// within the outer chart plus the inner width/height every component
/// scales against. Stateless after construction.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PlotFrame {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl PlotFrame {
    pub fn new(size: Size, margin: Margin) -> Self {
        let width = size.width - margin.left - margin.right;
        let height = size.height - margin.top - margin.bottom;

        if width < 0.0 || height < 0.0 {
            warn!(
                "Margins exceed chart size ({}x{}), clamping plot area to zero",
                size.width, size.height
            );
        }

        Self {
            left: margin.left,
            top: margin.top,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Plot rectangle in screen coordinates, given where the outer chart
    /// was placed.
    pub fn rect_in(&self, outer: egui::Rect) -> egui::Rect {
        egui::Rect::from_min_size(
            outer.min + egui::vec2(self.left, self.top),
            egui::vec2(self.width, self.height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_frame_subtracts_margins() {
        let frame = PlotFrame::new(
            Size {
                width: 460.0,
                height: 140.0,
            },
            Margin::default(),
        );
        assert_eq!(frame.width, 370.0);
        assert_eq!(frame.height, 100.0);
        assert_eq!(frame.left, 60.0);
        assert_eq!(frame.top, 10.0);
    }

    #[test]
    fn oversized_margins_clamp_to_zero() {
        let frame = PlotFrame::new(
            Size {
                width: 20.0,
                height: 20.0,
            },
            Margin {
                top: 50.0,
                right: 50.0,
                bottom: 50.0,
                left: 50.0,
            },
        );
        assert_eq!(frame.width, 0.0);
        assert_eq!(frame.height, 0.0);
    }
}
