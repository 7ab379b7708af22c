use crate::render::fonts::FONT_FAMILY;
use crate::render::layout::{BrokenAxisLayout, Panel, Segment, Spine};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);
const LABEL_AREA: u32 = 80;
const TICK_LENGTH: i32 = 6;
const LABEL_SIZE: f64 = 14.0;
const TITLE_SIZE: f64 = 20.0;

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// Draws the whole broken-axis chart onto `root`.
pub fn draw_broken_axis<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    layout: &BrokenAxisLayout,
    title: &str,
) -> DrawResult<DB> {
    root.fill(&WHITE)?;

    draw_panel(root, layout, &layout.upper)?;
    draw_panel(root, layout, &layout.lower)?;
    draw_category_labels(root, layout)?;

    if !title.is_empty() {
        let rect = layout.upper.rect;
        let style = TextStyle::from((FONT_FAMILY, TITLE_SIZE).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        root.draw(&Text::new(
            title.to_string(),
            (px((rect.left + rect.right) / 2.0), px(rect.top) - 8),
            style,
        ))?;
    }

    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    layout: &BrokenAxisLayout,
    panel: &Panel,
) -> DrawResult<DB> {
    let rect = panel.rect;
    let left = px(rect.left);
    let top = px(rect.top);
    let width = (px(rect.right) - left).max(1) as u32;
    let height = (px(rect.bottom) - top).max(1) as u32;

    // The y labels live in the margin to the left of the panel.
    let label_area = LABEL_AREA.min(left.max(0) as u32);
    let area = root
        .clone()
        .shrink((left - label_area as i32, top), (width + label_area, height));

    let (x_lo, x_hi) = layout.x_range;
    let range = panel.y_range;
    let mut chart = ChartBuilder::on(&area)
        .set_label_area_size(LabelAreaPosition::Left, label_area)
        .build_cartesian_2d(x_lo..x_hi, range.min..range.max)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(6)
        .y_label_formatter(&|v| format!("{:.0}", v))
        .y_label_style((FONT_FAMILY, LABEL_SIZE).into_font().color(&BLACK))
        .axis_style(BLACK)
        .draw()?;

    chart.draw_series(panel.bars.iter().map(|bar| {
        Rectangle::new([(bar.x0, bar.y0), (bar.x1, bar.y1)], BAR_COLOR.filled())
    }))?;

    for spine in [Spine::Top, Spine::Bottom, Spine::Left, Spine::Right] {
        if panel.has_spine(spine) {
            draw_segment(root, panel.spine_segment(spine))?;
        }
    }
    for mark in &panel.break_marks {
        draw_segment(root, *mark)?;
    }

    Ok(())
}

fn draw_category_labels<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    layout: &BrokenAxisLayout,
) -> DrawResult<DB> {
    let bottom = px(layout.lower.rect.bottom);
    let style = TextStyle::from((FONT_FAMILY, LABEL_SIZE).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));

    for (index, label) in layout.labels.iter().enumerate() {
        let x = px(layout.category_x(index));
        root.draw(&PathElement::new(
            vec![(x, bottom), (x, bottom + TICK_LENGTH)],
            BLACK,
        ))?;
        root.draw(&Text::new(
            label.clone(),
            (x, bottom + TICK_LENGTH + 2),
            style.clone(),
        ))?;
    }

    Ok(())
}

fn draw_segment<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    ((x0, y0), (x1, y1)): Segment,
) -> DrawResult<DB> {
    root.draw(&PathElement::new(
        vec![(px(x0), px(y0)), (px(x1), px(y1))],
        BLACK,
    ))
}

fn px(value: f64) -> i32 {
    value.round() as i32
}
