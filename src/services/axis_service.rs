use crate::models::scale::format_time_tick;
use crate::models::Scales;
use crate::utils::format::{format_grouped, format_number};
use crate::utils::{ChartLayout, Element};

/// Ticks requested from each scale
pub const TICK_COUNT: usize = 10;
const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
/// Half-pixel shift so 1px lines land on pixel centres
const CRISP_OFFSET: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orient {
    Bottom,
    Left,
}

/// Bottom (`#x-axis`) and left (`#y-axis`) axis groups. Pure: same scales, same markup.
pub fn render_axes(scales: &Scales, layout: &ChartLayout) -> (Element, Element) {
    let x_ticks = scales
        .x
        .ticks(TICK_COUNT)
        .into_iter()
        .map(|date| (scales.x.apply(date), format_time_tick(date)))
        .collect::<Vec<_>>();

    let precision = scales.y.tick_precision(TICK_COUNT);
    let y_ticks = scales
        .y
        .ticks(TICK_COUNT)
        .into_iter()
        .map(|value| (scales.y.apply(value), format_grouped(value, precision)))
        .collect::<Vec<_>>();

    let x_axis = axis(Orient::Bottom, scales.x.range(), &x_ticks)
        .attr("id", "x-axis")
        .attr(
            "transform",
            format!("translate(0, {})", format_number(layout.height - layout.padding)),
        );
    let y_axis = axis(Orient::Left, scales.y.range(), &y_ticks)
        .attr("id", "y-axis")
        .attr("transform", format!("translate({}, 0)", format_number(layout.padding)));

    (x_axis, y_axis)
}

/// Axis group: a domain path plus one `tick` group per (position, label)
fn axis(orient: Orient, range: (f64, f64), ticks: &[(f64, String)]) -> Element {
    let k = match orient {
        Orient::Bottom => 1.0,
        Orient::Left => -1.0,
    };
    let outer = format_number(k * TICK_SIZE);
    let r0 = format_number(range.0 + CRISP_OFFSET);
    let r1 = format_number(range.1 + CRISP_OFFSET);
    let offset = format_number(CRISP_OFFSET);

    let domain_path = match orient {
        Orient::Bottom => format!("M{},{}V{}H{}V{}", r0, outer, offset, r1, outer),
        Orient::Left => format!("M{},{}H{}V{}H{}", outer, r0, offset, r1, outer),
    };

    let mut group = Element::new("g")
        .attr("fill", "none")
        .attr("font-size", 10)
        .attr("font-family", "sans-serif")
        .attr(
            "text-anchor",
            match orient {
                Orient::Bottom => "middle",
                Orient::Left => "end",
            },
        )
        .child(
            Element::new("path")
                .attr("class", "domain")
                .attr("stroke", "currentColor")
                .attr("d", domain_path),
        );

    let spacing = format_number(k * (TICK_SIZE + TICK_PADDING));
    for (position, label) in ticks {
        let position = format_number(position + CRISP_OFFSET);
        let tick = match orient {
            Orient::Bottom => Element::new("g")
                .attr("class", "tick")
                .attr("opacity", 1)
                .attr("transform", format!("translate({},0)", position))
                .child(Element::new("line").attr("stroke", "currentColor").attr("y2", &outer))
                .child(
                    Element::new("text")
                        .attr("fill", "currentColor")
                        .attr("y", &spacing)
                        .attr("dy", "0.71em")
                        .text(label),
                ),
            Orient::Left => Element::new("g")
                .attr("class", "tick")
                .attr("opacity", 1)
                .attr("transform", format!("translate(0,{})", position))
                .child(Element::new("line").attr("stroke", "currentColor").attr("x2", &outer))
                .child(
                    Element::new("text")
                        .attr("fill", "currentColor")
                        .attr("x", &spacing)
                        .attr("dy", "0.32em")
                        .text(label),
                ),
        };
        group.append(tick);
    }

    group
}
