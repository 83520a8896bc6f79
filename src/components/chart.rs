use charming::{
    Chart as CharmingChart,
    component::{Axis, Grid, Legend, Title},
    datatype::CompositeValue,
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, LineStyle, LineStyleType, SplitLine,
        TextStyle, Tooltip, Trigger,
    },
    renderer::WasmRenderer,
    series::{Line, Pie},
};
use gloo::events::EventListener;
use std::rc::Rc;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::models::aggregate::{RawDataPoint, SeriesData, composition, time_series};
use crate::models::selection::GroupBy;

const TITLE_COLOR: &str = "#1f2937";
const AXIS_COLOR: &str = "#6b7280";
const GRID_COLOR: &str = "#e5e7eb";
/// ECharts' marker for an empty slot in a category series
const MISSING_VALUE: &str = "-";

#[derive(Properties, PartialEq)]
pub struct ChartProps {
    /// DOM id of the render target, unique per chart on the page
    pub id: AttrValue,
    pub points: Rc<Vec<RawDataPoint>>,
    pub group_by: GroupBy,
    #[prop_or_default]
    pub unit: Option<String>,
}

fn render_chart(container: &HtmlElement, id: &str, chart: &CharmingChart) {
    let width = container.client_width().cast_unsigned();
    let height = container.client_height().cast_unsigned();

    if width == 0 || height == 0 {
        return;
    }

    if let Err(e) = WasmRenderer::new(width, height).render(id, chart) {
        gloo::console::error!(format!("Render error: {e:?}"));
    }
}

/// Line chart with one series per group value
#[function_component(TimeSeriesChart)]
pub fn time_series_chart(props: &ChartProps) -> Html {
    let container_ref = use_node_ref();
    let series_data = use_memo((props.points.clone(), props.group_by), |(points, group_by)| {
        time_series(points, *group_by)
    });

    {
        let container_ref = container_ref.clone();
        let id = props.id.clone();
        let group_by = props.group_by;
        let unit = props.unit.clone();

        use_effect_with(
            (series_data, container_ref, id, unit),
            move |(series_data, container_ref, id, unit)| {
                let listener = container_ref.cast::<HtmlElement>().map(|container| {
                    let build = {
                        let series_data = series_data.clone();
                        let unit = unit.clone();
                        move || build_time_series(&series_data, group_by, unit.as_deref())
                    };
                    render_chart(&container, id, &build());

                    let id = id.clone();
                    EventListener::new(&gloo::utils::window(), "resize", move |_| {
                        render_chart(&container, &id, &build());
                    })
                });

                move || drop(listener)
            },
        );
    }

    html! {
        <div class="chart-container" ref={container_ref}>
            <div id={props.id.clone()} />
        </div>
    }
}

/// Pie chart of the total value per group
#[function_component(CompositionChart)]
pub fn composition_chart(props: &ChartProps) -> Html {
    let container_ref = use_node_ref();
    let slices = use_memo((props.points.clone(), props.group_by), |(points, group_by)| {
        composition(points, *group_by)
    });

    {
        let container_ref = container_ref.clone();
        let id = props.id.clone();
        let group_by = props.group_by;

        use_effect_with(
            (slices, container_ref, id),
            move |(slices, container_ref, id)| {
                let listener = container_ref.cast::<HtmlElement>().map(|container| {
                    let build = {
                        let slices = slices.clone();
                        move || build_composition(&slices, group_by)
                    };
                    render_chart(&container, id, &build());

                    let id = id.clone();
                    EventListener::new(&gloo::utils::window(), "resize", move |_| {
                        render_chart(&container, &id, &build());
                    })
                });

                move || drop(listener)
            },
        );
    }

    html! {
        <div class="chart-container" ref={container_ref}>
            <div id={props.id.clone()} />
        </div>
    }
}

fn build_time_series(data: &SeriesData, group_by: GroupBy, unit: Option<&str>) -> CharmingChart {
    let mut chart = CharmingChart::new()
        .title(
            Title::new()
                .text(format!("Over Time by {}", group_by.label()))
                .left("center")
                .text_style(TextStyle::new().font_size(16).color(TITLE_COLOR)),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Line)),
        )
        .legend(Legend::new().bottom(0))
        .grid(
            Grid::new()
                .left("8%")
                .right("4%")
                .bottom("18%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(data.timestamps.clone())
                .axis_label(AxisLabel::new().rotate(45).color(AXIS_COLOR)),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name(unit.unwrap_or_default())
                .axis_label(AxisLabel::new().color(AXIS_COLOR))
                .split_line(
                    SplitLine::new().line_style(
                        LineStyle::new()
                            .color(GRID_COLOR)
                            .type_(LineStyleType::Dashed),
                    ),
                ),
        );

    for (name, values) in &data.series {
        chart = chart.series(Line::new().name(name.as_str()).data(line_values(values)));
    }

    chart
}

/// Line data with gaps where a group has no point at a timestamp.
fn line_values(values: &[Option<f64>]) -> Vec<CompositeValue> {
    values
        .iter()
        .map(|value| match value {
            Some(v) => CompositeValue::from(*v),
            None => CompositeValue::from(MISSING_VALUE),
        })
        .collect()
}

fn build_composition(slices: &[(String, f64)], group_by: GroupBy) -> CharmingChart {
    let data: Vec<(f64, &str)> = slices
        .iter()
        .map(|(name, value)| (*value, name.as_str()))
        .collect();

    CharmingChart::new()
        .title(
            Title::new()
                .text(format!("Composition by {}", group_by.label()))
                .left("center")
                .text_style(TextStyle::new().font_size(16).color(TITLE_COLOR)),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().bottom(0))
        .series(
            Pie::new()
                .name(group_by.label())
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}
