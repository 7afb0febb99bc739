use common::ForecastPoint;
use dashboard::chart::{BandStyle, ChartPlan, CHART_TITLE};
use wasm_bindgen::prelude::*;
use web_sys::Element;
use yew::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    pub fn newPlot(div_id: &str, data: JsValue, layout: JsValue, config: JsValue);
}

/// `#RRGGBB` stroke color with the band's fill opacity appended as alpha.
fn fill_color(style: &BandStyle) -> String {
    let alpha = (style.fill_opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("{}{:02X}", style.stroke, alpha)
}

fn chart_traces(plan: &ChartPlan<'_>) -> serde_json::Value {
    let ticks = plan.ticks();
    let hover = plan.hover_texts();
    let traces: Vec<_> = plan
        .bands()
        .iter()
        .map(|band| {
            let style = band.kind.style();
            serde_json::json!({
                "x": ticks,
                "y": band.values_f64(),
                "type": "scatter",
                "mode": "lines",
                "fill": "tozeroy",
                "fillcolor": fill_color(&style),
                "line": {"color": style.stroke, "width": style.stroke_width, "shape": "spline"},
                "name": band.kind.name(),
                "customdata": hover,
                "hovertemplate": "%{customdata}<extra></extra>"
            })
        })
        .collect();
    serde_json::Value::Array(traces)
}

fn chart_layout() -> serde_json::Value {
    serde_json::json!({
        "margin": {"t": 10, "r": 10, "l": 60, "b": 30},
        "paper_bgcolor": "rgba(0,0,0,0)",
        "plot_bgcolor": "rgba(0,0,0,0)",
        "hovermode": "x unified",
        "xaxis": {"showgrid": false, "type": "category"},
        "yaxis": {"showgrid": true, "gridcolor": "#eee", "tickprefix": "$", "rangemode": "tozero"},
        "showlegend": true,
        "legend": {"orientation": "h", "y": -0.2}
    })
}

#[derive(Properties, PartialEq)]
pub struct ForecastChartProps {
    pub series: Vec<ForecastPoint>,
}

#[function_component(ForecastChart)]
pub fn forecast_chart(props: &ForecastChartProps) -> Html {
    let chart_ref = use_node_ref();
    let badge = ChartPlan::new(&props.series).badge();

    use_effect_with((chart_ref.clone(), props.series.clone()), move |(chart_ref, series)| {
        if let Some(element) = chart_ref.cast::<Element>() {
            let plan = ChartPlan::new(series);
            let config = serde_json::json!({"responsive": true, "displayModeBar": false});

            let div_id = element.id();
            let values = (
                serde_wasm_bindgen::to_value(&chart_traces(&plan)),
                serde_wasm_bindgen::to_value(&chart_layout()),
                serde_wasm_bindgen::to_value(&config),
            );
            match values {
                (Ok(data), Ok(layout), Ok(config)) if !div_id.is_empty() => {
                    log::debug!("Drawing forecast chart with {} periods", plan.len());
                    newPlot(&div_id, data, layout, config);
                }
                (Ok(_), Ok(_), Ok(_)) => log::warn!("Forecast chart container has no id"),
                _ => log::error!("Failed to serialize forecast chart for Plotly"),
            }
        }
        || ()
    });

    html! {
        <div class="card bg-base-100 shadow lg:col-span-2">
            <div class="card-body">
                <div class="flex items-center justify-between">
                    <h2 class="card-title">{CHART_TITLE}</h2>
                    <span class="badge badge-outline">{badge}</span>
                </div>
                <div ref={chart_ref} id="chart-forecast" class="chart-container" style="height: 320px;"></div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard::chart::BandKind;
    use rust_decimal::Decimal;

    #[test]
    fn test_fill_color_appends_alpha() {
        assert_eq!(fill_color(&BandKind::Savings.style()), "#10B98166");
        assert_eq!(fill_color(&BandKind::Expenses.style()), "#EF444466");
    }

    #[test]
    fn test_traces_follow_series_order() {
        let series = vec![
            ForecastPoint::new("Jan", Decimal::from(2000), Decimal::from(1400)),
            ForecastPoint::new("Feb", Decimal::from(2200), Decimal::from(1300)),
        ];
        let traces = chart_traces(&ChartPlan::new(&series));

        assert_eq!(traces[0]["name"], "Savings");
        assert_eq!(traces[0]["x"], serde_json::json!(["Jan", "Feb"]));
        assert_eq!(traces[0]["y"], serde_json::json!([2000.0, 2200.0]));
        assert_eq!(traces[1]["y"], serde_json::json!([1400.0, 1300.0]));
        assert_eq!(traces[1]["line"]["color"], "#EF4444");
    }

    #[test]
    fn test_hover_shows_source_amounts() {
        let series = vec![ForecastPoint::new(
            "Jan",
            "1234567890123456.78".parse().unwrap(),
            Decimal::from(1400),
        )];
        let traces = chart_traces(&ChartPlan::new(&series));

        for trace in traces.as_array().unwrap() {
            assert_eq!(
                trace["customdata"][0],
                "Jan: Savings $1234567890123456.78, Expenses $1400"
            );
            assert_eq!(trace["hovertemplate"], "%{customdata}<extra></extra>");
        }
    }
}
