use common::ForecastPoint;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

pub const CHART_TITLE: &str = "Projected Savings vs. Expenses";

/// The two overlaid bands of the forecast chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandKind {
    Savings,
    Expenses,
}

/// Visual treatment of a band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandStyle {
    pub stroke: &'static str,
    pub stroke_width: u32,
    /// Fill opacity at the top of the gradient; it fades to transparent.
    pub fill_opacity: f64,
}

impl BandKind {
    pub const ALL: [BandKind; 2] = [BandKind::Savings, BandKind::Expenses];

    pub fn name(&self) -> &'static str {
        match self {
            BandKind::Savings => "Savings",
            BandKind::Expenses => "Expenses",
        }
    }

    pub fn style(&self) -> BandStyle {
        match self {
            BandKind::Savings => BandStyle {
                stroke: "#10B981",
                stroke_width: 3,
                fill_opacity: 0.4,
            },
            BandKind::Expenses => BandStyle {
                stroke: "#EF4444",
                stroke_width: 3,
                fill_opacity: 0.4,
            },
        }
    }

    pub fn value(&self, point: &ForecastPoint) -> Decimal {
        match self {
            BandKind::Savings => point.savings,
            BandKind::Expenses => point.expenses,
        }
    }
}

/// One band's values, aligned with the chart's ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Band<'a> {
    pub kind: BandKind,
    pub points: Vec<BandPoint<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandPoint<'a> {
    pub period: &'a str,
    pub value: Decimal,
}

impl Band<'_> {
    /// Values as floats for plotting backends.
    pub fn values_f64(&self) -> Vec<f64> {
        self.points
            .iter()
            .map(|p| p.value.to_f64().unwrap_or(0.0))
            .collect()
    }
}

/// Layout of the forecast chart over a borrowed series.
///
/// The x-axis is categorical in series order; nothing is re-sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPlan<'a> {
    series: &'a [ForecastPoint],
    y_min: Decimal,
    y_max: Decimal,
}

impl<'a> ChartPlan<'a> {
    pub fn new(series: &'a [ForecastPoint]) -> Self {
        let values = series
            .iter()
            .flat_map(|p| BandKind::ALL.into_iter().map(move |kind| kind.value(p)));

        let (y_min, y_max) = values.fold((Decimal::ZERO, Decimal::ZERO), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

        Self {
            series,
            y_min,
            y_max,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn points(&self) -> &'a [ForecastPoint] {
        self.series
    }

    /// One tick per period, in series order.
    pub fn ticks(&self) -> Vec<&'a str> {
        self.series.iter().map(|p| p.period.as_str()).collect()
    }

    /// `[min(0, smallest value), max(0, largest value)]`.
    pub fn y_domain(&self) -> (Decimal, Decimal) {
        (self.y_min, self.y_max)
    }

    pub fn bands(&self) -> [Band<'a>; 2] {
        BandKind::ALL.map(|kind| self.band(kind))
    }

    pub fn band(&self, kind: BandKind) -> Band<'a> {
        Band {
            kind,
            points: self
                .series
                .iter()
                .map(|p| BandPoint {
                    period: p.period.as_str(),
                    value: kind.value(p),
                })
                .collect(),
        }
    }

    /// The source record under the cursor at `index`.
    pub fn tooltip(&self, index: usize) -> Option<&'a ForecastPoint> {
        self.series.get(index)
    }

    /// Hover text for `index`, built from the record's own decimal strings so
    /// the amounts read exactly as the provider sent them.
    pub fn hover_text(&self, index: usize) -> Option<String> {
        self.tooltip(index).map(|point| {
            format!(
                "{}: {} ${}, {} ${}",
                point.period,
                BandKind::Savings.name(),
                point.savings,
                BandKind::Expenses.name(),
                point.expenses
            )
        })
    }

    /// [`hover_text`](Self::hover_text) for every point, in tick order.
    pub fn hover_texts(&self) -> Vec<String> {
        (0..self.series.len())
            .filter_map(|index| self.hover_text(index))
            .collect()
    }

    /// Vertical position of `value` within the y domain, 0.0 at the bottom.
    pub fn y_position(&self, value: Decimal) -> f64 {
        let span = self.y_max - self.y_min;
        if span.is_zero() {
            return 0.0;
        }
        ((value - self.y_min) / span).to_f64().unwrap_or(0.0)
    }

    /// Badge text, e.g. "12-Month Forecast".
    pub fn badge(&self) -> String {
        format!("{}-Month Forecast", self.series.len())
    }
}

/// Y-axis tick label.
pub fn format_amount(value: Decimal) -> String {
    format!("${}", value.normalize())
}
