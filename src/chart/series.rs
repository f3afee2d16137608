use crate::chart::error::ChartError;

/// How one y-series is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlotStyle {
    Lines,
    Points,
    /// Lines with point markers on top.
    Both,
}

impl PlotStyle {
    pub fn from_code(code: char) -> Result<Self, ChartError> {
        match code {
            'l' => Ok(PlotStyle::Lines),
            'p' => Ok(PlotStyle::Points),
            'b' => Ok(PlotStyle::Both),
            other => Err(ChartError::UnknownStyle(other)),
        }
    }

    pub fn as_gnuplot(self) -> &'static str {
        match self {
            PlotStyle::Lines => "lines",
            PlotStyle::Points => "points",
            PlotStyle::Both => "linespoints",
        }
    }
}

/// Closed palette the renderer accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesColor {
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
}

impl SeriesColor {
    pub const PALETTE: [SeriesColor; 6] = [
        SeriesColor::Red,
        SeriesColor::Green,
        SeriesColor::Blue,
        SeriesColor::Yellow,
        SeriesColor::Cyan,
        SeriesColor::Magenta,
    ];

    pub fn from_code(code: char) -> Result<Self, ChartError> {
        match code {
            'r' => Ok(SeriesColor::Red),
            'g' => Ok(SeriesColor::Green),
            'b' => Ok(SeriesColor::Blue),
            'y' => Ok(SeriesColor::Yellow),
            'c' => Ok(SeriesColor::Cyan),
            'm' => Ok(SeriesColor::Magenta),
            other => Err(ChartError::UnknownColor(other)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SeriesColor::Red => "red",
            SeriesColor::Green => "green",
            SeriesColor::Blue => "blue",
            SeriesColor::Yellow => "yellow",
            SeriesColor::Cyan => "cyan",
            SeriesColor::Magenta => "magenta",
        }
    }

    /// Default assignment when the user picks no colors: walk the palette in
    /// declaration order, wrapping as needed. Deterministic, so the same
    /// configuration always yields the same chart.
    pub fn cycled(count: usize) -> Vec<SeriesColor> {
        (0..count)
            .map(|i| Self::PALETTE[i % Self::PALETTE.len()])
            .collect()
    }
}

/// Validated, immutable description of what gets plotted and how. All y
/// series share the x column.
#[derive(Clone, Debug)]
pub struct SeriesConfig {
    x_column: usize,
    y_columns: Vec<usize>,
    styles: Vec<PlotStyle>,
    colors: Vec<SeriesColor>,
    line_weight: u32,
    y_min: f64,
    y_max: f64,
    x_label: String,
    y_label: String,
}

impl SeriesConfig {
    /// Checks every cross-field invariant up front. A misconfigured series
    /// list would otherwise corrupt the renderer protocol silently, so this
    /// re-validates even input the CLI layer already screened.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        x_column: usize,
        y_columns: Vec<usize>,
        styles: Option<Vec<PlotStyle>>,
        colors: Option<Vec<SeriesColor>>,
        line_weight: u32,
        y_min: f64,
        y_max: f64,
        x_label: String,
        y_label: String,
    ) -> Result<Self, ChartError> {
        if y_columns.is_empty() {
            return Err(ChartError::NoSeries);
        }
        if x_column == 0 || y_columns.contains(&0) {
            return Err(ChartError::NonPositiveColumn);
        }
        if line_weight == 0 {
            return Err(ChartError::NonPositiveWeight);
        }
        if y_min >= y_max {
            return Err(ChartError::InvertedYRange { min: y_min, max: y_max });
        }
        let styles = match styles {
            Some(styles) if styles.len() != y_columns.len() => {
                return Err(ChartError::StyleCountMismatch {
                    expected: y_columns.len(),
                    actual: styles.len(),
                });
            }
            Some(styles) => styles,
            None => vec![PlotStyle::Lines; y_columns.len()],
        };
        let colors = match colors {
            Some(colors) if colors.len() != y_columns.len() => {
                return Err(ChartError::ColorCountMismatch {
                    expected: y_columns.len(),
                    actual: colors.len(),
                });
            }
            Some(colors) => colors,
            None => SeriesColor::cycled(y_columns.len()),
        };
        Ok(Self {
            x_column,
            y_columns,
            styles,
            colors,
            line_weight,
            y_min,
            y_max,
            x_label,
            y_label,
        })
    }

    /// Highest column any series references; records shorter than this
    /// cannot be plotted.
    pub fn required_columns(&self) -> usize {
        self.y_columns
            .iter()
            .copied()
            .chain(std::iter::once(self.x_column))
            .max()
            .unwrap_or(self.x_column)
    }

    pub fn series_count(&self) -> usize {
        self.y_columns.len()
    }

    /// `(y_column, style, color)` per series, in configuration order.
    pub fn series(&self) -> impl Iterator<Item = (usize, PlotStyle, SeriesColor)> + '_ {
        self.y_columns
            .iter()
            .zip(&self.styles)
            .zip(&self.colors)
            .map(|((&column, &style), &color)| (column, style, color))
    }

    pub fn x_column(&self) -> usize {
        self.x_column
    }

    pub fn y_columns(&self) -> &[usize] {
        &self.y_columns
    }

    pub fn line_weight(&self) -> u32 {
        self.line_weight
    }

    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(y_columns: Vec<usize>) -> Result<SeriesConfig, ChartError> {
        SeriesConfig::new(
            1,
            y_columns,
            None,
            None,
            3,
            -10.0,
            10.0,
            String::new(),
            String::new(),
        )
    }

    #[test]
    fn default_colors_cycle_the_palette_in_order() {
        let colors = SeriesColor::cycled(8);
        assert_eq!(
            colors,
            vec![
                SeriesColor::Red,
                SeriesColor::Green,
                SeriesColor::Blue,
                SeriesColor::Yellow,
                SeriesColor::Cyan,
                SeriesColor::Magenta,
                SeriesColor::Red,
                SeriesColor::Green,
            ]
        );
    }

    #[test]
    fn default_style_is_lines_for_every_series() {
        let config = config(vec![2, 3]).unwrap();
        let styles: Vec<PlotStyle> = config.series().map(|(_, style, _)| style).collect();
        assert_eq!(styles, vec![PlotStyle::Lines, PlotStyle::Lines]);
    }

    #[test]
    fn required_columns_is_the_highest_referenced_column() {
        let config = config(vec![4, 2]).unwrap();
        assert_eq!(config.required_columns(), 4);
    }

    #[test]
    fn rejects_mismatched_style_count() {
        let err = SeriesConfig::new(
            1,
            vec![2, 3],
            Some(vec![PlotStyle::Lines]),
            None,
            3,
            -10.0,
            10.0,
            String::new(),
            String::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ChartError::StyleCountMismatch { expected: 2, actual: 1 }
        ));
    }

    #[test]
    fn rejects_mismatched_color_count() {
        let err = SeriesConfig::new(
            1,
            vec![2],
            None,
            Some(vec![SeriesColor::Red, SeriesColor::Blue]),
            3,
            -10.0,
            10.0,
            String::new(),
            String::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ChartError::ColorCountMismatch { expected: 1, actual: 2 }
        ));
    }

    #[test]
    fn rejects_zero_columns_and_inverted_bounds() {
        assert!(matches!(
            config(vec![0]).unwrap_err(),
            ChartError::NonPositiveColumn
        ));
        assert!(matches!(config(vec![]).unwrap_err(), ChartError::NoSeries));
        let err = SeriesConfig::new(
            1,
            vec![2],
            None,
            None,
            3,
            5.0,
            5.0,
            String::new(),
            String::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ChartError::InvertedYRange { .. }));
    }

    #[test]
    fn unknown_codes_fail_construction() {
        assert!(matches!(
            PlotStyle::from_code('x').unwrap_err(),
            ChartError::UnknownStyle('x')
        ));
        assert!(matches!(
            SeriesColor::from_code('k').unwrap_err(),
            ChartError::UnknownColor('k')
        ));
    }
}
