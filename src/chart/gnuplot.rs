use std::io::{self, BufWriter, Write};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::chart::error::ChartError;
use crate::chart::series::SeriesConfig;
use crate::chart::window::SlidingWindow;

/// Session wrapping a live gnuplot child process.
///
/// The protocol is strictly one-way: commands and inline data go down the
/// child's stdin and nothing is ever read back. The child's own stdout and
/// stderr stay attached to the terminal so its diagnostics remain visible.
#[derive(Debug)]
pub struct GnuplotSession {
    child: Option<Child>,
    stdin: Option<BufWriter<ChildStdin>>,
}

impl GnuplotSession {
    /// Launches the renderer with `-persist` so the plot window survives a
    /// clean shutdown of this process.
    pub fn start(program: &str) -> Result<Self, ChartError> {
        let mut child = Command::new(program)
            .arg("-persist")
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ChartError::RendererLaunch {
                program: program.to_owned(),
                source,
            })?;
        let stdin = child.stdin.take().map(BufWriter::new);
        Ok(Self {
            child: Some(child),
            stdin,
        })
    }

    /// Ships one frame. The trailing flush is the only "frame complete"
    /// signal the renderer gets, so it is not optional.
    pub fn render(
        &mut self,
        window: &SlidingWindow,
        config: &SeriesConfig,
    ) -> Result<(), ChartError> {
        let Some(stdin) = self.stdin.as_mut() else {
            return Ok(());
        };
        write_frame(stdin, window, config).map_err(ChartError::RendererPipe)?;
        stdin.flush().map_err(ChartError::RendererPipe)
    }

    /// Tears the renderer down. Safe to call any number of times; the loop's
    /// teardown path and `Drop` may both get here.
    pub fn close(&mut self) {
        // Dropping the pipe first gives the child an EOF before the kill.
        self.stdin.take();
        if let Some(mut child) = self.child.take() {
            if let Err(err) = child.kill() {
                log::debug!("renderer already gone: {err}");
            }
            let _ = child.wait();
        }
    }
}

impl Drop for GnuplotSession {
    fn drop(&mut self) {
        self.close();
    }
}

/// Writes one complete frame: axis setup, the plot declaration, then one
/// inline `<x> <y>` block per series, each closed by a lone `e`.
///
/// The x-range is recomputed from the window edges on every call; that is
/// what makes the chart scroll.
pub fn write_frame<W: Write>(
    out: &mut W,
    window: &SlidingWindow,
    config: &SeriesConfig,
) -> io::Result<()> {
    let (Some(first), Some(last)) = (window.first(), window.last()) else {
        return Ok(());
    };
    writeln!(
        out,
        "set xrange [{}:{}]",
        first.field(config.x_column()),
        last.field(config.x_column())
    )?;
    writeln!(out, "set yrange [{}:{}]", config.y_min(), config.y_max())?;
    writeln!(out, "set xlabel \"{}\"", config.x_label())?;
    writeln!(out, "set ylabel \"{}\"", config.y_label())?;
    let declarations: Vec<String> = config
        .series()
        .map(|(_, style, color)| {
            format!(
                "'-' using 1:2 with {} lw {} lt 6 lc rgb \"{}\"",
                style.as_gnuplot(),
                config.line_weight(),
                color.name()
            )
        })
        .collect();
    writeln!(out, "plot {}", declarations.join(", "))?;
    // gnuplot consumes one inline block per declared series.
    for (column, _, _) in config.series() {
        for record in window.iter() {
            writeln!(
                out,
                "{} {}",
                record.field(config.x_column()),
                record.field(column)
            )?;
        }
        writeln!(out, "e")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::record::RecordParser;
    use crate::chart::series::{PlotStyle, SeriesColor};

    fn window_of(lines: &[&str], capacity: usize) -> SlidingWindow {
        let parser = RecordParser::new(1);
        let mut window = SlidingWindow::new(capacity);
        for line in lines {
            window.push(parser.parse(line).unwrap().unwrap());
        }
        window
    }

    #[test]
    fn frame_carries_ranges_declaration_and_data_blocks() {
        let config = SeriesConfig::new(
            1,
            vec![2, 3],
            Some(vec![PlotStyle::Lines, PlotStyle::Points]),
            Some(vec![SeriesColor::Red, SeriesColor::Blue]),
            2,
            0.0,
            50.0,
            "t".to_owned(),
            "v".to_owned(),
        )
        .unwrap();
        let window = window_of(&["1 10 40", "2 20 30"], 10);
        let mut out = Vec::new();
        write_frame(&mut out, &window, &config).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "set xrange [1:2]");
        assert_eq!(lines[1], "set yrange [0:50]");
        assert_eq!(lines[2], "set xlabel \"t\"");
        assert_eq!(lines[3], "set ylabel \"v\"");
        assert_eq!(
            lines[4],
            "plot '-' using 1:2 with lines lw 2 lt 6 lc rgb \"red\", \
             '-' using 1:2 with points lw 2 lt 6 lc rgb \"blue\""
        );
        assert_eq!(&lines[5..], &["1 10", "2 20", "e", "1 40", "2 30", "e"]);
    }

    #[test]
    fn xrange_tracks_the_current_window_edges() {
        let config = SeriesConfig::new(
            1,
            vec![2],
            None,
            None,
            3,
            -10.0,
            10.0,
            String::new(),
            String::new(),
        )
        .unwrap();
        let mut window = window_of(&["1 0", "2 0"], 2);
        let mut out = Vec::new();
        write_frame(&mut out, &window, &config).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("set xrange [1:2]"));

        window.push(RecordParser::new(1).parse("3 0").unwrap().unwrap());
        let mut out = Vec::new();
        write_frame(&mut out, &window, &config).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("set xrange [2:3]"));
    }

    #[test]
    fn empty_window_writes_nothing() {
        let config = SeriesConfig::new(
            1,
            vec![2],
            None,
            None,
            3,
            -10.0,
            10.0,
            String::new(),
            String::new(),
        )
        .unwrap();
        let window = SlidingWindow::new(4);
        let mut out = Vec::new();
        write_frame(&mut out, &window, &config).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn start_fails_for_a_missing_program() {
        let err = GnuplotSession::start("definitely-not-a-real-renderer").unwrap_err();
        assert!(matches!(err, ChartError::RendererLaunch { .. }));
    }

    #[test]
    fn close_is_idempotent() {
        // `true` stands in for gnuplot; it ignores the -persist flag.
        let mut session = GnuplotSession::start("true").unwrap();
        session.close();
        session.close();
    }
}
