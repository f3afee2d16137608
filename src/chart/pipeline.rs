use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use log::warn;

use crate::chart::error::ChartError;
use crate::chart::gnuplot::GnuplotSession;
use crate::chart::record::RecordParser;
use crate::chart::series::SeriesConfig;
use crate::chart::throttle::RenderThrottle;
use crate::chart::window::SlidingWindow;

/// Where finished frames go. The live gnuplot session is the real
/// implementation; tests substitute an in-memory recorder.
pub trait FrameSink {
    fn render(&mut self, window: &SlidingWindow, config: &SeriesConfig)
        -> Result<(), ChartError>;
    fn close(&mut self);
}

impl FrameSink for GnuplotSession {
    fn render(
        &mut self,
        window: &SlidingWindow,
        config: &SeriesConfig,
    ) -> Result<(), ChartError> {
        GnuplotSession::render(self, window, config)
    }

    fn close(&mut self) {
        GnuplotSession::close(self);
    }
}

/// Lifecycle of the streaming loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Draining,
    Closed,
}

/// Orchestrates read -> parse -> buffer -> maybe-render until the producer
/// closes the stream or the user interrupts.
///
/// Single-writer by construction: the loop is the only mutator of the window
/// and the throttle, so none of this needs locking.
pub struct StreamLoop<R: BufRead, S: FrameSink> {
    reader: R,
    sink: S,
    config: SeriesConfig,
    parser: RecordParser,
    window: SlidingWindow,
    throttle: RenderThrottle,
    interrupted: Arc<AtomicBool>,
    state: LoopState,
}

impl<R: BufRead, S: FrameSink> StreamLoop<R, S> {
    pub fn new(
        reader: R,
        sink: S,
        config: SeriesConfig,
        window_capacity: usize,
        redraw_hz: u32,
        interrupted: Arc<AtomicBool>,
    ) -> Result<Self, ChartError> {
        if window_capacity == 0 {
            return Err(ChartError::ZeroCapacity);
        }
        if redraw_hz == 0 {
            return Err(ChartError::ZeroFrequency);
        }
        let parser = RecordParser::new(config.required_columns());
        Ok(Self {
            reader,
            sink,
            parser,
            window: SlidingWindow::new(window_capacity),
            throttle: RenderThrottle::new(redraw_hz),
            config,
            interrupted,
            state: LoopState::Idle,
        })
    }

    /// Runs to completion. No matter how the stream ends, the sink is closed
    /// exactly once before this returns.
    pub fn run(&mut self) -> Result<(), ChartError> {
        self.state = LoopState::Running;
        let outcome = self.pump();
        self.state = LoopState::Draining;
        self.sink.close();
        self.state = LoopState::Closed;
        outcome
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn pump(&mut self) -> Result<(), ChartError> {
        let mut line = String::new();
        loop {
            if self.interrupted.load(Ordering::Relaxed) {
                return Ok(());
            }
            line.clear();
            match self.reader.read_line(&mut line) {
                // Producer closed the stream.
                Ok(0) => return Ok(()),
                Ok(_) => {}
                // A signal can cut the blocking read short; loop back so the
                // interrupt flag gets checked.
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(ChartError::Input(err)),
            }
            match self.parser.parse(&line) {
                Ok(Some(record)) => self.window.push(record),
                // Blank line: nothing to plot yet.
                Ok(None) => continue,
                Err(err) => {
                    warn!("{err}");
                    continue;
                }
            }
            let now = Instant::now();
            if self.window.len() > 1 && self.throttle.due(now) {
                self.sink.render(&self.window, &self.config)?;
                self.throttle.mark_rendered(now);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn config(y_columns: Vec<usize>) -> SeriesConfig {
        SeriesConfig::new(
            1,
            y_columns,
            None,
            None,
            3,
            -100.0,
            100.0,
            String::new(),
            String::new(),
        )
        .unwrap()
    }

    /// Captures the (x, y) pairs of the first series of every frame.
    #[derive(Default)]
    struct RecordingSink {
        frames: Vec<Vec<(f64, f64)>>,
        closed: usize,
        fail_renders: bool,
    }

    impl FrameSink for RecordingSink {
        fn render(
            &mut self,
            window: &SlidingWindow,
            config: &SeriesConfig,
        ) -> Result<(), ChartError> {
            if self.fail_renders {
                return Err(ChartError::RendererPipe(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "pipe gone",
                )));
            }
            let y_column = config.y_columns()[0];
            self.frames.push(
                window
                    .iter()
                    .map(|r| (r.field(config.x_column()), r.field(y_column)))
                    .collect(),
            );
            Ok(())
        }

        fn close(&mut self) {
            self.closed += 1;
        }
    }

    fn stream(
        input: &str,
        capacity: usize,
        redraw_hz: u32,
    ) -> StreamLoop<Cursor<Vec<u8>>, RecordingSink> {
        StreamLoop::new(
            Cursor::new(input.as_bytes().to_vec()),
            RecordingSink::default(),
            config(vec![2]),
            capacity,
            redraw_hz,
            Arc::new(AtomicBool::new(false)),
        )
        .unwrap()
    }

    #[test]
    fn window_scrolls_and_throttle_limits_renders() {
        // 1 Hz redraws and three near-instant records: only the first
        // eligible frame (two points buffered) gets rendered.
        let mut stream = stream("1 10\n2 20\n3 30\n", 2, 1);
        stream.run().unwrap();
        let window: Vec<(f64, f64)> = stream
            .window()
            .iter()
            .map(|r| (r.field(1), r.field(2)))
            .collect();
        assert_eq!(window, vec![(2.0, 20.0), (3.0, 30.0)]);
        assert_eq!(stream.sink().frames, vec![vec![(1.0, 10.0), (2.0, 20.0)]]);
        assert_eq!(stream.sink().closed, 1);
        assert_eq!(stream.state(), LoopState::Closed);
    }

    #[test]
    fn malformed_records_are_dropped_not_fatal() {
        let mut stream = stream("1 abc\n1\n2 20\n", 10, 1000);
        stream.run().unwrap();
        // Only the one well-formed record made it into the window.
        assert_eq!(stream.window().len(), 1);
        assert!(stream.sink().frames.is_empty());
        assert_eq!(stream.sink().closed, 1);
    }

    #[test]
    fn blank_lines_are_skipped_while_waiting_for_data() {
        let mut stream = stream("\n   \n1 10\n\n2 20\n", 10, 1000);
        stream.run().unwrap();
        assert_eq!(stream.window().len(), 2);
        assert_eq!(stream.sink().frames.len(), 1);
    }

    #[test]
    fn no_render_until_the_window_holds_two_points() {
        let mut stream = stream("1 10\n", 10, 1000);
        stream.run().unwrap();
        assert!(stream.sink().frames.is_empty());
        assert_eq!(stream.sink().closed, 1);
    }

    #[test]
    fn interrupt_drains_without_reading_further() {
        let interrupted = Arc::new(AtomicBool::new(true));
        let mut stream = StreamLoop::new(
            Cursor::new(b"1 10\n2 20\n".to_vec()),
            RecordingSink::default(),
            config(vec![2]),
            10,
            60,
            interrupted,
        )
        .unwrap();
        stream.run().unwrap();
        assert!(stream.window().is_empty());
        assert_eq!(stream.sink().closed, 1);
        assert_eq!(stream.state(), LoopState::Closed);
    }

    #[test]
    fn renderer_failure_is_fatal_but_still_closes_the_sink() {
        let mut stream = StreamLoop::new(
            Cursor::new(b"1 10\n2 20\n".to_vec()),
            RecordingSink {
                fail_renders: true,
                ..RecordingSink::default()
            },
            config(vec![2]),
            10,
            60,
            Arc::new(AtomicBool::new(false)),
        )
        .unwrap();
        let err = stream.run().unwrap_err();
        assert!(matches!(err, ChartError::RendererPipe(_)));
        assert_eq!(stream.sink().closed, 1);
        assert_eq!(stream.state(), LoopState::Closed);
    }

    #[test]
    fn rejects_zero_capacity_and_zero_frequency() {
        let build = |capacity, hz| {
            StreamLoop::new(
                Cursor::new(Vec::new()),
                RecordingSink::default(),
                config(vec![2]),
                capacity,
                hz,
                Arc::new(AtomicBool::new(false)),
            )
        };
        assert!(matches!(build(0, 60), Err(ChartError::ZeroCapacity)));
        assert!(matches!(build(10, 0), Err(ChartError::ZeroFrequency)));
    }
}
