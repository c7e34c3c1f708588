//! Progress sinks for [`DEIntermediate`] reports.
//!
//! Every reporting point carries the generation index, the mean score and
//! the minimum score. [`log_progress`] forwards them to the `log` facade,
//! [`CsvProgress`] writes them as `generation,mean,minimum` rows.

use std::io::{self, Write};

use crate::{CallbackAction, CallbackFn, DEIntermediate};

/// Callback that logs every report at `info` level and never stops the run.
pub fn log_progress() -> CallbackFn {
    Box::new(|report: &DEIntermediate| {
        log::info!(
            "generation {}: mean={:.6e}, minimum={:.6e}, accepted={}",
            report.iter,
            report.mean,
            report.fun,
            report.accepted
        );
        CallbackAction::Continue
    })
}

/// Writes one CSV row per report, header first.
#[derive(Debug)]
pub struct CsvProgress<W: Write> {
    out: W,
    header_written: bool,
    rows: usize,
}

impl<W: Write> CsvProgress<W> {
    /// Wraps `out`; nothing is written until the first record.
    pub fn new(out: W) -> Self {
        Self {
            out,
            header_written: false,
            rows: 0,
        }
    }

    /// Appends one report.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    pub fn record(&mut self, report: &DEIntermediate) -> io::Result<()> {
        if !self.header_written {
            writeln!(self.out, "generation,mean,minimum")?;
            self.header_written = true;
        }
        writeln!(self.out, "{},{},{}", report.iter, report.mean, report.fun)?;
        self.rows += 1;
        Ok(())
    }

    /// Number of rows written so far, header excluded.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Pushes buffered rows to the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Flushes and returns the writer.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the final flush.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write + 'static> CsvProgress<W> {
    /// Turns the sink into a driver callback.
    ///
    /// Write failures are logged and do not stop the optimization.
    pub fn into_callback(mut self) -> CallbackFn {
        Box::new(move |report: &DEIntermediate| {
            if let Err(e) = self.record(report).and_then(|_| self.flush()) {
                log::warn!("failed to write progress row {}: {}", report.iter, e);
            }
            CallbackAction::Continue
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GenerationParams;
    use ndarray::array;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn report(iter: usize, mean: f64, fun: f64) -> DEIntermediate {
        DEIntermediate {
            iter,
            mean,
            fun,
            x: array![0.0, 0.0],
            accepted: 3,
            params: GenerationParams {
                crossover: 0.5,
                mutation: 0.7,
            },
        }
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_csv_rows() {
        let mut sink = CsvProgress::new(Vec::new());
        sink.record(&report(0, 12.5, 1.0)).unwrap();
        sink.record(&report(100, 2.25, 0.5)).unwrap();
        assert_eq!(sink.rows(), 2);
        let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert_eq!(text, "generation,mean,minimum\n0,12.5,1\n100,2.25,0.5\n");
    }

    #[test]
    fn test_empty_sink_writes_nothing() {
        let sink = CsvProgress::new(Vec::new());
        assert!(sink.into_inner().unwrap().is_empty());
    }

    #[test]
    fn test_callback_continues() {
        let buf = SharedBuf::default();
        let mut cb = CsvProgress::new(buf.clone()).into_callback();
        assert_eq!(cb(&report(7, 3.0, 1.5)), CallbackAction::Continue);
        let text = String::from_utf8(buf.0.borrow().clone()).unwrap();
        assert_eq!(text, "generation,mean,minimum\n7,3,1.5\n");

        let mut log_cb = log_progress();
        assert_eq!(log_cb(&report(8, 3.0, 1.5)), CallbackAction::Continue);
    }

    #[test]
    fn test_flush_reaches_buffered_writer() {
        let buf = SharedBuf::default();
        let mut sink = CsvProgress::new(io::BufWriter::new(buf.clone()));
        sink.record(&report(3, 2.0, 1.0)).unwrap();
        assert!(buf.0.borrow().is_empty());
        sink.flush().unwrap();
        let text = String::from_utf8(buf.0.borrow().clone()).unwrap();
        assert_eq!(text, "generation,mean,minimum\n3,2,1\n");
    }

    #[test]
    fn test_write_failure_does_not_stop() {
        let mut cb = CsvProgress::new(Broken).into_callback();
        assert_eq!(cb(&report(0, 1.0, 1.0)), CallbackAction::Continue);
    }
}
