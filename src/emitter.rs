//! Output formatting for test events.
//!
//! The [`Emitter`] trait defines callbacks for each stage of a test run.
//! Two implementations are provided:
//! - [`HumanReadableEmitter`] — progress and results formatted for a terminal.
//! - [`JsonEmitter`] — one JSON object per line, suitable for machine consumption.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::server::Server;
use crate::summary::{ServerReport, Summary};

/// Which measurement an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    /// The latency probe.
    Latency,
    /// The download throughput test.
    Download,
    /// The upload throughput test.
    Upload,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum Event<'a> {
    Server {
        server: ServerReport,
    },
    Starting {
        test: TestKind,
    },
    Result {
        test: TestKind,
        server: ServerReport,
    },
    Error {
        test: TestKind,
        error: &'a str,
    },
    Implausible {
        server: ServerReport,
    },
    Summary {
        summary: &'a Summary,
    },
}

/// Callbacks for test lifecycle events.
pub trait Emitter {
    /// Called when a target server is selected.
    fn on_server(&mut self, server: &Server) -> Result<()>;
    /// Called when a measurement is about to begin.
    fn on_starting(&mut self, test: TestKind) -> Result<()>;
    /// Called after a measurement completes, with the updated server.
    fn on_result(&mut self, test: TestKind, server: &Server) -> Result<()>;
    /// Called when a measurement fails.
    fn on_error(&mut self, test: TestKind, err: &str) -> Result<()>;
    /// Called when a server's results fail the plausibility check.
    fn on_implausible(&mut self, server: &Server) -> Result<()>;
    /// Called after all servers are measured, with the final summary.
    fn on_summary(&mut self, summary: &Summary) -> Result<()>;
}

/// Emits human-readable progress and results to a writer.
pub struct HumanReadableEmitter<W: Write> {
    out: W,
}

impl<W: Write> HumanReadableEmitter<W> {
    /// Create a new emitter writing to `out`.
    pub fn new(out: W) -> Self {
        HumanReadableEmitter { out }
    }
}

impl<W: Write> Emitter for HumanReadableEmitter<W> {
    fn on_server(&mut self, server: &Server) -> Result<()> {
        writeln!(
            self.out,
            "\nTarget server: [{:>4}] {:8.2} km",
            server.id, server.distance
        )?;
        writeln!(
            self.out,
            "\t> {} ({}) by {}",
            server.name, server.country, server.sponsor
        )?;
        Ok(())
    }

    fn on_starting(&mut self, test: TestKind) -> Result<()> {
        write!(self.out, "running {:?} test... ", test)?;
        self.out.flush()?;
        Ok(())
    }

    fn on_result(&mut self, test: TestKind, server: &Server) -> Result<()> {
        match test {
            TestKind::Latency => writeln!(
                self.out,
                "Latency: {:.2} ms",
                server.latency.as_secs_f64() * 1000.0
            )?,
            TestKind::Download => {
                writeln!(self.out, "Download: {:5.2} Mbit/s", server.download_mbps)?
            }
            TestKind::Upload => writeln!(self.out, "Upload: {:5.2} Mbit/s", server.upload_mbps)?,
        }
        Ok(())
    }

    fn on_error(&mut self, test: TestKind, err: &str) -> Result<()> {
        writeln!(self.out, "{:?} test failed: {err}", test)?;
        Ok(())
    }

    fn on_implausible(&mut self, _server: &Server) -> Result<()> {
        writeln!(
            self.out,
            "Warning: result looks implausible, please test again."
        )?;
        Ok(())
    }

    fn on_summary(&mut self, summary: &Summary) -> Result<()> {
        if summary.servers.len() > 1 {
            writeln!(
                self.out,
                "\nDownload avg: {:5.2} Mbit/s",
                summary.download_avg_mbps
            )?;
            writeln!(
                self.out,
                "Upload avg: {:5.2} Mbit/s",
                summary.upload_avg_mbps
            )?;
        }
        Ok(())
    }
}

/// Emits one JSON object per line for each event.
pub struct JsonEmitter<W: Write> {
    out: W,
}

impl<W: Write> JsonEmitter<W> {
    /// Create a new JSON emitter writing to `out`.
    pub fn new(out: W) -> Self {
        JsonEmitter { out }
    }

    fn emit(&mut self, event: &Event) -> Result<()> {
        let json = serde_json::to_string(event)?;
        writeln!(self.out, "{}", json)?;
        Ok(())
    }
}

impl<W: Write> Emitter for JsonEmitter<W> {
    fn on_server(&mut self, server: &Server) -> Result<()> {
        self.emit(&Event::Server {
            server: server.into(),
        })
    }

    fn on_starting(&mut self, test: TestKind) -> Result<()> {
        self.emit(&Event::Starting { test })
    }

    fn on_result(&mut self, test: TestKind, server: &Server) -> Result<()> {
        self.emit(&Event::Result {
            test,
            server: server.into(),
        })
    }

    fn on_error(&mut self, test: TestKind, err: &str) -> Result<()> {
        self.emit(&Event::Error { test, error: err })
    }

    fn on_implausible(&mut self, server: &Server) -> Result<()> {
        self.emit(&Event::Implausible {
            server: server.into(),
        })
    }

    fn on_summary(&mut self, summary: &Summary) -> Result<()> {
        self.emit(&Event::Summary { summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn measured_server() -> Server {
        Server {
            id: "4166".into(),
            name: "Warsaw".into(),
            country: "Poland".into(),
            sponsor: "Example ISP".into(),
            distance: 12.0,
            latency: Duration::from_millis(15),
            download_mbps: 93.4,
            upload_mbps: 41.2,
            ..Default::default()
        }
    }

    #[test]
    fn human_readable_results() {
        let mut buf = Vec::new();
        let mut emitter = HumanReadableEmitter::new(&mut buf);
        let server = measured_server();

        emitter.on_result(TestKind::Latency, &server).unwrap();
        emitter.on_result(TestKind::Download, &server).unwrap();
        emitter.on_result(TestKind::Upload, &server).unwrap();

        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Latency: 15.00 ms"));
        assert!(out.contains("Download: 93.40 Mbit/s"));
        assert!(out.contains("Upload: 41.20 Mbit/s"));
    }

    #[test]
    fn human_readable_summary_skips_single_server_averages() {
        let mut buf = Vec::new();
        let mut emitter = HumanReadableEmitter::new(&mut buf);

        let summary = Summary::from_servers(&[measured_server()]);
        emitter.on_summary(&summary).unwrap();

        assert!(buf.is_empty());
    }

    #[test]
    fn json_emitter_valid() {
        let mut buf = Vec::new();
        let mut emitter = JsonEmitter::new(&mut buf);

        emitter.on_result(TestKind::Download, &measured_server()).unwrap();

        let out = String::from_utf8(buf).unwrap();
        let res = serde_json::from_str::<serde_json::Value>(&out).unwrap();

        assert_eq!(res["type"], "Result");
        assert_eq!(res["test"], "download");
        assert_eq!(res["server"]["download_mbps"], 93.4);
    }

    #[test]
    fn json_events_are_one_per_line() {
        let mut buf = Vec::new();
        let mut emitter = JsonEmitter::new(&mut buf);

        emitter.on_starting(TestKind::Latency).unwrap();
        emitter.on_error(TestKind::Latency, "boom").unwrap();

        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out.lines().count(), 2);
        for line in out.lines() {
            serde_json::from_str::<serde_json::Value>(line).unwrap();
        }
    }
}
