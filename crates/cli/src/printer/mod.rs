use dcomp_session::Summary;
use std::io::{self, Write};

/// Prints the outcome of a run once the report has been written.
pub trait SummaryPrinter {
    fn print(&mut self, summary: &Summary) -> io::Result<()>;
}

/// Human-readable summary on stdout.
pub struct HumanPrinter<W: Write> {
    out: W,
    kind: &'static str,
}

impl<W: Write> HumanPrinter<W> {
    pub fn new(out: W, kind: &'static str) -> Self {
        Self { out, kind }
    }
}

impl HumanPrinter<io::Stdout> {
    pub fn stdout(kind: &'static str) -> Self {
        Self::new(io::stdout(), kind)
    }
}

/// One JSON object per run, for scripts.
pub struct JsonPrinter<W: Write> {
    out: W,
    kind: &'static str,
}

impl<W: Write> JsonPrinter<W> {
    pub fn new(out: W, kind: &'static str) -> Self {
        Self { out, kind }
    }
}

impl JsonPrinter<io::Stdout> {
    pub fn stdout(kind: &'static str) -> Self {
        Self::new(io::stdout(), kind)
    }
}

impl<W: Write> SummaryPrinter for HumanPrinter<W> {
    fn print(&mut self, s: &Summary) -> io::Result<()> {
        writeln!(self.out, "[{}] walked:    {}", self.kind, s.walked)?;
        writeln!(self.out, "[{}] reported:  {}", self.kind, s.merged)?;
        writeln!(self.out, "[{}] redundant: {}", self.kind, s.to_delete)?;
        writeln!(self.out, "[{}] discarded: {}", self.kind, s.discarded)?;
        writeln!(self.out, "[{}] decisions: {}", self.kind, s.decisions)?;
        writeln!(self.out, "[{}] report:    {}", self.kind, s.report.display())
    }
}

impl<W: Write> SummaryPrinter for JsonPrinter<W> {
    fn print(&mut self, s: &Summary) -> io::Result<()> {
        let obj = serde_json::json!({
            "type": "summary",
            "kind": self.kind,
            "summary": s,
        });
        writeln!(self.out, "{}", obj)
    }
}

#[cfg(test)]
#[path = "printer_tests.rs"]
mod tests;
