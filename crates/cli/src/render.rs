use std::io::{self, Write};

use events::{Event, EventEnvelope, Subscription};
use scheduler::{RunOutcome, SortDriver, SortSession, TickOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    /// One JSON envelope per line
    Json,
}

pub fn render(envelope: &EventEnvelope, format: OutputFormat) -> Option<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(envelope).ok(),
        OutputFormat::Text => Some(render_text(&envelope.event)),
    }
}

fn render_text(event: &Event) -> String {
    match event {
        Event::BufferReset { values, .. } => format!("buffer  {}", join(values.iter())),
        Event::SortStarted {
            algorithm, size, ..
        } => format!("start   {algorithm} sort over {size} values"),
        Event::Step { step, changed, .. } => {
            let writes = changed
                .iter()
                .map(|c| format!("[{}]={}", c.index, c.value))
                .collect::<Vec<_>>()
                .join(" ");
            format!("{step:>6}  {writes}")
        }
        Event::SortCompleted { steps, .. } => format!("done    {steps} steps"),
        Event::SortCancelled { steps, .. } => format!("cancel  after {steps} steps"),
    }
}

fn join<'a>(values: impl Iterator<Item = &'a u32>) -> String {
    values.map(u32::to_string).collect::<Vec<_>>().join(" ")
}

/// Writes one line per event of the sort its subscription follows.
pub struct Printer<W> {
    events: Subscription,
    format: OutputFormat,
    out: W,
    steps: u64,
}

impl<W: Write> Printer<W> {
    pub fn new(events: Subscription, format: OutputFormat, out: W) -> Self {
        Self {
            events,
            format,
            out,
            steps: 0,
        }
    }

    pub fn steps_printed(&self) -> u64 {
        self.steps
    }

    /// Events the bus overwrote before they could be printed.
    pub fn missed(&self) -> u64 {
        self.events.missed()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Prints everything already queued. Returns `true` once the sort
    /// has completed or been cancelled.
    pub fn flush(&mut self) -> io::Result<bool> {
        let mut ended = false;
        while !ended {
            let Some(envelope) = self.events.try_recv() else {
                break;
            };
            ended = self.print(&envelope)?;
        }
        self.out.flush()?;
        Ok(ended)
    }

    /// Prints events as they arrive until the sort ends or the bus closes.
    pub async fn follow(mut self) -> io::Result<Self> {
        while let Some(envelope) = self.events.recv().await {
            let ended = self.print(&envelope)?;
            self.out.flush()?;
            if ended {
                break;
            }
        }
        Ok(self)
    }

    fn print(&mut self, envelope: &EventEnvelope) -> io::Result<bool> {
        if let Some(line) = render(envelope, self.format) {
            writeln!(self.out, "{line}")?;
        }
        if matches!(envelope.event, Event::Step { .. }) {
            self.steps += 1;
        }
        Ok(envelope.event.ends_sort())
    }
}

/// Ticks the active sort to the end without pacing, printing each tick's
/// events before the next tick so none can be overwritten.
pub fn run_instant<W: Write>(
    driver: &mut SortDriver,
    session: &mut SortSession,
    printer: &mut Printer<W>,
) -> io::Result<RunOutcome> {
    printer.flush()?;
    loop {
        let outcome = driver.tick(session);
        printer.flush()?;
        match outcome {
            TickOutcome::Step(_) => {}
            TickOutcome::Completed(summary) => return Ok(RunOutcome::Completed(summary)),
            TickOutcome::Idle => return Ok(RunOutcome::Idle),
        }
    }
}
