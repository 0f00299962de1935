use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::labeling::domain::label_prompt::{ClusterPreview, LabelPrompt};

/// Shared between a prompt and a signal handler so that an interrupt skips
/// the question being asked instead of ending the run.
#[derive(Debug, Default)]
pub struct PromptInterrupt {
    waiting: AtomicBool,
    interrupted: AtomicBool,
}

impl PromptInterrupt {
    /// Marks the pending question as skipped.
    ///
    /// Returns `false` when no question is waiting for an answer; the
    /// caller then decides what an interrupt means.
    pub fn interrupt(&self) -> bool {
        if self.waiting.load(Ordering::SeqCst) {
            self.interrupted.store(true, Ordering::SeqCst);
            true
        } else {
            false
        }
    }

    fn begin(&self) {
        self.interrupted.store(false, Ordering::SeqCst);
        self.waiting.store(true, Ordering::SeqCst);
    }

    /// Ends the question; `true` if it was interrupted meanwhile.
    fn finish(&self) -> bool {
        self.waiting.store(false, Ordering::SeqCst);
        self.interrupted.swap(false, Ordering::SeqCst)
    }
}

/// Terminal prompt: prints the cluster preview and reads one line.
pub struct StdinLabelPrompt<R, W> {
    input: R,
    output: W,
    interrupt: Arc<PromptInterrupt>,
}

impl StdinLabelPrompt<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StdinLabelPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            interrupt: Arc::default(),
        }
    }

    /// Uses `interrupt` to learn about interrupts while reading.
    pub fn with_interrupt(mut self, interrupt: Arc<PromptInterrupt>) -> Self {
        self.interrupt = interrupt;
        self
    }

    fn show(&mut self, preview: &ClusterPreview<'_>) -> io::Result<()> {
        let out = &mut self.output;
        writeln!(out)?;
        writeln!(out, "{}", "=".repeat(50))?;
        writeln!(out, "Cluster #{}", preview.cluster)?;
        writeln!(
            out,
            "Sample images ({} of {} shown):",
            preview.samples.len(),
            preview.photo_count
        )?;
        for path in preview.samples {
            writeln!(out, "  • {}", path.display())?;
        }
        if !preview.known_labels.is_empty() {
            writeln!(out, "Known labels so far: {}", preview.known_labels.join(", "))?;
        }
        writeln!(out, "Enter a name for this person (or press Enter to skip):")?;
        write!(out, "> ")?;
        out.flush()
    }
}

impl<R: BufRead, W: Write> LabelPrompt for StdinLabelPrompt<R, W> {
    fn ask(&mut self, preview: &ClusterPreview<'_>) -> Option<String> {
        if let Err(e) = self.show(preview) {
            log::warn!("Could not display label prompt: {e}");
        }

        let mut line = String::new();
        self.interrupt.begin();
        let read = self.input.read_line(&mut line);
        if self.interrupt.finish() {
            log::debug!("Label prompt for cluster {} interrupted", preview.cluster);
            return None;
        }

        match read {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()).filter(|name| !name.is_empty()),
            Err(e) => {
                log::debug!("Label prompt input ended: {e}");
                None
            }
        }
    }
}
