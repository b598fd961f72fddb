use indicatif::{ProgressBar, ProgressStyle};
use kitup_client::DownloadReporter;

/// Download progress bar for interactive installs.
pub struct BarReporter {
    bar: ProgressBar,
}

impl BarReporter {
    pub fn new() -> Self {
        let bar = ProgressBar::no_length();
        let style =
            ProgressStyle::with_template("{wide_bar} {bytes}/{total_bytes} ({bytes_per_sec})")
                .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        Self { bar }
    }
}

impl DownloadReporter for BarReporter {
    fn on_length(&self, total: Option<u64>) {
        if let Some(total) = total {
            self.bar.set_length(total);
        }
    }

    fn on_chunk(&self, bytes: u64) {
        self.bar.inc(bytes);
    }

    fn on_complete(&self) {
        self.bar.finish_and_clear();
    }
}
