//! Upload progress display
//!
//! A thin indicatif wrapper around the percentage callbacks the upload
//! client emits. The bar tracks 0-100 directly since the client already
//! reports integer percentages.

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for one upload
pub struct UploadProgress {
    bar: Option<ProgressBar>,
}

impl UploadProgress {
    /// Creates a progress display; disabled bars swallow all updates
    pub fn new(enabled: bool) -> Self {
        let bar = enabled.then(|| {
            let bar = ProgressBar::new(100);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}%")
                    .expect("static progress template is valid")
                    .progress_chars("=>-"),
            );
            bar
        });
        Self { bar }
    }

    /// Returns the percentage callback to hand to the upload client
    pub fn callback(&self) -> impl Fn(u8) + Send + Sync + 'static {
        let bar = self.bar.clone();
        move |pct| {
            if let Some(bar) = &bar {
                bar.set_position(u64::from(pct));
            }
        }
    }

    /// Completes and clears the bar
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}
