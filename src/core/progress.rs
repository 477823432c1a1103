//! Progress bar management and processing context structures

use anyhow::Result;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use tokio::sync::Semaphore;

use super::config::{PROGRESS_CHARS, PROGRESS_TEMPLATE};

/// Processing context that encapsulates the shared state of one sync run
///
/// The semaphore is the only thing workers share; the progress bar is driven
/// by the coordinator as outcomes come back.
pub struct ProcessingContext {
    /// Overall progress bar, one tick per finished repository
    pub progress_bar: ProgressBar,
    /// Slot pool bounding concurrent git operations
    pub semaphore: Arc<Semaphore>,
}

/// Creates a ProcessingContext for `total_repos` repositories, with the bar
/// attached to `multi_progress`
pub fn create_processing_context(
    multi_progress: &MultiProgress,
    total_repos: usize,
    concurrent_limit: usize,
) -> Result<ProcessingContext> {
    let progress_style = create_progress_style()?;
    let progress_bar = create_progress_bar(multi_progress, &progress_style, total_repos);
    let semaphore = Arc::new(Semaphore::new(concurrent_limit));

    Ok(ProcessingContext {
        progress_bar,
        semaphore,
    })
}

/// Creates and configures the overall progress bar
pub(crate) fn create_progress_bar(
    multi: &MultiProgress,
    style: &ProgressStyle,
    total_repos: usize,
) -> ProgressBar {
    let pb = multi.add(ProgressBar::new(total_repos as u64));
    pb.set_style(style.clone());
    pb.set_prefix("🔄 syncing");
    pb.set_message("starting...");
    pb
}

/// Creates a progress bar style configuration
pub(crate) fn create_progress_style() -> Result<ProgressStyle> {
    Ok(ProgressStyle::default_bar()
        .template(PROGRESS_TEMPLATE)?
        .progress_chars(PROGRESS_CHARS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicatif::ProgressDrawTarget;

    #[test]
    fn test_progress_style_template_is_valid() {
        assert!(create_progress_style().is_ok());
    }

    #[test]
    fn test_processing_context_sizes_semaphore_and_bar() {
        let multi = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        let context = create_processing_context(&multi, 7, 3).unwrap();

        assert_eq!(context.semaphore.available_permits(), 3);
        assert_eq!(context.progress_bar.length(), Some(7));
    }
}
