use console::style;
use std::sync::atomic::{AtomicBool, Ordering};

static QUIET: AtomicBool = AtomicBool::new(false);

/// Styled report output on stdout.
///
/// Every status line of the report goes through here so that `--json` mode
/// can silence the human-readable rendering in one place.
pub(crate) struct Console;

impl Console {
    const fn get_width() -> usize {
        60
    }

    fn horizontal_border() -> String {
        "═".repeat(Self::get_width())
    }

    pub(crate) fn set_quiet(quiet: bool) {
        QUIET.store(quiet, Ordering::Relaxed);
    }

    /// Turns styling off for stdout. Left alone otherwise so the `console`
    /// crate can drop escapes when stdout is not a terminal.
    pub(crate) fn disable_colors() {
        console::set_colors_enabled(false);
    }

    fn emit(line: impl std::fmt::Display) {
        if !QUIET.load(Ordering::Relaxed) {
            println!("{line}");
        }
    }

    pub(crate) fn section(title: &str) {
        Self::blank();
        let width = Self::get_width();
        let formatted_title = format!("{title:^width$}");
        let border = Self::horizontal_border();

        Self::emit(style(format!("╔{border}╗")).magenta().bold());
        Self::emit(style(formatted_title).magenta().bold());
        Self::emit(style(format!("╚{border}╝")).magenta().bold());
    }

    pub(crate) fn blank() {
        Self::emit("");
    }

    pub(crate) fn info(label: &str, value: &str) {
        Self::emit(format!(
            "{}: {}",
            style(label).dim().magenta(),
            style(value).white()
        ));
    }

    /// Indented continuation line under a status line.
    pub(crate) fn detail(text: &str) {
        Self::emit(format!("  {}", style(text).dim()));
    }

    pub(crate) fn success(text: &str) {
        Self::emit(format!("{} {}", style("✓").green().bold(), style(text).green()));
    }

    pub(crate) fn warning(text: &str) {
        Self::emit(format!("{} {}", style("⚠").yellow().bold(), style(text).yellow()));
    }

    pub(crate) fn user_error(text: &str) {
        Self::emit(format!("{} {}", style("✗").red().bold(), style(text).red()));
    }

    pub(crate) fn progress(text: &str) {
        Self::emit(format!("{} {}", style("→").cyan().bold(), style(text).cyan()));
    }
}
