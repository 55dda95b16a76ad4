use crate::console::Console;
use serde::Serialize;

/// Terminal verdict of a run.
///
/// Decided by two inputs only: whether every required command is installed and
/// whether a usable GPU was found. Package availability is reported but
/// deliberately does not gate the verdict, since the suggested `uv sync`
/// installs packages while commands need manual setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Readiness {
    Ready,
    /// Everything required is present but training will run on CPU.
    ReadyWithoutGpu,
    NotReady,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerdictMessage {
    pub headline: &'static str,
    pub notes: &'static [&'static str],
    pub steps_heading: &'static str,
    pub steps: &'static [&'static str],
}

impl Readiness {
    pub const fn from_checks(required_commands_ok: bool, gpu_ok: bool) -> Self {
        match (required_commands_ok, gpu_ok) {
            (true, true) => Self::Ready,
            (true, false) => Self::ReadyWithoutGpu,
            (false, _) => Self::NotReady,
        }
    }

    /// Process exit status for scripted callers.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Ready => 0,
            Self::ReadyWithoutGpu => 1,
            Self::NotReady => 2,
        }
    }

    pub const fn message(&self) -> VerdictMessage {
        match self {
            Self::Ready => VerdictMessage {
                headline: "Your system appears ready for DGX Spark nanochat!",
                notes: &[],
                steps_heading: "Next steps:",
                steps: &[
                    "1. Run: bash dgx_spark_run.sh",
                    "2. Or for a quick demo: bash quick_demo.sh",
                ],
            },
            Self::ReadyWithoutGpu => VerdictMessage {
                headline: "System is ready but no GPU detected",
                notes: &["Training will be very slow on CPU"],
                steps_heading: "You can still proceed:",
                steps: &["bash quick_demo.sh"],
            },
            Self::NotReady => VerdictMessage {
                headline: "Some requirements are missing",
                notes: &[],
                steps_heading: "Please install missing components and run this script again",
                steps: &["See DGX_SPARK_SETUP.md for detailed instructions"],
            },
        }
    }

    pub fn print(&self) {
        let message = self.message();

        Console::blank();
        match self {
            Self::Ready => Console::success(message.headline),
            Self::ReadyWithoutGpu => Console::warning(message.headline),
            Self::NotReady => Console::user_error(message.headline),
        }
        for note in message.notes {
            Console::detail(note);
        }

        Console::blank();
        Console::progress(message.steps_heading);
        for step in message.steps {
            Console::detail(step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_good_is_ready() {
        let verdict = Readiness::from_checks(true, true);
        assert_eq!(verdict, Readiness::Ready);
        let message = verdict.message();
        assert!(message.steps.iter().any(|s| s.contains("dgx_spark_run.sh")));
        assert!(message.steps.iter().any(|s| s.contains("quick_demo.sh")));
    }

    #[test]
    fn test_no_gpu_is_ready_but_slow() {
        let verdict = Readiness::from_checks(true, false);
        assert_eq!(verdict, Readiness::ReadyWithoutGpu);
        let message = verdict.message();
        assert_eq!(message.notes, &["Training will be very slow on CPU"]);
        assert_eq!(message.steps, &["bash quick_demo.sh"]);
    }

    #[test]
    fn test_missing_commands_is_not_ready_regardless_of_gpu() {
        assert_eq!(Readiness::from_checks(false, true), Readiness::NotReady);
        assert_eq!(Readiness::from_checks(false, false), Readiness::NotReady);
        assert!(Readiness::NotReady
            .message()
            .steps_heading
            .contains("install missing components"));
    }

    #[test]
    fn test_branches_are_exhaustive_and_distinct() {
        let verdicts: Vec<_> = [(true, true), (true, false), (false, true), (false, false)]
            .into_iter()
            .map(|(commands, gpu)| Readiness::from_checks(commands, gpu))
            .collect();
        assert_eq!(
            verdicts,
            vec![
                Readiness::Ready,
                Readiness::ReadyWithoutGpu,
                Readiness::NotReady,
                Readiness::NotReady
            ]
        );

        let headlines: std::collections::HashSet<_> = [
            Readiness::Ready,
            Readiness::ReadyWithoutGpu,
            Readiness::NotReady,
        ]
        .iter()
        .map(|v| v.message().headline)
        .collect();
        assert_eq!(headlines.len(), 3);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Readiness::Ready.exit_code(), 0);
        assert_eq!(Readiness::ReadyWithoutGpu.exit_code(), 1);
        assert_eq!(Readiness::NotReady.exit_code(), 2);
    }
}
