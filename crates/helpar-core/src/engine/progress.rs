/// Events emitted while a workflow runs.
///
/// A workflow opens a phase, starts a task sized to the number of units it will
/// analyse (columns or base-pair steps), increments once per finished unit, and
/// closes both. Non-fatal conditions such as unconverged fits arrive as `Warning`.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    Message(String),
    Warning(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Wraps `task` in a phase and a task of `total_steps` units.
    pub fn phase<T>(&self, name: &'static str, total_steps: u64, task: impl FnOnce() -> T) -> T {
        self.report(Progress::PhaseStart { name });
        self.report(Progress::TaskStart { total_steps });
        let result = task();
        self.report(Progress::TaskFinish);
        self.report(Progress::PhaseFinish);
        result
    }
}
