use std::fmt::Arguments;
use std::io::Write;

///
/// Trait for objects that observe a potentially long-running computation.
///
/// Algorithms like [`crate::algorithms::buchberger::buchberger()`] report their progress
/// through this trait, usually by single characters (e.g. `s` for a new basis element,
/// `-` for an S-polynomial that reduced to zero). How this is displayed (or whether at all)
/// is up to the controller.
///
pub trait ComputationController: Clone {

    ///
    /// Reports a piece of progress information, usually via [`log_progress!`].
    ///
    fn log(&self, args: Arguments);

    ///
    /// Runs the given computation, logging its description before it starts and
    /// a short note once it finished.
    ///
    fn run_computation<F, T>(self, description: Arguments, computation: F) -> T
        where F: FnOnce(Self) -> T
    {
        self.log(format_args!("{} ", description));
        let result = computation(self.clone());
        self.log(format_args!("done\n"));
        return result;
    }
}

///
/// Reports progress of a computation to the given [`ComputationController`],
/// with the same syntax as [`std::format!`].
///
#[macro_export]
macro_rules! log_progress {
    ($controller:expr, $($args:tt)*) => {
        ($controller).log(std::format_args!($($args)*))
    };
}

///
/// A [`ComputationController`] that prints all progress to stdout.
///
/// This uses `print!` instead of writing to [`std::io::Stdout`] directly, since
/// then the output is captured in tests.
///
#[derive(Clone, Copy, Debug, Default)]
pub struct LogProgress;

impl ComputationController for LogProgress {

    fn log(&self, args: Arguments) {
        print!("{}", args);
        // losing progress output is not worth failing the computation
        _ = std::io::stdout().flush();
    }
}

///
/// A [`ComputationController`] that ignores all progress information.
///
#[derive(Clone, Copy, Debug, Default)]
pub struct DontObserve;

impl ComputationController for DontObserve {

    fn log(&self, _args: Arguments) {}
}

///
/// The controller used in tests, which logs everything.
///
pub const TEST_LOG_PROGRESS: LogProgress = LogProgress;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[cfg(test)]
#[derive(Clone, Default)]
struct RecordProgress {
    output: Rc<RefCell<String>>
}

#[cfg(test)]
impl ComputationController for RecordProgress {

    fn log(&self, args: Arguments) {
        self.output.borrow_mut().push_str(&format!("{}", args));
    }
}

#[test]
fn test_run_computation() {
    let controller = RecordProgress::default();
    let result = controller.clone().run_computation(format_args!("sum(n={})", 3), |controller| {
        for i in 0..3 {
            log_progress!(controller, "{}", i);
        }
        6
    });
    assert_eq!(6, result);
    assert_eq!("sum(n=3) 012done\n", &*controller.output.borrow());
}

#[test]
fn test_dont_observe() {
    let result = DontObserve.run_computation(format_args!("nothing"), |controller| {
        log_progress!(controller, "ignored");
        1
    });
    assert_eq!(1, result);
}
