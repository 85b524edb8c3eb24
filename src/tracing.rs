use std::cell::Cell;
use std::collections::HashMap;
use std::fmt::{Arguments, Write as _};
use std::io::Write as _;
use std::num::NonZeroU64;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use thread_local::ThreadLocal;
use tracing::field::{Field as TraceField, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::subscriber::SetGlobalDefaultError;
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_core::Interest;
use tracing_core::span::Current;

///
/// Bookkeeping for one open span.
///
struct SpanNode {
    parent: Option<Id>,
    /// number of live handles, the node is dropped once this reaches zero
    handles: AtomicUsize,
    /// the span name followed by its fields, e.g. `f4(len=3)`
    label: String,
    metadata: &'static Metadata<'static>,
    depth: usize,
    /// whether this span currently owns the output line; only one span of the tree
    /// prints at a time, so that output of concurrent computations does not interleave
    owns_output: AtomicBool,
    entered_at: Mutex<Option<Instant>>
}

impl SpanNode {

    ///
    /// Moves the right to print from `self` to the caller, if `self` has it.
    ///
    fn take_output(&self) -> bool {
        self.owns_output.compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst).is_ok()
    }

    fn give_output(&self) {
        self.owns_output.store(true, Ordering::SeqCst);
    }
}

///
/// A [`tracing::Subscriber`] that prints the spans of algorithms like
/// [`crate::algorithms::f4::f4()`] as a compact, nested progress line, followed by
/// the time spent in each span. Spans deeper than `max_depth` are not printed.
///
/// INFO-level events within printed spans are printed as well.
///
pub struct LogAlgorithmSubscriber {
    next_id: AtomicU64,
    spans: RwLock<HashMap<Id, SpanNode>>,
    current: ThreadLocal<Cell<Option<NonZeroU64>>>,
    levels: RangeInclusive<Level>,
    max_depth: usize,
    capture: Option<Arc<Mutex<String>>>
}

impl LogAlgorithmSubscriber {

    pub fn new(levels: RangeInclusive<Level>, max_depth: usize) -> Self {
        Self {
            next_id: AtomicU64::new(1),
            spans: RwLock::new(HashMap::new()),
            current: ThreadLocal::new(),
            levels,
            max_depth,
            capture: None
        }
    }

    ///
    /// Writes all output into the given buffer instead of stdout.
    ///
    pub fn capture_into(mut self, buffer: Arc<Mutex<String>>) -> Self {
        self.capture = Some(buffer);
        self
    }

    ///
    /// Installs this subscriber as global default.
    ///
    pub fn init(levels: RangeInclusive<Level>, max_depth: usize) -> Result<(), SetGlobalDefaultError> {
        tracing::subscriber::set_global_default(Self::new(levels, max_depth))
    }

    ///
    /// Installs the subscriber as used in tests. Does nothing if another
    /// global subscriber has already been installed.
    ///
    pub fn init_test() {
        _ = Self::init(Level::INFO..=Level::INFO, 2);
    }

    fn read_spans(&self) -> RwLockReadGuard<'_, HashMap<Id, SpanNode>> {
        self.spans.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_spans(&self) -> RwLockWriteGuard<'_, HashMap<Id, SpanNode>> {
        self.spans.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn current_cell(&self) -> &Cell<Option<NonZeroU64>> {
        self.current.get_or(|| Cell::new(None))
    }

    fn emit(&self, args: Arguments) {
        match &self.capture {
            Some(buffer) => {
                let mut buffer = buffer.lock().unwrap_or_else(PoisonError::into_inner);
                _ = buffer.write_fmt(args);
            },
            None => {
                print!("{}", args);
                _ = std::io::stdout().flush();
            }
        }
    }
}

///
/// Collects the fields of a span or event into a string.
///
#[derive(Default)]
struct FieldCollector {
    message: Option<String>,
    fields: String
}

impl FieldCollector {

    fn render(self) -> String {
        let mut result = self.message.unwrap_or_default();
        if self.fields.is_empty() {
            result.push('.');
        } else {
            _ = write!(result, "({})", self.fields);
        }
        return result;
    }

    fn render_span(self, name: &str) -> String {
        if self.fields.is_empty() {
            name.to_owned()
        } else {
            format!("{}({})", name, self.fields)
        }
    }
}

impl Visit for FieldCollector {

    fn record_debug(&mut self, field: &TraceField, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        } else {
            if !self.fields.is_empty() {
                self.fields.push_str(", ");
            }
            _ = write!(self.fields, "{}={:?}", field.name(), value);
        }
    }
}

impl Subscriber for LogAlgorithmSubscriber {

    fn register_callsite(&self, metadata: &'static Metadata<'static>) -> Interest {
        if self.levels.contains(metadata.level()) {
            Interest::always()
        } else {
            Interest::never()
        }
    }

    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.levels.contains(metadata.level())
    }

    fn current_span(&self) -> Current {
        let spans = self.read_spans();
        match self.current_cell().get().map(Id::from_non_zero_u64) {
            Some(id) => match spans.get(&id) {
                Some(node) => Current::new(id, node.metadata),
                None => Current::none()
            },
            None => Current::none()
        }
    }

    fn new_span(&self, span: &Attributes<'_>) -> Id {
        let raw = self.next_id.fetch_add(1, Ordering::Relaxed);
        let id = Id::from_u64(raw);
        let parent = span.parent().cloned().or_else(|| self.current_cell().get().map(Id::from_non_zero_u64));

        let mut fields = FieldCollector::default();
        span.record(&mut fields);

        let mut spans = self.write_spans();
        let depth = parent.as_ref().and_then(|p| spans.get(p)).map(|p| p.depth + 1).unwrap_or(0);
        spans.insert(id.clone(), SpanNode {
            parent,
            handles: AtomicUsize::new(1),
            label: fields.render_span(span.metadata().name()),
            metadata: span.metadata(),
            depth,
            owns_output: AtomicBool::new(false),
            entered_at: Mutex::new(None)
        });
        return id;
    }

    fn record(&self, _span: &Id, _values: &Record<'_>) {
        // fields are only read when the span is created
    }

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        if *event.metadata().level() != Level::INFO {
            return;
        }
        let spans = self.read_spans();
        let visible = match self.current_cell().get().map(Id::from_non_zero_u64) {
            Some(id) => spans.get(&id).map(|node| node.owns_output.load(Ordering::SeqCst) && node.depth < self.max_depth).unwrap_or(false),
            None => true
        };
        if visible {
            let mut fields = FieldCollector::default();
            event.record(&mut fields);
            self.emit(format_args!("{}", fields.render()));
        }
    }

    fn enter(&self, span: &Id) {
        self.current_cell().set(Some(span.into_non_zero_u64()));
        let spans = self.read_spans();
        let node = match spans.get(span) {
            Some(node) => node,
            None => return
        };
        let may_print = match node.parent.as_ref().and_then(|p| spans.get(p)) {
            Some(parent) => parent.take_output(),
            None => true
        };
        if may_print {
            if node.depth < self.max_depth {
                self.emit(format_args!("{}", node.label));
            } else if node.depth == self.max_depth {
                self.emit(format_args!("{}...", node.label));
            }
            node.give_output();
        }
        *node.entered_at.lock().unwrap_or_else(PoisonError::into_inner) = Some(Instant::now());
    }

    fn exit(&self, span: &Id) {
        let spans = self.read_spans();
        let node = match spans.get(span) {
            Some(node) => node,
            None => return
        };
        let elapsed = node.entered_at.lock().unwrap_or_else(PoisonError::into_inner).take().map(|t| t.elapsed().as_micros()).unwrap_or(0);
        if node.take_output() {
            if node.depth <= self.max_depth {
                if node.depth == 0 {
                    self.emit(format_args!("done({}us)\n", elapsed));
                } else {
                    self.emit(format_args!("done({}us)", elapsed));
                }
            }
            if let Some(parent) = node.parent.as_ref().and_then(|p| spans.get(p)) {
                parent.give_output();
            }
        }
        self.current_cell().set(node.parent.as_ref().map(Id::into_non_zero_u64));
    }

    fn clone_span(&self, id: &Id) -> Id {
        if let Some(node) = self.read_spans().get(id) {
            node.handles.fetch_add(1, Ordering::Relaxed);
        }
        return id.clone();
    }

    fn try_close(&self, id: Id) -> bool {
        let remaining = match self.read_spans().get(&id) {
            Some(node) => node.handles.fetch_sub(1, Ordering::Relaxed) - 1,
            None => return false
        };
        if remaining == 0 {
            self.write_spans().remove(&id);
            return true;
        }
        return false;
    }
}

#[cfg(test)]
use tracing::{info, span};

#[test]
fn test_nested_spans() {
    let buffer = Arc::new(Mutex::new(String::new()));
    let subscriber = LogAlgorithmSubscriber::new(Level::INFO..=Level::INFO, 1).capture_into(buffer.clone());
    tracing::subscriber::with_default(subscriber, || {
        let outer = span!(Level::INFO, "outer", n = 2);
        let _outer = outer.enter();
        info!("step");
        {
            let inner = span!(Level::INFO, "inner");
            let _inner = inner.enter();
            info!("hidden");
            let innermost = span!(Level::INFO, "innermost");
            let _innermost = innermost.enter();
        }
    });
    let output = buffer.lock().unwrap().clone();
    assert!(output.starts_with("outer(n=2)step.inner...done("));
    assert!(!output.contains("hidden"));
    assert!(!output.contains("innermost"));
    assert!(output.ends_with("us)\n"));
}

#[test]
fn test_ignores_other_levels() {
    let buffer = Arc::new(Mutex::new(String::new()));
    let subscriber = LogAlgorithmSubscriber::new(Level::INFO..=Level::INFO, 2).capture_into(buffer.clone());
    tracing::subscriber::with_default(subscriber, || {
        let span = span!(Level::TRACE, "reduce");
        let _span = span.enter();
        tracing::debug!("noise");
    });
    assert_eq!("", &*buffer.lock().unwrap());
}
