use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Lifetime of a view. Responses are only applied while the ticket they were
/// requested under is still current.
#[derive(Debug, Clone)]
pub struct ViewScope {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    mounted: AtomicBool,
    generation: AtomicU64,
}

impl Default for ViewScope {
    fn default() -> Self {
        Self {
            inner: Arc::new(Inner {
                mounted: AtomicBool::new(true),
                generation: AtomicU64::new(0),
            }),
        }
    }
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request. Any older ticket stops being current.
    pub fn ticket(&self) -> Ticket {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            scope: self.clone(),
            generation,
        }
    }

    pub fn unmount(&self) {
        self.inner.mounted.store(false, Ordering::SeqCst);
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct Ticket {
    scope: ViewScope,
    generation: u64,
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.scope.is_mounted() && self.scope.inner.generation.load(Ordering::SeqCst) == self.generation
    }

    /// Hands `value` back only if the view still wants it.
    pub fn accept<T>(self, value: T) -> Option<T> {
        self.is_current().then_some(value)
    }
}
