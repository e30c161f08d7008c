//! Machine whose dispatch settles on a later scheduler turn.

use super::action::{AsyncAction, Outcome};
use super::error::{ActionError, DispatchError};
use crate::builder::MachineBuilder;
use crate::core::{Event, Logger, SharedLogger, State, Transition, TransitionTable};
use crate::render::{self, MachineSnapshot};
use futures::channel::oneshot;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::any::Any;
use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard};
use std::task::{ready, Context, Poll};

/// Remaining work of a callback that returned [`Outcome::Deferred`].
type Settle = BoxFuture<'static, Result<(), DispatchError>>;

/// Result of the matching step, handed to the waiting [`Dispatch`].
type Matched = Result<Option<Settle>, DispatchError>;

/// State machine with asynchronous dispatch.
///
/// This is a cheap handle: clones share the same current state, table and
/// logger. Callbacks receive such a clone, which is how they read the state
/// they moved into or chain further events.
///
/// A transition is committed when it is matched, before its callback runs.
/// A failing callback therefore leaves the machine in the target state.
///
/// Dispatched events wait in a per-machine queue and are matched one at a
/// time in the order they were issued, whatever the runtime flavour.
pub struct AsyncMachine<S, E, A = ()> {
    inner: Arc<Shared<S, E, A>>,
}

struct Shared<S, E, A> {
    initial: S,
    current: Mutex<S>,
    table: RwLock<TransitionTable<S, E, AsyncAction<S, E, A>>>,
    logger: SharedLogger,
    queue: Mutex<VecDeque<Step<E, A>>>,
    /// Held while one queued step is matched and its callback invoked.
    stepping: Mutex<()>,
}

struct Step<E, A> {
    event: E,
    args: A,
    reply: oneshot::Sender<Matched>,
}

impl<S, E, A> Clone for AsyncMachine<S, E, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: State, E: Event, A: Send + 'static> AsyncMachine<S, E, A> {
    /// Create a machine with an empty table and the default logger.
    pub fn new(initial: S) -> Self {
        Self::from_parts(initial, TransitionTable::new(), SharedLogger::default())
    }

    pub fn builder() -> MachineBuilder<S, E, AsyncAction<S, E, A>> {
        MachineBuilder::new()
    }

    pub(crate) fn from_parts(
        initial: S,
        table: TransitionTable<S, E, AsyncAction<S, E, A>>,
        logger: SharedLogger,
    ) -> Self {
        Self {
            inner: Arc::new(Shared {
                current: Mutex::new(initial.clone()),
                initial,
                table: RwLock::new(table),
                logger,
                queue: Mutex::new(VecDeque::new()),
                stepping: Mutex::new(()),
            }),
        }
    }

    /// Current state (pure).
    pub fn state(&self) -> S {
        self.current().clone()
    }

    pub fn initial_state(&self) -> &S {
        &self.inner.initial
    }

    /// Check whether `event` is admissible from the current state (pure).
    pub fn can(&self, event: &E) -> bool {
        let current = self.current();
        self.table().can_fire(&current, event)
    }

    /// State `event` would lead to, without firing it (pure).
    pub fn next_state(&self, event: &E) -> Option<S> {
        let current = self.current();
        self.table().next_state(&current, event).cloned()
    }

    /// True when no transition leaves the current state (pure).
    pub fn is_final(&self) -> bool {
        let current = self.current();
        self.table().is_terminal(&current)
    }

    /// Append transitions to the table. Existing rules keep precedence.
    pub fn add_transitions<I>(&self, transitions: I)
    where
        I: IntoIterator<Item = Transition<S, E, AsyncAction<S, E, A>>>,
    {
        self.inner
            .table
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .append(transitions);
    }

    pub fn logger(&self) -> &SharedLogger {
        &self.inner.logger
    }

    /// Dispatch `event` with default arguments.
    pub fn dispatch(&self, event: E) -> Dispatch
    where
        A: Default,
    {
        self.dispatch_with(event, A::default())
    }

    /// Dispatch `event`, passing `args` to the transition's callback.
    ///
    /// The event is queued and matched by a spawned task, never inside this
    /// call. Queued events are matched one at a time in issue order, so an
    /// event issued while an earlier one is still queued sees the state that
    /// earlier one moved to. On a current-thread runtime nothing is matched
    /// before the caller yields; on a multi-thread runtime a worker may pick
    /// the step up at once.
    ///
    /// Deferred callback work makes progress while the returned [`Dispatch`]
    /// is polled. Dropping it does not cancel anything: the step is still
    /// matched and any deferred work is handed to the runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn dispatch_with(&self, event: E, args: A) -> Dispatch {
        let (reply, matched) = oneshot::channel();
        self.queue().push_back(Step { event, args, reply });
        tokio::spawn(self.clone().run_next());
        Dispatch {
            stage: Stage::Matching(matched),
        }
    }

    /// Render the table as a Mermaid state diagram.
    pub fn to_diagram(&self, title: Option<&str>) -> String {
        render::mermaid(&*self.table(), &self.inner.initial, title)
    }

    pub fn snapshot(&self) -> MachineSnapshot<S, E> {
        let current = self.state();
        MachineSnapshot::capture(&*self.table(), &self.inner.initial, current)
    }

    /// Match the oldest queued event. Every dispatch spawns one of these, so
    /// each queued step is taken exactly once.
    async fn run_next(self) {
        let Some((reply, matched)) = self.step() else {
            return;
        };
        // The caller went away before matching finished; finish its work here.
        if let Err(Ok(Some(settle))) = reply.send(matched) {
            let _ = settle.await;
        }
    }

    fn step(&self) -> Option<(oneshot::Sender<Matched>, Matched)> {
        let _turn = self
            .inner
            .stepping
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let Step { event, args, reply } = self.queue().pop_front()?;
        Some((reply, self.fire(event, args)))
    }

    fn fire(&self, event: E, args: A) -> Matched {
        let callback = match self.commit(&event) {
            Ok(callback) => callback,
            Err(err) => {
                self.inner.logger.error(&err.to_string());
                return Err(err);
            }
        };

        let Some(callback) = callback else {
            return Ok(None);
        };

        let machine = self.clone();
        match panic::catch_unwind(AssertUnwindSafe(|| callback(machine, args))) {
            Ok(Ok(Outcome::Immediate)) => Ok(None),
            Ok(Ok(Outcome::Deferred(pending))) => Ok(Some(self.settle(pending))),
            Ok(Err(err)) => {
                self.inner
                    .logger
                    .error(&format!("Exception caught in callback: {err:#}"));
                Err(DispatchError::Action(err))
            }
            Err(payload) => Err(self.aborted(&*payload)),
        }
    }

    fn settle(&self, pending: BoxFuture<'static, Result<(), ActionError>>) -> Settle {
        let machine = self.clone();
        async move {
            match AssertUnwindSafe(pending).catch_unwind().await {
                Ok(result) => result.map_err(DispatchError::Action),
                Err(payload) => Err(machine.aborted(&*payload)),
            }
        }
        .boxed()
    }

    fn aborted(&self, payload: &(dyn Any + Send)) -> DispatchError {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|msg| msg.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "callback panicked".to_string());
        let err = DispatchError::Aborted(reason);
        self.inner.logger.error(&err.to_string());
        err
    }

    /// Match `event` and move to the target state. Returns the callback to
    /// run; no lock is held once this returns.
    fn commit(&self, event: &E) -> Result<Option<AsyncAction<S, E, A>>, DispatchError> {
        let mut current = self.current();
        let table = self.table();
        let transition = table
            .find(&current, event)
            .ok_or_else(|| DispatchError::no_transition(&*current, event))?;
        *current = transition.to.clone();
        Ok(transition.callback.clone())
    }

    fn current(&self) -> MutexGuard<'_, S> {
        self.inner
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn queue(&self) -> MutexGuard<'_, VecDeque<Step<E, A>>> {
        self.inner
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn table(&self) -> RwLockReadGuard<'_, TransitionTable<S, E, AsyncAction<S, E, A>>> {
        self.inner
            .table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: State, E: Event, A: Send + 'static> fmt::Debug for AsyncMachine<S, E, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncMachine")
            .field("initial", &self.inner.initial)
            .field("current", &*self.current())
            .field("transitions", &self.table().len())
            .field("queued", &self.queue().len())
            .finish()
    }
}

/// Pending result of [`AsyncMachine::dispatch`].
///
/// Resolves once the transition has been matched and its callback, if any,
/// has settled.
pub struct Dispatch {
    stage: Stage,
}

enum Stage {
    Matching(oneshot::Receiver<Matched>),
    Settling(Settle),
    Done,
}

impl Future for Dispatch {
    type Output = Result<(), DispatchError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        loop {
            match &mut this.stage {
                Stage::Matching(matched) => {
                    let matched = ready!(Pin::new(matched).poll(cx)).unwrap_or_else(|_| {
                        Err(DispatchError::Aborted(
                            "machine stopped before matching the event".to_string(),
                        ))
                    });
                    match matched {
                        Ok(Some(settle)) => this.stage = Stage::Settling(settle),
                        Ok(None) => {
                            this.stage = Stage::Done;
                            return Poll::Ready(Ok(()));
                        }
                        Err(err) => {
                            this.stage = Stage::Done;
                            return Poll::Ready(Err(err));
                        }
                    }
                }
                Stage::Settling(settle) => {
                    let result = ready!(settle.as_mut().poll(cx));
                    this.stage = Stage::Done;
                    return Poll::Ready(result);
                }
                Stage::Done => panic!("Dispatch polled after completion"),
            }
        }
    }
}

impl Drop for Dispatch {
    fn drop(&mut self) {
        let settle = match mem::replace(&mut self.stage, Stage::Done) {
            Stage::Matching(mut matched) => {
                // Either the step sees the closed channel and settles the
                // work itself, or the reply is already here.
                matched.close();
                match matched.try_recv() {
                    Ok(Some(Ok(Some(settle)))) => settle,
                    _ => return,
                }
            }
            Stage::Settling(settle) => settle,
            Stage::Done => return,
        };
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            runtime.spawn(settle);
        }
    }
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self.stage {
            Stage::Matching(_) => "matching",
            Stage::Settling(_) => "settling",
            Stage::Done => "done",
        };
        f.debug_struct("Dispatch").field("stage", &stage).finish()
    }
}
