//! Async support for the Courier runtime.
//!
//! Wraps the synchronous dispatch loop for drivers that live inside an
//! async executor. `stop_when_idle` is the one synchronization point the
//! runtime exposes to callers: the initiating task suspends until the
//! delivery queue is empty and no handler is in flight, while the
//! dispatch loop itself never blocks — its only suspension points are
//! yields between deliveries.
//!
//! # Feature Flag
//!
//! This module requires the `async` feature:
//! ```toml
//! courier-runtime = { version = "0.1", features = ["async"] }
//! ```
//!
//! # Note on Send bounds
//!
//! Runtime holds `Box<dyn Agent>` which is not `Send`, so async use goes
//! through `Rc<RefCell<_>>` within a `LocalSet`, matching the
//! single-logical-thread model of the dispatch loop.

#![cfg(feature = "async")]

use crate::runtime::{Runtime, RuntimeEvent, RuntimeStats};
use courier_core::agent::Agent;
use courier_core::error::Result;
use courier_core::message::Message;
use courier_core::types::{AgentKey, EnvelopeId, TopicId};
use std::cell::RefCell;
use std::rc::Rc;

/// Async wrapper around [`Runtime`] for use inside a tokio `LocalSet`.
pub struct AsyncRuntime {
    runtime: Rc<RefCell<Runtime>>,
}

impl AsyncRuntime {
    /// Create an AsyncRuntime wrapping an existing Runtime.
    pub fn new(runtime: Runtime) -> Self {
        Self {
            runtime: Rc::new(RefCell::new(runtime)),
        }
    }

    /// Get a clone of the inner Rc for spawning local tasks.
    pub fn inner(&self) -> Rc<RefCell<Runtime>> {
        Rc::clone(&self.runtime)
    }

    /// Take ownership of the inner Runtime, consuming the wrapper.
    ///
    /// # Panics
    /// Panics if there are other references to the runtime.
    pub fn into_inner(self) -> Runtime {
        match Rc::try_unwrap(self.runtime) {
            Ok(cell) => cell.into_inner(),
            Err(_) => panic!("Cannot unwrap AsyncRuntime: other references exist"),
        }
    }

    /// Register an agent under `name`. See [`Runtime::register`].
    pub fn register<F>(&self, name: &str, factory: F) -> Result<AgentKey>
    where
        F: FnOnce() -> Box<dyn Agent>,
    {
        self.runtime.borrow_mut().register(name, factory)
    }

    /// Transition to the accepting-messages state.
    pub fn start(&self) {
        self.runtime.borrow_mut().start();
    }

    /// Enqueue a direct delivery, yielding afterwards so other tasks can
    /// make progress.
    pub async fn send_message(&self, message: Message, to: &AgentKey) -> Result<EnvelopeId> {
        let id = self.runtime.borrow_mut().send_message(message, to)?;
        tokio::task::yield_now().await;
        Ok(id)
    }

    /// Enqueue a broadcast, yielding afterwards.
    pub async fn publish_message(&self, message: Message, topic: &TopicId) -> Result<EnvelopeId> {
        let id = self.runtime.borrow_mut().publish_message(message, topic)?;
        tokio::task::yield_now().await;
        Ok(id)
    }

    /// Suspend until the delivery queue is empty and no handler is in
    /// flight, then return the events recorded during the drain.
    ///
    /// Deliveries are dispatched one at a time with a yield between each,
    /// so concurrent local tasks interleave at wave boundaries.
    pub async fn stop_when_idle(&self) -> Vec<RuntimeEvent> {
        let mut drained = Vec::new();
        let mut dispatched = 0;
        loop {
            // Borrow only for the duration of one delivery.
            let step = self.runtime.borrow_mut().dispatch_next();
            match step {
                Some(events) => {
                    dispatched += 1;
                    drained.extend(events);
                    tokio::task::yield_now().await;
                }
                None => break,
            }
        }
        drained.push(self.runtime.borrow_mut().note_idle(dispatched));
        drained
    }

    /// Get runtime statistics.
    pub fn stats(&self) -> RuntimeStats {
        self.runtime.borrow().stats()
    }

    pub fn is_idle(&self) -> bool {
        self.runtime.borrow().is_idle()
    }

    pub fn agent_count(&self) -> usize {
        self.runtime.borrow().agent_count()
    }
}

/// Run an async driver against a runtime within a `LocalSet`.
///
/// Convenience for callers that do not want to set up the `LocalSet`
/// themselves.
///
/// # Example
///
/// ```rust,ignore
/// use courier_runtime::async_runtime::run_in_local;
/// use courier_runtime::runtime::Runtime;
///
/// #[tokio::main]
/// async fn main() {
///     let runtime = Runtime::new();
///     let events = run_in_local(runtime, |rt| async move {
///         rt.stop_when_idle().await
///     }).await;
/// }
/// ```
pub async fn run_in_local<F, Fut, T>(runtime: Runtime, f: F) -> T
where
    F: FnOnce(AsyncRuntime) -> Fut,
    Fut: std::future::Future<Output = T>,
{
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async move {
            let async_runtime = AsyncRuntime::new(runtime);
            f(async_runtime).await
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::final_trace;
    use courier_agents::logger::Logger;
    use courier_agents::prime_checker::PrimeChecker;
    use courier_agents::validator::Validator;
    use tokio::task::LocalSet;

    fn pipeline() -> (Runtime, AgentKey) {
        let mut runtime = Runtime::new();
        let validator = runtime
            .register("validator", || Box::new(Validator::new()))
            .unwrap();
        runtime
            .register("prime_checker", || Box::new(PrimeChecker::new()))
            .unwrap();
        runtime.register("logger", || Box::new(Logger::new())).unwrap();
        runtime.start();
        (runtime, validator)
    }

    async fn run_test<F, Fut>(f: F)
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = ()>,
    {
        let local = LocalSet::new();
        local.run_until(f()).await;
    }

    #[tokio::test]
    async fn stop_when_idle_drains_the_pipeline() {
        run_test(|| async {
            let (runtime, validator) = pipeline();
            let rt = AsyncRuntime::new(runtime);

            rt.send_message(Message::text("17"), &validator).await.unwrap();
            let events = rt.stop_when_idle().await;

            assert_eq!(
                final_trace(&events, "Logger"),
                Some("Final Message -> Got the prime number: 17")
            );
            assert!(rt.is_idle());
            assert!(matches!(events.last(), Some(RuntimeEvent::Idle { .. })));
        })
        .await;
    }

    #[tokio::test]
    async fn stop_when_idle_on_an_idle_runtime_returns_immediately() {
        run_test(|| async {
            let (runtime, _) = pipeline();
            let rt = AsyncRuntime::new(runtime);

            let events = rt.stop_when_idle().await;
            assert!(matches!(events.as_slice(), [RuntimeEvent::Idle { dispatched: 0 }]));
        })
        .await;
    }

    #[tokio::test]
    async fn sequential_inputs_each_drain_to_idle() {
        run_test(|| async {
            let (runtime, validator) = pipeline();
            let rt = AsyncRuntime::new(runtime);

            rt.send_message(Message::text("22"), &validator).await.unwrap();
            let first = rt.stop_when_idle().await;
            assert_eq!(
                final_trace(&first, "Logger"),
                Some("Final Message -> Got the prime number: 3")
            );

            rt.send_message(Message::text("hello"), &validator).await.unwrap();
            let second = rt.stop_when_idle().await;
            assert_eq!(
                final_trace(&second, "Logger"),
                Some("Final Message -> Invalid input: not a number")
            );
        })
        .await;
    }

    #[tokio::test]
    async fn into_inner_returns_the_runtime() {
        let (runtime, validator) = pipeline();
        let rt = AsyncRuntime::new(runtime);

        let local = LocalSet::new();
        local
            .run_until(async {
                rt.send_message(Message::text("9"), &validator).await.unwrap();
                rt.stop_when_idle().await;
            })
            .await;

        let runtime = rt.into_inner();
        assert!(runtime.is_idle());
        assert!(runtime.stats().deliveries_dispatched > 0);
    }

    #[tokio::test]
    async fn run_in_local_convenience() {
        let (runtime, validator) = pipeline();
        let final_line = run_in_local(runtime, |rt| async move {
            rt.send_message(Message::text("17"), &validator).await.unwrap();
            let events = rt.stop_when_idle().await;
            final_trace(&events, "Logger").map(str::to_string)
        })
        .await;

        assert_eq!(
            final_line.as_deref(),
            Some("Final Message -> Got the prime number: 17")
        );
    }
}
