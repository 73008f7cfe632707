// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! The retry loop and the thread-local fault schedule.

use std::cell::RefCell;

use log::{debug, trace};

use crate::context::FaultContext;
use crate::error::{FaultRunError, InjectedFault};
use crate::guards::is_fault_injection_disabled;

thread_local! {
    static CONTEXT: RefCell<Option<FaultContext>> = const { RefCell::new(None) };
}

/// Configuration for [`faulty_run_with()`].
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct FaultRunConfig {
    /// Upper bound on the number of runs, `None` for no bound.
    ///
    /// Enumeration always terminates for an operation with finitely many fault
    /// points; the bound turns a runaway operation into an error instead of a hang.
    pub max_runs: Option<usize>,
}

impl FaultRunConfig {
    /// Environment variable read by [`from_env()`](Self::from_env).
    pub const MAX_RUNS_ENV: &'static str = "RAMPART_FAULT_MAX_RUNS";

    /// Reads `RAMPART_FAULT_MAX_RUNS`; unset or unparsable means no bound.
    pub fn from_env() -> Self {
        let max_runs = std::env::var(Self::MAX_RUNS_ENV)
            .ok()
            .and_then(|value| value.trim().parse().ok());

        Self { max_runs }
    }

    /// Returns the configuration with the run bound replaced.
    pub fn with_max_runs(mut self, max_runs: usize) -> Self {
        self.max_runs = Some(max_runs);
        self
    }
}

/// Summary of a completed [`faulty_run()`].
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct FaultRunReport {
    /// Number of times the operation was invoked, including the final clean run.
    pub runs: usize,
    /// Number of runs stopped by an injected fault.
    pub faults_injected: usize,
    /// Largest number of schedule depths a single run reached.
    pub deepest_fault: usize,
}

/// Returns `true` while a [`faulty_run()`] is driving the current thread.
pub fn is_run_active() -> bool {
    CONTEXT
        .try_with(|slot| slot.try_borrow().map(|ctx| ctx.is_some()).unwrap_or(true))
        .unwrap_or(false)
}

/// Asks the active schedule whether the current fault point must fail.
///
/// Returns `false` outside of [`faulty_run()`] and while a
/// [`FaultInjectionDisable`](crate::FaultInjectionDisable) guard is alive. Suppressed
/// checks leave the schedule untouched.
pub fn should_inject_fault() -> bool {
    if is_fault_injection_disabled() {
        return false;
    }

    CONTEXT
        .try_with(|slot| {
            let Ok(mut slot) = slot.try_borrow_mut() else {
                return false;
            };
            let Some(ctx) = slot.as_mut() else {
                return false;
            };

            let inject = ctx.check();
            if inject {
                trace!("injecting fault, skip_ranges: {:?}", ctx.skip_ranges());
            }

            inject
        })
        .unwrap_or(false)
}

/// A fault point: fails with [`InjectedFault`] when the schedule says so.
///
/// # Example
///
/// ```rust
/// use rampart_fault::fault_point;
///
/// // Outside of `faulty_run` nothing is ever injected.
/// assert!(fault_point().is_ok());
/// ```
#[inline]
pub fn fault_point() -> Result<(), InjectedFault> {
    if should_inject_fault() {
        return Err(InjectedFault);
    }

    Ok(())
}

/// Drives `f` until every reachable fault point has failed once.
///
/// Uses [`FaultRunConfig::from_env()`]. See [`faulty_run_with()`].
pub fn faulty_run<E, F>(f: F) -> Result<FaultRunReport, FaultRunError<E>>
where
    F: FnMut() -> Result<(), E>,
{
    faulty_run_with(&FaultRunConfig::from_env(), f)
}

/// Drives `f` until every reachable fault point has failed once.
///
/// Each run installs nothing new: the schedule persists across runs. After a run that
/// returned `Err` with a fault injected, the schedule advances to the next fault point
/// and `f` runs again. The loop ends with the first run that completes without any
/// injected fault.
///
/// # Errors
///
/// - [`FaultRunError::Nested`] if a run is already active on this thread.
/// - [`FaultRunError::Unexpected`] if `f` fails while no fault was injected.
/// - [`FaultRunError::FaultSwallowed`] if `f` succeeds although a fault was injected.
/// - [`FaultRunError::RunLimitExceeded`] if `config.max_runs` is reached.
///
/// The schedule is removed on every exit path, including a panic inside `f`.
pub fn faulty_run_with<E, F>(
    config: &FaultRunConfig,
    mut f: F,
) -> Result<FaultRunReport, FaultRunError<E>>
where
    F: FnMut() -> Result<(), E>,
{
    let active = ActiveRun::install().ok_or(FaultRunError::Nested)?;
    let mut report = FaultRunReport::default();

    loop {
        if let Some(limit) = config.max_runs {
            if report.runs >= limit {
                return Err(FaultRunError::RunLimitExceeded { limit });
            }
        }

        report.runs += 1;
        let outcome = f();
        let registered = active.with(|ctx| ctx.fault_registered());

        match outcome {
            Err(err) if !registered => return Err(FaultRunError::Unexpected(err)),
            Err(_) => {
                active.with(|ctx| {
                    report.deepest_fault = report.deepest_fault.max(ctx.error_index());
                    debug!(
                        "run {} stopped by injected fault, skip_ranges: {:?}, error_index: {}, skip_index: {}",
                        report.runs,
                        ctx.skip_ranges(),
                        ctx.error_index(),
                        ctx.skip_index(),
                    );
                    ctx.advance();
                });
                report.faults_injected += 1;
            }
            Ok(()) if registered => {
                return Err(FaultRunError::FaultSwallowed { run: report.runs });
            }
            Ok(()) => break,
        }
    }

    debug!(
        "faulty_run finished after {} runs ({} faults injected)",
        report.runs, report.faults_injected
    );

    Ok(report)
}

/// Owns the thread-local schedule for the duration of one `faulty_run`.
struct ActiveRun {
    _not_send: core::marker::PhantomData<*const ()>,
}

impl ActiveRun {
    fn install() -> Option<Self> {
        CONTEXT.with(|slot| {
            let mut slot = slot.borrow_mut();
            if slot.is_some() {
                return None;
            }

            *slot = Some(FaultContext::new());

            Some(Self {
                _not_send: core::marker::PhantomData,
            })
        })
    }

    fn with<R>(&self, f: impl FnOnce(&mut FaultContext) -> R) -> R {
        CONTEXT.with(|slot| f(slot.borrow_mut().get_or_insert_with(FaultContext::new)))
    }
}

impl Drop for ActiveRun {
    fn drop(&mut self) {
        let _ = CONTEXT.try_with(|slot| slot.borrow_mut().take());
    }
}
