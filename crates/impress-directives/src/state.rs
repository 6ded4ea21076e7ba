//! Process-wide state shared by the directives during a build pass.
//!
//! The state is keyed by document source so that several documents built in
//! the same process never see each other's options. Nothing is reclaimed
//! automatically: a long-lived host must call [`BuildState::reset`] or raise
//! the [`ResetSignal`] between independent builds.

use std::{cell::RefCell, collections::HashMap, env, ffi::OsString};

use log::debug;

use impress_core::{attribute::Attributes, coord::Pose};

/// Document-wide default options, keyed by document source.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    by_source: HashMap<String, Attributes>,
}

impl GlobalOptions {
    /// Record defaults for a document; later registrations overwrite earlier keys.
    pub fn register(&mut self, source: &str, options: &Attributes) {
        let defaults = self.defaults_mut(source);
        for (key, value) in options.iter() {
            defaults.insert(key, value.clone());
        }
    }

    /// Defaults recorded for a document, if any.
    pub fn get(&self, source: &str) -> Option<&Attributes> {
        self.by_source.get(source)
    }

    /// Fill the options a slide left unset from the document defaults.
    ///
    /// Options already present in `options` always win. Returns the number of
    /// defaults applied.
    pub fn merge_into(&mut self, source: &str, options: &mut Attributes) -> usize {
        let mut merged = 0;
        for (key, value) in self.defaults_mut(source).iter() {
            if !options.contains_key(key) {
                options.insert(key, value.clone());
                merged += 1;
            }
        }
        merged
    }

    pub fn clear(&mut self) {
        self.by_source.clear();
    }

    /// Number of documents with recorded defaults.
    pub fn len(&self) -> usize {
        self.by_source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_source.is_empty()
    }

    fn defaults_mut(&mut self, source: &str) -> &mut Attributes {
        self.by_source.entry(source.to_string()).or_default()
    }
}

/// Bookkeeping for the step directives and the layout pass.
#[derive(Debug, Clone, Default)]
pub struct StepState {
    applied: HashMap<String, usize>,
    last_pose: HashMap<String, Pose>,
}

impl StepState {
    /// Count one applied step for a document.
    pub fn record_applied(&mut self, source: &str) {
        *self.applied.entry(source.to_string()).or_default() += 1;
    }

    /// Number of steps applied for a document.
    pub fn applied(&self, source: &str) -> usize {
        self.applied.get(source).copied().unwrap_or_default()
    }

    /// Remember the pose of the last slide positioned in a document.
    pub fn record_pose(&mut self, source: &str, pose: Pose) {
        self.last_pose.insert(source.to_string(), pose);
    }

    pub fn last_pose(&self, source: &str) -> Option<Pose> {
        self.last_pose.get(source).copied()
    }

    pub fn clear(&mut self) {
        self.applied.clear();
        self.last_pose.clear();
    }
}

/// One-shot request to clear the build state.
///
/// The signal is raised either explicitly with [`ResetSignal::request`] or by
/// the presence of an environment variable. It stays pending until consumed.
/// Consuming remembers the variable's value, which is ignored from then on; a
/// check that finds the variable unset forgets it, so setting the variable
/// again raises the signal again.
#[derive(Debug, Clone, Default)]
pub struct ResetSignal {
    var: Option<String>,
    requested: bool,
    consumed: RefCell<Option<OsString>>,
}

impl ResetSignal {
    /// A signal that is only raised explicitly.
    pub fn manual() -> Self {
        Self::default()
    }

    /// A signal that is also raised while the environment variable `var` is set.
    pub fn from_env(var: impl Into<String>) -> Self {
        Self {
            var: Some(var.into()),
            ..Self::default()
        }
    }

    /// Raise the signal.
    pub fn request(&mut self) {
        self.requested = true;
    }

    /// Whether a reset is pending, checking the environment now.
    pub fn is_pending(&self) -> bool {
        if self.requested {
            return true;
        }
        let Some(current) = self.observe() else {
            self.consumed.replace(None);
            return false;
        };
        self.consumed.borrow().as_ref() != Some(&current)
    }

    /// Acknowledge the pending reset.
    pub fn consume(&mut self) {
        self.requested = false;
        *self.consumed.get_mut() = self.observe();
    }

    fn observe(&self) -> Option<OsString> {
        self.var.as_deref().and_then(env::var_os)
    }
}

/// All state shared by the directives for one build pass.
#[derive(Debug, Clone, Default)]
pub struct BuildState {
    global: GlobalOptions,
    steps: StepState,
    signal: ResetSignal,
}

impl BuildState {
    /// Create empty state observing the given reset signal.
    pub fn new(signal: ResetSignal) -> Self {
        Self {
            signal,
            ..Self::default()
        }
    }

    pub fn global(&self) -> &GlobalOptions {
        &self.global
    }

    pub fn global_mut(&mut self) -> &mut GlobalOptions {
        &mut self.global
    }

    pub fn steps(&self) -> &StepState {
        &self.steps
    }

    pub fn steps_mut(&mut self) -> &mut StepState {
        &mut self.steps
    }

    pub fn signal(&self) -> &ResetSignal {
        &self.signal
    }

    pub fn signal_mut(&mut self) -> &mut ResetSignal {
        &mut self.signal
    }

    /// Clear global options and step state.
    pub fn reset(&mut self) {
        debug!("Resetting build state");
        self.global.clear();
        self.steps.clear();
    }
}
