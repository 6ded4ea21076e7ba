//! Positioning function registry.
//!
//! A slide's `func` attribute names the function that positions it. Names
//! resolve first against the built-in namespace; otherwise a name of the form
//! `module.function` is split on its first `.` and looked up in a registered
//! module, or in a module produced on demand by a [`ModuleLoader`].

use std::{collections::HashMap, fmt, ops::ControlFlow, rc::Rc};

use log::{debug, info};

use impress_core::{coord::SlideCoord, slides::Slides};

use crate::{
    config::LayoutConfig,
    error::{LayoutError, ResolveError},
    funcs,
};

/// What a positioning function returns: `Break` halts the layout pass.
pub type Placement = Result<ControlFlow<()>, LayoutError>;

/// A positioning function.
///
/// It receives the mutable view of the slide being positioned and a
/// read-only view of every other slide.
pub type PositionFn = Rc<dyn Fn(&mut SlideCoord<'_>, &Slides<'_>) -> Placement>;

/// Wrap a function or closure as a [`PositionFn`].
pub fn position_fn<F>(func: F) -> PositionFn
where
    F: Fn(&mut SlideCoord<'_>, &Slides<'_>) -> Placement + 'static,
{
    Rc::new(func)
}

/// A namespace of externally supplied positioning functions.
pub trait FunctionModule {
    /// Look a function up by its name within the module.
    fn function(&self, name: &str) -> Option<PositionFn>;
}

/// Produces modules that were not registered up front.
pub trait ModuleLoader {
    /// Load the module with the given dotted path, if it exists.
    fn load(&self, path: &str) -> Option<Rc<dyn FunctionModule>>;
}

/// A module backed by a fixed table of functions.
#[derive(Default, Clone)]
pub struct StaticModule {
    functions: HashMap<String, PositionFn>,
}

impl StaticModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a function (builder style).
    pub fn with_function<F>(mut self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&mut SlideCoord<'_>, &Slides<'_>) -> Placement + 'static,
    {
        self.functions.insert(name.into(), position_fn(func));
        self
    }
}

impl FunctionModule for StaticModule {
    fn function(&self, name: &str) -> Option<PositionFn> {
        self.functions.get(name).cloned()
    }
}

impl fmt::Debug for StaticModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.functions.keys().collect();
        names.sort();
        f.debug_struct("StaticModule").field("functions", &names).finish()
    }
}

/// Resolves positioning function names.
pub struct Registry {
    builtins: HashMap<&'static str, PositionFn>,
    // Registered and loaded modules, by dotted path
    modules: HashMap<String, Rc<dyn FunctionModule>>,
    loader: Option<Box<dyn ModuleLoader>>,
}

impl Registry {
    /// A registry with an empty built-in namespace.
    pub fn empty() -> Self {
        Self {
            builtins: HashMap::new(),
            modules: HashMap::new(),
            loader: None,
        }
    }

    /// A registry holding the built-in functions configured by `config`.
    pub fn new(config: &LayoutConfig) -> Self {
        let mut registry = Self::empty();
        for (name, func) in funcs::builtins(config) {
            registry.builtins.insert(name, func);
        }
        registry
    }

    /// Register an external module under a dotted path.
    pub fn register_module(&mut self, path: impl Into<String>, module: impl FunctionModule + 'static) {
        let path = path.into();
        debug!(module = path; "Registered positioning module");
        self.modules.insert(path, Rc::new(module));
    }

    /// Install the loader consulted for unregistered modules.
    pub fn set_loader(&mut self, loader: impl ModuleLoader + 'static) {
        self.loader = Some(Box::new(loader));
    }

    /// Whether `name` is in the built-in namespace.
    pub fn is_builtin(&self, name: &str) -> bool {
        self.builtins.contains_key(name)
    }

    /// Resolve a function name.
    ///
    /// Modules produced by the loader are cached for later lookups.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] naming the reference that could not be
    /// resolved.
    pub fn resolve(&mut self, name: &str) -> Result<PositionFn, ResolveError> {
        if let Some(func) = self.builtins.get(name) {
            return Ok(Rc::clone(func));
        }

        let (path, function) = name
            .split_once('.')
            .ok_or_else(|| ResolveError::UnknownFunction(name.to_string()))?;
        let module = self.module(path).ok_or_else(|| ResolveError::MissingModule {
            module: path.to_string(),
            reference: name.to_string(),
        })?;

        module
            .function(function)
            .ok_or_else(|| ResolveError::MissingFunction {
                module: path.to_string(),
                function: function.to_string(),
            })
    }

    fn module(&mut self, path: &str) -> Option<Rc<dyn FunctionModule>> {
        if let Some(module) = self.modules.get(path) {
            return Some(Rc::clone(module));
        }
        let module = self.loader.as_ref()?.load(path)?;
        info!(module = path; "Loaded positioning module");
        self.modules.insert(path.to_string(), Rc::clone(&module));
        Some(module)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builtins: Vec<_> = self.builtins.keys().collect();
        builtins.sort();
        let mut modules: Vec<_> = self.modules.keys().collect();
        modules.sort();
        f.debug_struct("Registry")
            .field("builtins", &builtins)
            .field("modules", &modules)
            .field("loader", &self.loader.is_some())
            .finish()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}
