//! Script runtime management
//!
//! Owns the embedded QuickJS instance the dice modules are loaded into.
//! Scripts have no console of their own; a `print` global is injected that
//! forwards to the host's log stream.

use rquickjs::{CatchResultExt, Context, Function, Runtime, Value};

use crate::error::ScriptError;

/// Script execution context
pub struct ScriptRuntime {
    #[allow(dead_code)] // Kept alive for context lifetime
    runtime: Runtime,
    pub context: Context,
}

impl ScriptRuntime {
    pub fn new() -> Result<Self, ScriptError> {
        let runtime = Runtime::new().map_err(|e| ScriptError::init(e))?;
        let context = Context::full(&runtime).map_err(|e| ScriptError::init(e))?;

        context
            .with(|ctx| -> rquickjs::Result<()> {
                let print = Function::new(ctx.clone(), |msg: String| {
                    tracing::info!(target: "script", "{msg}");
                })?;
                ctx.globals().set("print", print)?;
                Ok(())
            })
            .map_err(|e| ScriptError::init(e))?;

        Ok(Self { runtime, context })
    }

    /// Evaluate a source snippet and convert its completion value.
    pub fn eval<V>(&self, source: &str) -> Result<V, ScriptError>
    where
        V: for<'js> rquickjs::FromJs<'js>,
    {
        self.context.with(|ctx| {
            ctx.eval::<V, _>(source)
                .catch(&ctx)
                .map_err(|e| ScriptError::exec("eval", e))
        })
    }

    /// Whether a runtime global of this name is currently bound.
    pub fn has_global(&self, name: &str) -> bool {
        self.context.with(|ctx| {
            ctx.globals()
                .get::<_, Value>(name)
                .map(|value| !value.is_undefined())
                .unwrap_or(false)
        })
    }
}

impl Default for ScriptRuntime {
    fn default() -> Self {
        Self::new().expect("Failed to create script runtime")
    }
}
