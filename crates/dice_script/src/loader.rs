//! Module loading for packaged script chunks
//!
//! Brings packaged chunks into the runtime, binds module globals, and runs
//! the entry chunk. The boot sequence is strictly linear and runs once
//! during host initialization.

use rquickjs::{CatchResultExt, Ctx, Module, Object};

use crate::error::ScriptError;
use crate::runtime::ScriptRuntime;

/// A packaged script chunk: an immutable name + bytes pair.
///
/// The byte layout is whatever the packaging step produced; the loader
/// hands it to the runtime untouched. The name tags the chunk in
/// diagnostics and doubles as the global binding name.
#[derive(Debug, Clone, Copy)]
pub struct ModuleBuffer<'a> {
    pub name: &'a str,
    pub bytes: &'a [u8],
}

impl<'a> ModuleBuffer<'a> {
    pub const fn new(name: &'a str, bytes: &'a [u8]) -> Self {
        Self { name, bytes }
    }
}

/// How [`boot`] treats a failure in the entry chunk.
///
/// `Lenient` keeps the historical behavior: the failure is logged and
/// recorded in the report, but boot still succeeds. `Strict` propagates it
/// the same way the module chunks do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPolicy {
    Lenient,
    Strict,
}

/// Outcome of the entry chunk when boot itself succeeded.
#[derive(Debug)]
pub enum EntryOutcome {
    Completed { results: usize },
    Failed { error: ScriptError },
}

/// What a successful boot bound and ran.
#[derive(Debug)]
pub struct BootReport {
    /// Module names bound as runtime globals, in load order.
    pub modules: Vec<String>,
    pub entry: EntryOutcome,
}

impl BootReport {
    pub fn entry_completed(&self) -> bool {
        matches!(self.entry, EntryOutcome::Completed { .. })
    }
}

fn check(buffer: &ModuleBuffer<'_>) -> Result<(), ScriptError> {
    if buffer.name.is_empty() {
        return Err(ScriptError::load("<unnamed>", "empty chunk name"));
    }
    if buffer.bytes.is_empty() {
        return Err(ScriptError::load(buffer.name, "empty buffer"));
    }
    Ok(())
}

/// Compile and evaluate one chunk, yielding its namespace object.
///
/// Declaration failures are load errors; anything after that is an
/// execution error. Module bodies are synchronous, so finishing the eval
/// promise cannot block.
fn evaluate_chunk<'js>(
    ctx: &Ctx<'js>,
    buffer: &ModuleBuffer<'_>,
) -> Result<Object<'js>, ScriptError> {
    let declared = Module::declare(ctx.clone(), buffer.name, buffer.bytes)
        .catch(ctx)
        .map_err(|e| ScriptError::load(buffer.name, e))?;

    let (evaluated, promise) = declared
        .eval()
        .catch(ctx)
        .map_err(|e| ScriptError::exec(buffer.name, e))?;
    promise
        .finish::<()>()
        .catch(ctx)
        .map_err(|e| ScriptError::exec(buffer.name, e))?;

    evaluated
        .namespace()
        .catch(ctx)
        .map_err(|e| ScriptError::exec(buffer.name, e))
}

/// Load a chunk and bind its namespace as a runtime global.
///
/// The global is written only after the chunk evaluated cleanly; a failed
/// chunk leaves the global namespace untouched. No duplicate guard exists,
/// so binding the same name again rebinds it (last write wins).
pub fn load_to_global(
    runtime: &ScriptRuntime,
    buffer: &ModuleBuffer<'_>,
) -> Result<(), ScriptError> {
    check(buffer)?;
    runtime.context.with(|ctx| {
        let namespace = evaluate_chunk(&ctx, buffer)?;
        ctx.globals()
            .set(buffer.name, namespace)
            .catch(&ctx)
            .map_err(|e| ScriptError::exec(buffer.name, e))?;
        tracing::debug!(module = buffer.name, "bound script module global");
        Ok(())
    })
}

/// Load and run a chunk without binding a global.
///
/// Returns how many values the chunk exported; the values themselves stay
/// in the runtime's module map for scripts to consume.
pub fn load_and_run(
    runtime: &ScriptRuntime,
    buffer: &ModuleBuffer<'_>,
) -> Result<usize, ScriptError> {
    check(buffer)?;
    runtime.context.with(|ctx| {
        let namespace = evaluate_chunk(&ctx, buffer)?;
        let results = namespace.keys::<String>().count();
        tracing::debug!(module = buffer.name, results, "ran script chunk");
        Ok(results)
    })
}

/// One-shot boot sequence: bind each module global in order, then run the
/// entry chunk.
///
/// The first module failure aborts immediately and propagates unchanged;
/// later chunks are never attempted. The entry chunk's failure is handled
/// according to `policy`.
pub fn boot(
    runtime: &ScriptRuntime,
    modules: &[ModuleBuffer<'_>],
    entry: &ModuleBuffer<'_>,
    policy: EntryPolicy,
) -> Result<BootReport, ScriptError> {
    let mut bound = Vec::with_capacity(modules.len());
    for buffer in modules {
        load_to_global(runtime, buffer)?;
        bound.push(buffer.name.to_string());
    }

    let entry_outcome = match load_and_run(runtime, entry) {
        Ok(results) => EntryOutcome::Completed { results },
        Err(error) => match policy {
            EntryPolicy::Strict => return Err(error),
            EntryPolicy::Lenient => {
                tracing::warn!(module = entry.name, %error, "entry chunk failed");
                EntryOutcome::Failed { error }
            }
        },
    };

    Ok(BootReport {
        modules: bound,
        entry: entry_outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runtime() -> ScriptRuntime {
        ScriptRuntime::new().unwrap()
    }

    fn buffer<'a>(name: &'a str, source: &'a str) -> ModuleBuffer<'a> {
        ModuleBuffer::new(name, source.as_bytes())
    }

    #[test]
    fn load_to_global_binds_module_namespace() {
        let rt = runtime();
        let roll = buffer("Roll", "export function roll() { return 4; }");
        load_to_global(&rt, &roll).unwrap();

        assert!(rt.has_global("Roll"));
        let rolled: i32 = rt.eval("Roll.roll()").unwrap();
        assert_eq!(rolled, 4);
    }

    #[test]
    fn syntax_error_is_a_load_failure_without_binding() {
        let rt = runtime();
        let bad = buffer("Roll", "export function (");
        let err = load_to_global(&rt, &bad).unwrap_err();

        assert!(matches!(err, ScriptError::Load { .. }));
        assert!(err.to_string().starts_with("Failed to load Roll:"));
        assert!(!rt.has_global("Roll"));
    }

    #[test]
    fn throwing_chunk_is_an_exec_failure_without_binding() {
        let rt = runtime();
        let bad = buffer("Roll", "throw new Error('bad dice table');");
        let err = load_to_global(&rt, &bad).unwrap_err();

        assert!(matches!(err, ScriptError::Exec { .. }));
        assert!(err.to_string().starts_with("Failed to execute Roll:"));
        assert!(err.to_string().contains("bad dice table"));
        assert!(!rt.has_global("Roll"));
    }

    #[test]
    fn load_and_run_counts_exports() {
        let rt = runtime();
        let chunk = buffer("rollmain", "export const a = 1; export const b = 2;");
        assert_eq!(load_and_run(&rt, &chunk).unwrap(), 2);
    }

    #[test]
    fn load_and_run_reports_both_phases() {
        let rt = runtime();

        let err = load_and_run(&rt, &buffer("rollmain", "export const (")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load rollmain:"));

        let err = load_and_run(&rt, &buffer("rollmain", "undefinedCall();")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to execute rollmain:"));
    }

    #[test]
    fn empty_inputs_are_load_failures() {
        let rt = runtime();

        let err = load_to_global(&rt, &ModuleBuffer::new("Roll", b"")).unwrap_err();
        assert!(matches!(err, ScriptError::Load { .. }));
        assert!(!rt.has_global("Roll"));

        let err = load_and_run(&rt, &ModuleBuffer::new("", b"export {};")).unwrap_err();
        assert!(matches!(err, ScriptError::Load { .. }));
    }

    #[test]
    fn rebinding_is_last_write_wins() {
        let rt = runtime();
        load_to_global(&rt, &buffer("Roll", "export const sides = 6;")).unwrap();
        load_to_global(&rt, &buffer("Roll", "export const sides = 20;")).unwrap();

        let sides: i32 = rt.eval("Roll.sides").unwrap();
        assert_eq!(sides, 20);
    }

    #[test]
    fn boot_stops_at_first_module_failure() {
        let rt = runtime();
        let modules = [
            buffer("Roll", "export function ("),
            buffer("RollTests", "export const ok = true;"),
        ];
        let entry = buffer("rollmain", "globalThis.entryRan = true; export {};");
        let err = boot(&rt, &modules, &entry, EntryPolicy::Lenient).unwrap_err();

        assert!(err.to_string().starts_with("Failed to load Roll:"));
        assert!(!rt.has_global("RollTests"));
        assert!(!rt.has_global("entryRan"));
    }

    #[test]
    fn lenient_boot_swallows_entry_failure() {
        let rt = runtime();
        let modules = [buffer("Roll", "export const sides = 6;")];
        let entry = buffer("rollmain", "throw new Error('no dice');");
        let report = boot(&rt, &modules, &entry, EntryPolicy::Lenient).unwrap();

        assert_eq!(report.modules, ["Roll"]);
        assert!(!report.entry_completed());
        assert!(rt.has_global("Roll"));
    }

    #[test]
    fn strict_boot_propagates_entry_failure() {
        let rt = runtime();
        let modules = [buffer("Roll", "export const sides = 6;")];
        let entry = buffer("rollmain", "throw new Error('no dice');");
        let err = boot(&rt, &modules, &entry, EntryPolicy::Strict).unwrap_err();

        assert!(err.to_string().starts_with("Failed to execute rollmain:"));
        // Modules bound before the entry chunk stay bound.
        assert!(rt.has_global("Roll"));
    }

    #[test]
    fn boot_runs_entry_against_bound_globals() {
        let rt = runtime();
        let modules = [
            buffer("Roll", "export function roll() { return 4; }"),
            buffer(
                "RollTests",
                "export function check(roll) { return roll.roll() === 4; }",
            ),
        ];
        let entry = buffer(
            "rollmain",
            "globalThis.checked = globalThis.RollTests.check(globalThis.Roll); export {};",
        );
        let report = boot(&rt, &modules, &entry, EntryPolicy::Strict).unwrap();

        assert_eq!(report.modules, ["Roll", "RollTests"]);
        assert!(report.entry_completed());
        let checked: bool = rt.eval("checked").unwrap();
        assert!(checked);
    }
}
