//! Packaged script chunks
//!
//! The build embeds the shipped scripts as opaque byte buffers. Each name
//! matches the global the boot sequence binds for it; `rollmain` is the
//! entry chunk and binds nothing.

use dice_script::loader::ModuleBuffer;

pub const ROLL: ModuleBuffer<'static> =
    ModuleBuffer::new("Roll", include_bytes!("../scripts/roll.js"));

pub const ROLL_TESTS: ModuleBuffer<'static> =
    ModuleBuffer::new("RollTests", include_bytes!("../scripts/test_rolls.js"));

pub const ROLL_MAIN: ModuleBuffer<'static> =
    ModuleBuffer::new("rollmain", include_bytes!("../scripts/main.js"));
