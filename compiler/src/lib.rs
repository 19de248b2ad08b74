// bfg: text to Brainfuck generator
//
// Library root. Generator phases live here as modules.

pub mod codegen;
pub mod format;
pub mod pipeline;
pub mod registry;
pub mod resolve;
pub mod tape;
