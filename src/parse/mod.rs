pub mod import;
pub mod module_decl;
pub mod reader;
pub mod scanner;

pub use import::{resolve_import, ModuleLayout, ModuleName};
pub use module_decl::base_dir;
pub use scanner::{scan_imports, ScanOutcome};
