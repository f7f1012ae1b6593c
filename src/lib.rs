pub use anyhow::{anyhow, bail, Context, Result};
pub use indexmap::IndexMap;

mod defaults;
pub use defaults::*;

mod settings;
pub use settings::*;

mod template;
pub use template::*;
