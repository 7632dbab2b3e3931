//! CLI command implementations.
//!
//! | Module   | Commands handled     |
//! |----------|----------------------|
//! | `run`    | `Run` (the default)  |
//! | `list`   | `Projects`, `Repos`  |
//! | `config` | `Config`             |

pub mod config;
pub mod list;
pub mod run;

pub use config::cmd_config;
pub use list::{cmd_projects, cmd_repos};
pub use run::cmd_run;
