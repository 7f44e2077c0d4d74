//! folio - static page rendering and template dependency resolution.
//!
//! | Module     | Role                                                   |
//! |------------|--------------------------------------------------------|
//! | `tree`     | Read-only folder hierarchies (disk or in-memory)       |
//! | `template` | `template.yaml` → [`template::DependencyManifest`]     |
//! | `loader`   | Executes declared scripts with cycle detection         |
//! | `render`   | Node tree → lazily produced HTML document              |
//! | `page`     | Named pages, layout wrapper, static-render flag        |
//! | `config`   | `folio.toml`                                           |

pub mod config;
pub mod loader;
pub mod logger;
pub mod page;
pub mod render;
pub mod template;
pub mod tree;
pub mod utils;
