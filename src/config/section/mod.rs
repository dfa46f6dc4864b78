//! Configuration section definitions.
//!
//! Each module corresponds to a section in `assetgen.toml`:
//!
//! | Module   | TOML Section | Purpose                        |
//! |----------|--------------|--------------------------------|
//! | `bundle` | `[bundle]`   | Inputs and generated source    |
//! | `serve`  | `[serve]`    | Asset server                   |

mod bundle;
mod serve;

pub use bundle::BundleConfig;
pub use serve::ServeConfig;
