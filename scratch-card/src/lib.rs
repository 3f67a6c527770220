pub mod catalog;
pub mod certificate;
pub mod constants;
pub mod game;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod storage;
pub mod surface;
pub mod types;
#[cfg(target_arch = "wasm32")]
mod web;

pub use catalog::build_catalog;
pub use certificate::{Celebration, Certificate, CertificateRenderer, Downloader, ShareTarget};
pub use game::GameState;
pub use session::{Progress, Session};
pub use storage::{KeyValueStore, MemoryStore};
pub use surface::{DrawingSurface, PixelSurface, ScratchPad};
pub use types::*;
