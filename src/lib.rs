//! Bookshelf application library
//!
//! Holds the application modules and the bootstrap shared by the
//! `bookshelf-app` binary and the CLI.

pub mod modules;

use bookshelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

pub use modules::books;

/// Registry with every application module registered
pub fn build_registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);
    registry
}

/// Initialize and start all modules, serve HTTP until shutdown, then stop
/// the modules again.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let registry = build_registry();
    let ctx = InitCtx { settings };

    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let served = bookshelf_http::start_server(&registry, settings).await;

    registry.stop_all().await?;
    served
}
