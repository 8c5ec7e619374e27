pub mod books;

use bookclub_db::{SharedBookStore, StoreModule};
use bookclub_kernel::{settings::Settings, ModuleRegistry};

/// Register the store core module and every project module
pub fn register_all(registry: &mut ModuleRegistry, store: SharedBookStore, settings: &Settings) {
    registry.register_core(std::sync::Arc::new(StoreModule::new(store.clone())));
    registry.register_custom(books::create_module(store, settings));
}
