//! Theme store on an in-memory host

use paperstore::theme::{MemoryHost, ThemeStore, DARK_CLASS};
use std::sync::Arc;

fn main() {
    println!("=== Theme Example ===\n");

    // The host reports a dark system preference and has nothing stored yet
    let host = Arc::new(MemoryHost::new(true));
    let theme = ThemeStore::new(host.clone());

    theme.subscribe(|theme| {
        println!("Theme changed to {}", theme);
    });

    theme.init();
    println!("After init: {} (dark class: {})", theme.get(), host.has_root_class(DARK_CLASS));

    println!("\nToggling...");
    theme.toggle();
    println!("Now: {} (dark class: {})", theme.get(), host.has_root_class(DARK_CLASS));
}
