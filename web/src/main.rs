use dioxus::prelude::*;
use dioxus_logger::tracing::Level;

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let level = option_env!("ECOTOUR_LOG_LEVEL")
        .and_then(|l| l.parse::<Level>().ok())
        .unwrap_or(Level::INFO);
    if let Err(e) = dioxus_logger::init(level) {
        eprintln!("logger already initialized: {e}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::App()
}
