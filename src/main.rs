use penstand::app::App;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("penstand admin starting");
    leptos::mount::mount_to_body(App);
}
