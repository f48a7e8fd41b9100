use trendrush::App;

fn main() {
    console_error_panic_hook::set_once();
    leptos::logging::log!("mounting client, api at {}", trendrush::api::DOMAIN_URL);
    leptos::mount::mount_to_body(App);
}
