#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("lesson-fx runs in the browser. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    lesson_fx::frontend::run();
}
