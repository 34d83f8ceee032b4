//! Business logic - what happens when user interacts

pub fn say_hello() {
    log::info!("Hello!");
}

pub fn say_string(text: String) {
    log::info!("{}", text);
}

pub fn say_state(checked: bool) {
    log::info!("CheckBox is now {}", if checked { "checked" } else { "unchecked" });
}

pub fn say_value(value: f32) {
    log::info!("Slider value: {:.3}", value);
}
