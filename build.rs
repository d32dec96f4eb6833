fn main() {
    // ESP-IDF link arguments are only needed for the firmware binary.
    // Host builds (`--no-default-features`) skip embuild entirely.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
