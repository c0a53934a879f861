fn main() {
    // Forwards the ESP-IDF environment from esp-idf-sys; a no-op on host builds.
    embuild::espidf::sysenv::output();

    println!("cargo:rerun-if-changed=sdkconfig.defaults");
}
