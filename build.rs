fn main() {
    // napi-build emits Node linker flags; only wanted when the bridge is on.
    if std::env::var_os("CARGO_FEATURE_NAPI").is_some() {
        napi_build::setup();
    }
}
