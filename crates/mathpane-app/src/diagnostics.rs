//! Startup diagnostics written to the log.

use mathpane_render::TypstTypesetter;

/// Versions of the libraries doing the real work, as pinned in the
/// workspace manifest.
pub const LIBRARY_VERSIONS: &[(&str, &str)] = &[
    ("typst", "0.14"),
    ("typst-render", "0.14"),
    ("egui", "0.33"),
    ("egui-wgpu", "0.33"),
    ("wgpu", "27"),
    ("winit", "0.30"),
    ("png", "0.17"),
];

/// Platform, program version and library versions.
pub fn log_platform() {
    log::info!(
        "MathPane {} on {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH,
        std::env::consts::FAMILY
    );
    for (name, version) in LIBRARY_VERSIONS {
        log::info!("  {} {}", name, version);
    }
}

/// Whether the typesetter is ready, and how long its fonts took.
pub fn log_typesetter(typesetter: &TypstTypesetter) {
    let fonts = typesetter.fonts();
    log::info!(
        "Typesetter ready: typst with {} font faces, loaded in {:.1?}",
        fonts.font_count(),
        fonts.load_time()
    );
}

pub fn log_adapter(info: &wgpu::AdapterInfo) {
    log::info!(
        "GPU adapter: {} ({:?}, {:?} backend, driver {})",
        info.name,
        info.device_type,
        info.backend,
        info.driver
    );
}
