use image::RgbaImage;
use mathpane_core::{
    export_to_file, ExportConfig, ExportOutcome, RenderConfig, RenderState, RenderSurface, TypesetError,
    Typesetter,
};
use mathpane_render::TypstTypesetter;

fn typesetter() -> TypstTypesetter {
    TypstTypesetter::embedded().expect("embedded fonts load")
}

fn ink_pixels(image: &RgbaImage) -> usize {
    image.pixels().filter(|p| p.0[0] < 128).count()
}

#[test]
fn test_embedded_fonts_load() {
    assert!(typesetter().fonts().font_count() > 0);
}

#[test]
fn test_fraction_renders_ink() {
    let image = typesetter().typeset(r"$\frac{1}{2}$", 20.0, 100.0).unwrap();
    assert!(image.width() > 0 && image.height() > 0);
    assert!(ink_pixels(&image) > 0);
    // Corners are background.
    assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255, 255]);
}

#[test]
fn test_fraction_is_taller_than_a_letter() {
    let typesetter = typesetter();
    let letter = typesetter.typeset("$x$", 20.0, 100.0).unwrap();
    let fraction = typesetter.typeset(r"$\frac{x}{y}$", 20.0, 100.0).unwrap();
    assert!(fraction.height() > letter.height());
}

#[test]
fn test_resolution_scales_raster() {
    let typesetter = typesetter();
    let low = typesetter.typeset("$x^2$", 20.0, 100.0).unwrap();
    let high = typesetter.typeset("$x^2$", 20.0, 300.0).unwrap();
    assert!(high.width() >= low.width() * 2);
    assert!(high.height() >= low.height() * 2);
}

#[test]
fn test_malformed_math_is_a_parse_error() {
    let typesetter = typesetter();
    for markup in [r"$\frac{1}{2$", r"$x^2^3$", r"$\nosuchcommand$", r"$\left( x$", "$x}$"] {
        let err = typesetter.typeset(markup, 20.0, 100.0).unwrap_err();
        assert!(matches!(err, TypesetError::Parse(_)), "{markup}: {err}");
    }
}

#[test]
fn test_plain_text_renders() {
    let image = typesetter().typeset("Parsing Error in MathTeX", 20.0, 100.0).unwrap();
    assert!(image.width() > image.height());
    assert!(ink_pixels(&image) > 0);
}

#[test]
fn test_surface_round_trip() {
    let mut surface = RenderSurface::new(typesetter(), RenderConfig::default(), 500, 200);
    assert_eq!(surface.set_source(r"\sum_{n=1}^{\infty} \frac{1}{n^2}").unwrap(), RenderState::Rendered);
    assert_eq!(surface.set_source(r"\frac{1}{2").unwrap(), RenderState::Error);
    assert_eq!(surface.set_source(r"e^{i\pi} + 1 = 0").unwrap(), RenderState::Rendered);
    assert_eq!(surface.raster().dimensions(), (500, 200));
}

#[test]
fn test_export_crops_to_ink() {
    let dir = tempfile::tempdir().unwrap();
    let config = ExportConfig::default().with_path(dir.path().join("Rendered_Equation.png"));
    let mut surface = RenderSurface::new(typesetter(), RenderConfig::default(), 500, 200);
    surface.set_source(r"\frac{1}{2}").unwrap();

    let outcome = export_to_file(&surface, &config).unwrap();
    assert!(matches!(outcome, ExportOutcome::Written { .. }));

    // Far smaller than the 1500x600 figure, with a white frame.
    let written = image::open(&config.path).unwrap().to_rgba8();
    assert!(written.width() < 1500 && written.height() < 600);
    assert_eq!(written.get_pixel(0, 0).0, [255, 255, 255, 255]);
    assert!(ink_pixels(&written) > 0);
}

#[test]
fn test_fraction_export_is_repeatable() {
    let dir = tempfile::tempdir().unwrap();
    let config = ExportConfig::default().with_path(dir.path().join("Rendered_Equation.png"));
    let mut surface = RenderSurface::new(typesetter(), RenderConfig::default(), 500, 200);
    assert_eq!(surface.set_source(r"\frac{1}{2}").unwrap(), RenderState::Rendered);

    assert!(matches!(export_to_file(&surface, &config).unwrap(), ExportOutcome::Written { .. }));
    let first = std::fs::read(&config.path).unwrap();
    assert!(matches!(export_to_file(&surface, &config).unwrap(), ExportOutcome::Written { .. }));
    let second = std::fs::read(&config.path).unwrap();

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_unterminated_fraction_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = ExportConfig::default().with_path(dir.path().join("Rendered_Equation.png"));
    let mut surface = RenderSurface::new(typesetter(), RenderConfig::default(), 500, 200);
    assert_eq!(surface.set_source(r"\frac{1}{2").unwrap(), RenderState::Error);

    assert!(matches!(export_to_file(&surface, &config).unwrap(), ExportOutcome::Refused));
    assert!(!config.path.exists());
}
