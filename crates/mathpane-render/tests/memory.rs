//! Live preview compiles a fresh source per keystroke; resident memory must
//! level off instead of growing with the number of compiles.
//!
//! Kept in its own test binary so no other test shares the process.

use mathpane_core::{RenderConfig, RenderState, RenderSurface};
use mathpane_render::TypstTypesetter;

/// Resident set size in KiB, from `/proc/self/statm`.
#[cfg(target_os = "linux")]
fn resident_kib() -> u64 {
    let statm = std::fs::read_to_string("/proc/self/statm").unwrap();
    let pages: u64 = statm.split_whitespace().nth(1).unwrap().parse().unwrap();
    pages * 4
}

#[cfg(target_os = "linux")]
fn type_keystrokes(surface: &mut RenderSurface<TypstTypesetter>, range: std::ops::Range<u32>) {
    for n in range {
        let source = format!(r"\frac{{{n}}}{{s^2 + {n} s + 1}}");
        assert_eq!(surface.set_source(&source).unwrap(), RenderState::Rendered);
    }
}

#[cfg(target_os = "linux")]
#[test]
fn test_memory_levels_off_while_typing() {
    let typesetter = TypstTypesetter::embedded().unwrap();
    let mut surface = RenderSurface::new(typesetter, RenderConfig::default(), 500, 200);

    type_keystrokes(&mut surface, 0..150);
    let settled = resident_kib();
    type_keystrokes(&mut surface, 150..650);
    let after = resident_kib();

    // Unbounded caching costs about 25 KiB per compile, 12 MiB here.
    let growth = after.saturating_sub(settled);
    assert!(growth < 6 * 1024, "resident memory grew by {growth} KiB over 500 compiles");
}
