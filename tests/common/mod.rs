use chrono::{DateTime, Local, TimeZone};
use logtree::{Builder, CaptureRenderer, Registry};

pub fn instant() -> DateTime<Local> {
    Local.with_ymd_and_hms(2022, 7, 1, 9, 30, 0).unwrap()
}

/// Registry with colors off, a pinned clock and a capturing renderer.
pub fn registry() -> (Registry, CaptureRenderer) {
    let capture = CaptureRenderer::at(instant());
    let registry = Builder::new()
        .with_renderer(capture.clone())
        .with_ansi(false)
        .build();
    (registry, capture)
}
