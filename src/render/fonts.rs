use plotters::style::{register_font, FontStyle};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const FONT_FAMILY: &str = "sans-serif";

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static REGISTERED: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Registers a TTF under [`FONT_FAMILY`] once per process.
///
/// `preferred` is tried before the system locations. Returns the font that
/// ended up registered, if any. Later calls return the first outcome.
pub fn ensure_registered(preferred: Option<&str>) -> Option<&'static Path> {
    let mut initialized = false;
    let registered = REGISTERED
        .get_or_init(|| {
            initialized = true;
            let candidates = preferred
                .into_iter()
                .map(PathBuf::from)
                .chain(SYSTEM_FONTS.iter().map(PathBuf::from));

            for path in candidates {
                match try_register(&path) {
                    Ok(()) => {
                        tracing::debug!("Using font {}", path.display());
                        return Some(path);
                    }
                    Err(reason) => tracing::trace!("Skipping font {}: {}", path.display(), reason),
                }
            }

            tracing::warn!("No usable TrueType font found; chart labels will be omitted");
            None
        })
        .as_deref();

    if let Some(wanted) = preferred.filter(|_| !initialized) {
        if registered != Some(Path::new(wanted)) {
            tracing::debug!(
                "Font {} ignored; {} is already registered for this process",
                wanted,
                registered.map_or_else(|| "no font".into(), |p| p.display().to_string())
            );
        }
    }
    registered
}

fn try_register(path: &Path) -> Result<(), String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    // The registry keeps the font for the life of the process.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font(FONT_FAMILY, FontStyle::Normal, bytes)
        .map_err(|_| format!("{} is not a valid TrueType font", path.display()))
}
