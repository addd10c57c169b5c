/// Zoom levels used when the backend does not supply a usable list.
pub const DEFAULT_ZOOM_LEVELS: [f32; 6] = [0.25, 0.5, 0.75, 1.0, 2.0, 4.0];

/// Diff tolerance applied when a session starts.
pub const DEFAULT_THRESHOLD: u8 = 20;

/// Quiet period after the last container resize before a pane redraws.
pub const RESIZE_DEBOUNCE_MS: u64 = 30;

/// Initial top-left corner of the floating scoring panel, in screen points.
pub const DEFAULT_PANEL_POSITION: (f32, f32) = (100.0, 100.0);

/// Templates shown per page in the catalog.
pub const TEMPLATES_PER_PAGE: usize = 7;

/// Per-request timeout for backend calls.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

pub const DEFAULT_USER_ID: &str = "anonymous";

/// Upper bound on a single image response body (64 MiB).
pub const MAX_IMAGE_BYTES: u64 = 64 * 1024 * 1024;

/// Number of images loaded per comparison (A, B, diff).
pub const LOAD_BATCH_SIZE: usize = 3;

/// Minimum pixel count (h*w) to compute diff magnitudes row-parallel.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Extensions recognised when pairing files on disk.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Diff colour for pixels that are exactly equal.
pub const DIFF_IDENTICAL_RGB: [u8; 3] = [0, 0, 0];

/// Diff colour for pixels that differ but stay within the threshold.
pub const DIFF_WITHIN_RGB: [u8; 3] = [0, 0, 255];

/// Diff colour for pixels whose difference exceeds the threshold.
pub const DIFF_OVER_RGB: [u8; 3] = [255, 0, 0];

/// Shown in place of missing template dates.
pub const MISSING_DATE_LABEL: &str = "N/A";
