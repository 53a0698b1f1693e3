//! Result type alias for twig operations.

use super::twig_error::TwigError;

/// Type alias for Results using TwigError.
///
/// # Example
///
/// ```ignore
/// use twig::error::TwigResult;
///
/// fn open_services(dir: &Path) -> TwigResult<Services> {
///     let settings = FileSettings::open(dir.join("settings.json"))?;
///     // ...
/// }
/// ```
pub type TwigResult<T> = Result<T, TwigError>;
