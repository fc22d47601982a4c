use crate::domain::{NavigateError, Navigator};

/// Hands URLs to the operating system's default opener (browser, mail
/// client). Link commands report failures as handler errors, not crashes.
pub struct SystemNavigator;

impl Navigator for SystemNavigator {
    fn open_url(&mut self, url: &str) -> Result<(), NavigateError> {
        open::that(url).map_err(|error| NavigateError(format!("failed to open {url}: {error}")))
    }
}
