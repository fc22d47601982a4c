use crate::domain::Clock;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

/// Wall-clock time for todo stamps (RFC3339, UTC) and the `date` command
/// (local time when the offset is determinable, UTC otherwise).
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_rfc3339(&self) -> String {
        OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
    }

    fn now_display(&self) -> String {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        let format = format_description!(
            "[weekday repr:short] [month repr:short] [day] [year] [hour]:[minute]:[second]"
        );
        now.format(&format).unwrap_or_else(|_| self.now_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc3339_stamp_parses_back() {
        let stamp = SystemClock.now_rfc3339();
        assert!(OffsetDateTime::parse(&stamp, &Rfc3339).is_ok());
    }

    #[test]
    fn display_form_is_nonempty_and_single_line() {
        let display = SystemClock.now_display();
        assert!(!display.is_empty());
        assert!(!display.contains('\n'));
    }
}
